/// Coarse classification shared by every error type in the workspace.
///
/// Callers of the administrative surface match on this rather than on the
/// concrete error enum of each crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unknown node, opening or parameter id.
    InvalidIndex,
    /// Opening area or width not strictly positive.
    InvalidGeometry,
    /// Storage for a new node or opening could not be allocated.
    OutOfMemory,
    /// Configuration changed before the session is open or while it runs.
    LifecycleViolation,
    /// Any other rejected argument (timestep, non-finite input).
    InvalidArgument,
}
