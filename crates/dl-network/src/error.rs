//! Registry and node-table error types.

use dl_core::error::ErrorKind;
use dl_core::{NodeId, OpeningId};
use dl_coupling::CouplingError;

/// Errors raised by node lookup and opening registry operations.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// The node id does not exist in the network.
    UnknownNode { node: NodeId },

    /// The node has no opening with this id.
    UnknownOpening { node: NodeId, opening: OpeningId },

    /// Opening area or width is not strictly positive.
    InvalidGeometry { what: &'static str, value: f64 },

    /// Storage for a new record could not be reserved.
    OutOfMemory { what: &'static str },

    /// Any other rejected configuration value.
    InvalidArg { what: &'static str },
}

pub type NetworkResult<T> = Result<T, NetworkError>;

impl NetworkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NetworkError::UnknownNode { .. } | NetworkError::UnknownOpening { .. } => {
                ErrorKind::InvalidIndex
            }
            NetworkError::InvalidGeometry { .. } => ErrorKind::InvalidGeometry,
            NetworkError::OutOfMemory { .. } => ErrorKind::OutOfMemory,
            NetworkError::InvalidArg { .. } => ErrorKind::InvalidArgument,
        }
    }
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::UnknownNode { node } => write!(f, "Node {} does not exist", node),
            NetworkError::UnknownOpening { node, opening } => {
                write!(f, "Node {} has no opening {}", node, opening)
            }
            NetworkError::InvalidGeometry { what, value } => {
                write!(f, "Invalid opening geometry: {} = {}", what, value)
            }
            NetworkError::OutOfMemory { what } => {
                write!(f, "Out of memory while allocating {}", what)
            }
            NetworkError::InvalidArg { what } => write!(f, "Invalid argument: {}", what),
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<CouplingError> for NetworkError {
    fn from(e: CouplingError) -> Self {
        match e {
            CouplingError::InvalidGeometry { what, value } => {
                NetworkError::InvalidGeometry { what, value }
            }
            CouplingError::InvalidArg { what } => NetworkError::InvalidArg { what },
        }
    }
}
