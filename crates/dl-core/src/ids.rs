use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable identifier for a node in the coupled network.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<NodeId>` to be pointer-optimized
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    /// Create an id from a 0-based index by storing index+1.
    ///
    /// Saturates at the last representable id, so use it for lookups only;
    /// allocate new ids with [`NodeId::checked_from_index`].
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::MIN.saturating_add(index))
    }

    /// Create an id for a container offset, or `None` past the last
    /// representable id.
    pub fn checked_from_index(index: usize) -> Option<Self> {
        let index = u32::try_from(index).ok()?;
        index.checked_add(1).and_then(NonZeroU32::new).map(Self)
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.index())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Caller-assigned opening identifier.
///
/// Unique within one node only. Ids need not be dense or sequential, so they
/// are never used as container offsets.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct OpeningId(pub u32);

impl fmt::Debug for OpeningId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpeningId({})", self.0)
    }
}

impl fmt::Display for OpeningId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for OpeningId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
