//! Error types for coupling steps and the administrative session.

use dl_core::error::ErrorKind;
use dl_coupling::CouplingError;
use dl_network::NetworkError;
use thiserror::Error;

use crate::session::SessionPhase;

/// Errors encountered while configuring or stepping the coupling.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Unknown opening parameter key {key}")]
    InvalidParam { key: u32 },

    #[error("Cannot {operation} while the session is {phase}")]
    Lifecycle {
        operation: &'static str,
        phase: SessionPhase,
    },

    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SimError::InvalidArg { .. } => ErrorKind::InvalidArgument,
            SimError::InvalidParam { .. } => ErrorKind::InvalidIndex,
            SimError::Lifecycle { .. } => ErrorKind::LifecycleViolation,
            SimError::Network(e) => e.kind(),
        }
    }
}

impl From<CouplingError> for SimError {
    fn from(e: CouplingError) -> Self {
        match e {
            CouplingError::InvalidGeometry { what, value } => {
                SimError::Network(NetworkError::InvalidGeometry { what, value })
            }
            CouplingError::InvalidArg { what } => SimError::InvalidArg { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dl_core::{NodeId, OpeningId};

    #[test]
    fn kinds_are_distinguished() {
        let e: SimError = NetworkError::UnknownOpening {
            node: NodeId::from_index(0),
            opening: OpeningId(3),
        }
        .into();
        assert_eq!(e.kind(), ErrorKind::InvalidIndex);

        let e = SimError::Lifecycle {
            operation: "set opening",
            phase: SessionPhase::Running,
        };
        assert_eq!(e.kind(), ErrorKind::LifecycleViolation);
        assert!(e.to_string().contains("running"));

        let e: SimError = NetworkError::OutOfMemory { what: "opening" }.into();
        assert_eq!(e.kind(), ErrorKind::OutOfMemory);
    }

    #[test]
    fn conversions_keep_distinguished_kinds() {
        let network = [
            NetworkError::OutOfMemory { what: "opening" },
            NetworkError::InvalidGeometry {
                what: "width",
                value: -1.0,
            },
            NetworkError::UnknownNode {
                node: NodeId::from_index(9),
            },
        ];
        for err in network {
            let kind = err.kind();
            assert_eq!(SimError::from(err).kind(), kind);
        }

        let coupling = [
            CouplingError::InvalidGeometry {
                what: "area",
                value: 0.0,
            },
            CouplingError::InvalidArg { what: "gravity" },
        ];
        for err in coupling {
            let kind = err.kind();
            assert_eq!(SimError::from(err.clone()).kind(), kind);
            assert_eq!(SimError::from(NetworkError::from(err)).kind(), kind);
        }
    }
}
