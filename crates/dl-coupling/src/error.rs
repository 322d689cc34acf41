//! Error types for opening construction.

use dl_core::error::ErrorKind;
use thiserror::Error;

/// Errors raised while building opening records.
///
/// The per-step physics never fails; everything here is rejected once, when an
/// opening is configured.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CouplingError {
    #[error("Invalid opening geometry: {what} = {value} (must be positive and finite)")]
    InvalidGeometry { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type CouplingResult<T> = Result<T, CouplingError>;

impl CouplingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CouplingError::InvalidGeometry { .. } => ErrorKind::InvalidGeometry,
            CouplingError::InvalidArg { .. } => ErrorKind::InvalidArgument,
        }
    }
}
