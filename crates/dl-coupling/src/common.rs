//! Common utilities for coupling calculations.

use crate::error::{CouplingError, CouplingResult};

/// Ensure a value is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> CouplingResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CouplingError::InvalidGeometry { what, value })
    }
}

/// Apply the coupling sign convention to a flow magnitude.
///
/// Positive when the overland head is above the node head (surface → network),
/// negative otherwise. A zero magnitude always yields `+0.0`.
pub fn toward_node(magnitude: f64, node_head: f64, overland_head: f64) -> f64 {
    let magnitude = magnitude.abs();
    if magnitude == 0.0 {
        0.0
    } else if overland_head > node_head {
        magnitude
    } else {
        -magnitude
    }
}
