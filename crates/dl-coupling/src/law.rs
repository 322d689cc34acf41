//! Standard weir/orifice exchange law.

use crate::common::check_positive;
use crate::error::{CouplingError, CouplingResult};
use crate::flux::coupling_flow;
use crate::heads::Heads;
use crate::opening::{OpeningCoefficients, OpeningGeometry};
use crate::regime::{CouplingRegime, classify};
use crate::traits::ExchangeLaw;
use dl_core::UnitSystem;

/// Orifice, free-weir and submerged-weir exchange at a gravity chosen at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeirOrificeLaw {
    gravity: f64,
}

impl WeirOrificeLaw {
    /// Create a law for an explicit gravitational acceleration.
    pub fn new(gravity: f64) -> CouplingResult<Self> {
        let gravity = check_positive(gravity, "gravity")
            .map_err(|_| CouplingError::InvalidArg {
                what: "gravity must be positive and finite",
            })?;
        Ok(Self { gravity })
    }

    /// Create a law using standard gravity in the given unit system.
    pub fn for_units(units: UnitSystem) -> Self {
        Self {
            gravity: units.gravity(),
        }
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }
}

impl ExchangeLaw for WeirOrificeLaw {
    fn name(&self) -> &str {
        "weir-orifice"
    }

    fn classify(&self, heads: Heads, geometry: &OpeningGeometry) -> CouplingRegime {
        classify(heads, geometry)
    }

    fn flow(
        &self,
        regime: CouplingRegime,
        heads: Heads,
        geometry: &OpeningGeometry,
        coeffs: &OpeningCoefficients,
    ) -> f64 {
        coupling_flow(regime, heads, geometry, coeffs, self.gravity)
    }
}
