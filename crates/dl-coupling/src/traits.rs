//! Core traits for exchange laws.

use crate::heads::Heads;
use crate::opening::{OpeningCoefficients, OpeningGeometry};
use crate::regime::CouplingRegime;

/// Trait for the physics that turns heads into a regime and a flow.
///
/// Laws are deterministic functions of heads and opening parameters, suitable
/// for parallel evaluation across nodes.
pub trait ExchangeLaw: Send + Sync {
    /// Law name for debugging and identification.
    fn name(&self) -> &str;

    /// Classify the regime of an opening.
    fn classify(&self, heads: Heads, geometry: &OpeningGeometry) -> CouplingRegime;

    /// Signed flow for a regime. Positive means surface → network.
    ///
    /// Must return a finite value for every regime, returning 0 for regimes
    /// that carry no flow.
    fn flow(
        &self,
        regime: CouplingRegime,
        heads: Heads,
        geometry: &OpeningGeometry,
        coeffs: &OpeningCoefficients,
    ) -> f64;
}
