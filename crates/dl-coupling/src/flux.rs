//! Flow through an opening for a given regime.

use crate::common::toward_node;
use crate::heads::Heads;
use crate::opening::{OpeningCoefficients, OpeningGeometry};
use crate::regime::CouplingRegime;

/// Compute the signed coupling flow of an opening.
///
/// Each regime formula yields a magnitude only; the sign is applied afterwards:
/// positive when the overland head is above the node head (flow into the node).
///
/// - orifice: `Co · A · √(2g·Δh)`
/// - free weir: `(2/3) · Cfw · L · h_up^1.5 · √(2g)`
/// - submerged weir: `Csw · L · h_up · √(2g·Δh)`
///
/// `Δh` is the head difference and `h_up` the upstream depth above the crest.
/// Non-finite intermediate results collapse to zero flow.
pub fn coupling_flow(
    regime: CouplingRegime,
    heads: Heads,
    geometry: &OpeningGeometry,
    coeffs: &OpeningCoefficients,
    gravity: f64,
) -> f64 {
    let head_diff = heads.difference();
    let depth_up = heads.upstream_depth().max(0.0);
    let two_g = 2.0 * gravity;

    let magnitude = match regime {
        CouplingRegime::Orifice => coeffs.orifice * geometry.area() * (two_g * head_diff).sqrt(),
        CouplingRegime::FreeWeir => {
            (2.0 / 3.0) * coeffs.free_weir * geometry.width() * depth_up.powf(1.5) * two_g.sqrt()
        }
        CouplingRegime::SubmergedWeir => {
            coeffs.submerged_weir * geometry.width() * depth_up * (two_g * head_diff).sqrt()
        }
        CouplingRegime::Closed | CouplingRegime::NoCouplingFlow => 0.0,
    };

    if !magnitude.is_finite() {
        return 0.0;
    }
    toward_node(magnitude, heads.node, heads.overland)
}
