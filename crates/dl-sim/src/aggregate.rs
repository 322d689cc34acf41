//! Net inflow of a node and the cap on draining the overland cell.

use dl_core::{Tolerances, nearly_equal};
use dl_network::OpeningSet;

/// Result of aggregating a node's opening flows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InflowSummary {
    /// Sum of per-opening flows before the cap.
    pub raw_total: f64,
    /// Cap applied to a positive total, if it was binding.
    pub cap: Option<f64>,
    /// Factor every opening flow was multiplied by (1 when unclamped).
    pub scale: f64,
    /// Net coupling inflow reported for the node.
    pub total: f64,
}

impl InflowSummary {
    pub fn clamped(&self) -> bool {
        self.cap.is_some()
    }
}

/// Largest inflow the overland cell can give up within one step.
///
/// Stored volume over the timestep; a negative depth is treated as empty.
pub fn max_inflow(overland_depth: f64, coupling_area: f64, dt: f64) -> f64 {
    (overland_depth * coupling_area / dt).max(0.0)
}

/// Sum of current-step flows of every opening that is not closed.
pub fn sum_inflows(openings: &OpeningSet) -> f64 {
    openings
        .iter()
        .filter(|o| !o.is_closed())
        .map(|o| o.inflow())
        .sum()
}

/// Sum opening flows and scale them down proportionally when the net inflow
/// would drain more water than the overland cell holds.
///
/// Net outflow (total ≤ 0) is never capped here.
pub fn aggregate_and_clamp(
    openings: &mut OpeningSet,
    overland_depth: f64,
    coupling_area: f64,
    dt: f64,
) -> InflowSummary {
    let raw_total = sum_inflows(openings);
    let unclamped = InflowSummary {
        raw_total,
        cap: None,
        scale: 1.0,
        total: raw_total,
    };
    if raw_total <= 0.0 {
        return unclamped;
    }

    let max_allowed = max_inflow(overland_depth, coupling_area, dt).min(raw_total);
    if max_allowed >= raw_total {
        return unclamped;
    }

    let scale = max_allowed / raw_total;
    for opening in openings.iter_mut().filter(|o| !o.is_closed()) {
        opening.scale_inflow(scale);
    }

    // Re-summed rather than assumed equal to the cap
    let total = sum_inflows(openings);
    debug_assert!(nearly_equal(total, max_allowed, Tolerances::default()));
    InflowSummary {
        raw_total,
        cap: Some(max_allowed),
        scale,
        total,
    }
}
