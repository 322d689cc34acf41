//! Damping of flow-direction chatter between consecutive steps.
//!
//! Near-equal heads make the classifier alternate between drainage and
//! overflow every step under explicit time stepping. A reversal forces one
//! dead step; the opening is evaluated normally again on the next one.

use crate::regime::CouplingRegime;
use dl_core::numeric::strict_sign;

/// True if `previous` and `current` are both nonzero with opposite signs.
pub fn is_direction_flip(previous: f64, current: f64) -> bool {
    matches!(
        (strict_sign(previous), strict_sign(current)),
        (Some(a), Some(b)) if a != b
    )
}

/// Regime and flow of an opening after the oscillation guard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Guarded {
    pub regime: CouplingRegime,
    pub flow: f64,
    /// Set when the guard overrode the raw evaluation.
    pub damped: bool,
}

/// Apply the guard to a freshly computed regime and flow.
pub fn damp_reversal(previous: f64, regime: CouplingRegime, flow: f64) -> Guarded {
    if is_direction_flip(previous, flow) {
        Guarded {
            regime: CouplingRegime::NoCouplingFlow,
            flow: 0.0,
            damped: true,
        }
    } else {
        Guarded {
            regime,
            flow,
            damped: false,
        }
    }
}
