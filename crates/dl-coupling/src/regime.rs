//! Coupling regimes and the regime classifier.

use crate::heads::Heads;
use crate::opening::OpeningGeometry;
use core::fmt;

/// Flow-physics classification of an opening for the current step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CouplingRegime {
    /// No coupling: the opening is closed and takes no part in the exchange.
    Closed,
    /// Coupled, but no water moves this step.
    #[default]
    NoCouplingFlow,
    /// Opening submerged on the high side, acting as an orifice.
    Orifice,
    /// Surface water spills over the rim of an unsurcharged node.
    FreeWeir,
    /// Weir flow drowned by a surcharged node.
    SubmergedWeir,
}

impl CouplingRegime {
    pub const ALL: [CouplingRegime; 5] = [
        CouplingRegime::Closed,
        CouplingRegime::NoCouplingFlow,
        CouplingRegime::Orifice,
        CouplingRegime::FreeWeir,
        CouplingRegime::SubmergedWeir,
    ];

    /// Stable integer code used by external callers.
    pub fn code(self) -> u8 {
        match self {
            CouplingRegime::Closed => 0,
            CouplingRegime::NoCouplingFlow => 1,
            CouplingRegime::Orifice => 2,
            CouplingRegime::FreeWeir => 3,
            CouplingRegime::SubmergedWeir => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.code() == code)
    }

    /// True unless the opening is closed.
    pub fn is_coupled(self) -> bool {
        self != CouplingRegime::Closed
    }
}

impl fmt::Display for CouplingRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CouplingRegime::Closed => "closed",
            CouplingRegime::NoCouplingFlow => "no-coupling-flow",
            CouplingRegime::Orifice => "orifice",
            CouplingRegime::FreeWeir => "free-weir",
            CouplingRegime::SubmergedWeir => "submerged-weir",
        };
        f.write_str(s)
    }
}

/// Classify the coupling regime of an opening from relative water elevations.
///
/// Decision order (DOI 10.1016/j.jhydrol.2017.06.024):
/// 1. equal heads → no flow
/// 2. overflow through a surcharged node, or drainage with surface depth at
///    least the weir ratio into a surcharged node → orifice
/// 3. drainage into a surcharged node with shallower surface water → submerged weir
/// 4. drainage into a free node with water above the crest → free weir
/// 5. anything else → no flow
///
/// Never returns [`CouplingRegime::Closed`]; closing is a registry decision.
pub fn classify(heads: Heads, geometry: &OpeningGeometry) -> CouplingRegime {
    let weir_ratio = geometry.weir_ratio();
    let surface_depth = heads.overland - heads.crest;

    let overflow = heads.node > heads.overland;
    let drainage = heads.node < heads.overland;
    let surcharged = heads.node > heads.crest;

    if !overflow && !drainage {
        CouplingRegime::NoCouplingFlow
    } else if (overflow && surcharged) || (drainage && surcharged && surface_depth >= weir_ratio) {
        CouplingRegime::Orifice
    } else if drainage && surcharged && surface_depth < weir_ratio {
        CouplingRegime::SubmergedWeir
    } else if drainage && !surcharged && heads.overland > heads.crest {
        CouplingRegime::FreeWeir
    } else {
        CouplingRegime::NoCouplingFlow
    }
}
