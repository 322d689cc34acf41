//! Runtime configuration of the coupling step.

use dl_core::UnitSystem;
use dl_coupling::WeirOrificeLaw;
use serde::{Deserialize, Serialize};

use crate::error::SimResult;

/// Options for coupling runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CouplingOptions {
    /// Unit system of all hydraulic inputs and outputs
    pub units: UnitSystem,
    /// Gravitational acceleration override, in the unit system's length per s²
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravity: Option<f64>,
    /// Evaluate nodes in parallel
    pub parallel: bool,
}

impl Default for CouplingOptions {
    fn default() -> Self {
        Self {
            units: UnitSystem::Si,
            gravity: None,
            parallel: false,
        }
    }
}

impl CouplingOptions {
    /// Effective gravitational acceleration.
    pub fn gravity(&self) -> f64 {
        self.gravity.unwrap_or_else(|| self.units.gravity())
    }

    /// Build the exchange law for these options.
    pub fn law(&self) -> SimResult<WeirOrificeLaw> {
        match self.gravity {
            Some(g) => Ok(WeirOrificeLaw::new(g)?),
            None => Ok(WeirOrificeLaw::for_units(self.units)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coupling_options_defaults() {
        let opts = CouplingOptions::default();
        assert_eq!(opts.units, UnitSystem::Si);
        assert_eq!(opts.gravity, None);
        assert!(!opts.parallel);
        assert!((opts.gravity() - 9.806_65).abs() < 1e-12);
    }

    #[test]
    fn gravity_override_wins() {
        let opts = CouplingOptions {
            units: UnitSystem::Us,
            gravity: Some(32.2),
            parallel: false,
        };
        assert_eq!(opts.gravity(), 32.2);
        assert_eq!(opts.law().unwrap().gravity(), 32.2);
    }

    #[test]
    fn bad_gravity_rejected() {
        let opts = CouplingOptions {
            gravity: Some(0.0),
            ..CouplingOptions::default()
        };
        assert!(opts.law().is_err());
    }
}
