// dl-core/src/units.rs

use uom::si::f64::Acceleration as UomAcceleration;

/// Acceleration quantity (SI, f64).
pub type Accel = UomAcceleration;

/// Unit system of the plain `f64` hydraulic values exchanged with the
/// network and overland solvers.
///
/// Elevations, depths and widths are lengths in the system's length unit,
/// areas its square, flows its cube per second. The coupling formulas only
/// depend on the unit system through gravity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UnitSystem {
    /// Metres, square metres, m³/s.
    #[default]
    Si,
    /// Feet, square feet, ft³/s.
    Us,
}

impl UnitSystem {
    /// Gravitational acceleration expressed in this system's length unit per s².
    pub fn gravity(self) -> f64 {
        self.acceleration_value(constants::g0())
    }

    /// Express an acceleration in this system's length unit per s².
    pub fn acceleration_value(self, a: Accel) -> f64 {
        use uom::si::acceleration::{foot_per_second_squared, meter_per_second_squared};
        match self {
            UnitSystem::Si => a.get::<meter_per_second_squared>(),
            UnitSystem::Us => a.get::<foot_per_second_squared>(),
        }
    }

    /// Short label for volumetric flow rates.
    pub fn flow_label(self) -> &'static str {
        match self {
            UnitSystem::Si => "m3/s",
            UnitSystem::Us => "cfs",
        }
    }
}

pub mod constants {
    use super::*;

    pub const G0_MPS2: f64 = 9.806_65;

    #[inline]
    pub fn g0() -> Accel {
        use uom::si::acceleration::meter_per_second_squared;
        Accel::new::<meter_per_second_squared>(G0_MPS2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_per_unit_system() {
        assert!((UnitSystem::Si.gravity() - 9.806_65).abs() < 1e-12);
        assert_eq!(
            UnitSystem::Si.acceleration_value(constants::g0()),
            constants::G0_MPS2
        );
        // 9.80665 / 0.3048
        assert!((UnitSystem::Us.gravity() - 32.174_05).abs() < 1e-4);
    }
}
