//! Opening records: geometry, calibration and per-step coupling state.

use crate::common::check_positive;
use crate::error::CouplingResult;
use crate::guard::{Guarded, damp_reversal};
use crate::heads::Heads;
use crate::regime::CouplingRegime;
use crate::traits::ExchangeLaw;
use dl_core::OpeningId;

/// Validated opening geometry.
///
/// Area and width are strictly positive, so the weir ratio is always defined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpeningGeometry {
    area: f64,
    width: f64,
}

impl OpeningGeometry {
    pub fn new(area: f64, width: f64) -> CouplingResult<Self> {
        Ok(Self {
            area: check_positive(area, "area")?,
            width: check_positive(width, "width")?,
        })
    }

    /// Flow area of the opening.
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Weir length (perimeter) of the opening.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Depth threshold separating weir-like from orifice-like drainage.
    pub fn weir_ratio(&self) -> f64 {
        self.area / self.width
    }
}

/// Calibration coefficients of an opening (dimensionless).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpeningCoefficients {
    pub orifice: f64,
    pub free_weir: f64,
    pub submerged_weir: f64,
}

/// Informational shape tag. Does not enter any formula.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OpeningKind {
    #[default]
    Grate,
    CurbInlet,
    Combination,
    Manhole,
    /// Caller-defined tag outside the named set.
    Other(u32),
}

impl OpeningKind {
    pub fn code(self) -> u32 {
        match self {
            OpeningKind::Grate => 0,
            OpeningKind::CurbInlet => 1,
            OpeningKind::Combination => 2,
            OpeningKind::Manhole => 3,
            OpeningKind::Other(c) => c,
        }
    }

    pub fn from_code(code: u32) -> Self {
        match code {
            0 => OpeningKind::Grate,
            1 => OpeningKind::CurbInlet,
            2 => OpeningKind::Combination,
            3 => OpeningKind::Manhole,
            c => OpeningKind::Other(c),
        }
    }
}

/// Readable opening parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpeningParam {
    Area,
    Width,
    OrificeCoeff,
    FreeWeirCoeff,
    SubmergedWeirCoeff,
}

impl OpeningParam {
    pub fn from_key(key: u32) -> Option<Self> {
        match key {
            0 => Some(OpeningParam::Area),
            1 => Some(OpeningParam::Width),
            2 => Some(OpeningParam::OrificeCoeff),
            3 => Some(OpeningParam::FreeWeirCoeff),
            4 => Some(OpeningParam::SubmergedWeirCoeff),
            _ => None,
        }
    }
}

/// One surface-to-node connection.
///
/// Owned by exactly one node. `inflow` is the current-step flow,
/// `previous_inflow` the flow committed at the end of the last step.
#[derive(Clone, Debug, PartialEq)]
pub struct Opening {
    pub id: OpeningId,
    pub kind: OpeningKind,
    geometry: OpeningGeometry,
    coefficients: OpeningCoefficients,
    regime: CouplingRegime,
    previous_inflow: f64,
    inflow: f64,
}

impl Opening {
    /// Create an opening in the no-flow regime with zeroed history.
    pub fn new(
        id: OpeningId,
        kind: OpeningKind,
        geometry: OpeningGeometry,
        coefficients: OpeningCoefficients,
    ) -> Self {
        Self {
            id,
            kind,
            geometry,
            coefficients,
            regime: CouplingRegime::NoCouplingFlow,
            previous_inflow: 0.0,
            inflow: 0.0,
        }
    }

    /// Overwrite configuration and reset the coupling state, as on creation.
    pub fn reconfigure(
        &mut self,
        kind: OpeningKind,
        geometry: OpeningGeometry,
        coefficients: OpeningCoefficients,
    ) {
        *self = Self::new(self.id, kind, geometry, coefficients);
    }

    pub fn geometry(&self) -> &OpeningGeometry {
        &self.geometry
    }

    pub fn coefficients(&self) -> &OpeningCoefficients {
        &self.coefficients
    }

    pub fn regime(&self) -> CouplingRegime {
        self.regime
    }

    pub fn inflow(&self) -> f64 {
        self.inflow
    }

    pub fn previous_inflow(&self) -> f64 {
        self.previous_inflow
    }

    pub fn is_closed(&self) -> bool {
        self.regime == CouplingRegime::Closed
    }

    /// Exclude the opening from the exchange until reopened.
    ///
    /// A closed opening carries no water, so its current flow is zeroed.
    pub fn close(&mut self) {
        self.regime = CouplingRegime::Closed;
        self.inflow = 0.0;
    }

    /// Return the opening to the exchange; it is reclassified next step.
    pub fn open(&mut self) {
        self.regime = CouplingRegime::NoCouplingFlow;
    }

    /// Read one configuration parameter.
    pub fn param(&self, param: OpeningParam) -> f64 {
        match param {
            OpeningParam::Area => self.geometry.area(),
            OpeningParam::Width => self.geometry.width(),
            OpeningParam::OrificeCoeff => self.coefficients.orifice,
            OpeningParam::FreeWeirCoeff => self.coefficients.free_weir,
            OpeningParam::SubmergedWeirCoeff => self.coefficients.submerged_weir,
        }
    }

    /// Classify, compute flow and apply the oscillation guard for this step.
    ///
    /// Closed openings are left untouched and yield `None`.
    pub fn evaluate(&mut self, law: &dyn ExchangeLaw, heads: Heads) -> Option<Guarded> {
        if self.is_closed() {
            return None;
        }
        let regime = law.classify(heads, &self.geometry);
        let flow = law.flow(regime, heads, &self.geometry, &self.coefficients);
        let guarded = damp_reversal(self.previous_inflow, regime, flow);
        self.regime = guarded.regime;
        self.inflow = guarded.flow;
        Some(guarded)
    }

    /// Multiply the current-step flow by `factor`.
    pub fn scale_inflow(&mut self, factor: f64) {
        self.inflow *= factor;
    }

    /// Commit the current-step flow as history for the next step's guard.
    pub fn commit(&mut self) {
        self.previous_inflow = self.inflow;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::law::WeirOrificeLaw;

    fn opening() -> Opening {
        Opening::new(
            OpeningId(4),
            OpeningKind::Grate,
            OpeningGeometry::new(10.0, 5.0).unwrap(),
            OpeningCoefficients {
                orifice: 0.167,
                free_weir: 0.54,
                submerged_weir: 0.056,
            },
        )
    }

    #[test]
    fn geometry_rejects_non_positive() {
        assert!(OpeningGeometry::new(0.0, 1.0).is_err());
        assert!(OpeningGeometry::new(1.0, -1.0).is_err());
        assert!(OpeningGeometry::new(1.0, f64::NAN).is_err());
        assert_eq!(OpeningGeometry::new(10.0, 4.0).unwrap().weir_ratio(), 2.5);
    }

    #[test]
    fn evaluate_then_commit() {
        let law = WeirOrificeLaw::new(9.81).unwrap();
        let mut o = opening();
        let heads = Heads {
            crest: 2.0,
            node: 1.0,
            overland: 3.0,
        };
        let g = o.evaluate(&law, heads).unwrap();
        assert_eq!(g.regime, CouplingRegime::FreeWeir);
        assert!(o.inflow() > 0.0);
        assert_eq!(o.previous_inflow(), 0.0);

        o.commit();
        assert_eq!(o.previous_inflow(), o.inflow());
    }

    #[test]
    fn reversal_after_commit_is_damped() {
        let law = WeirOrificeLaw::new(9.81).unwrap();
        let mut o = opening();
        o.evaluate(
            &law,
            Heads {
                crest: 2.0,
                node: 1.0,
                overland: 3.0,
            },
        );
        o.commit();

        let g = o
            .evaluate(
                &law,
                Heads {
                    crest: 2.0,
                    node: 3.0,
                    overland: 2.0,
                },
            )
            .unwrap();
        assert!(g.damped);
        assert_eq!(o.regime(), CouplingRegime::NoCouplingFlow);
        assert_eq!(o.inflow(), 0.0);
    }

    #[test]
    fn closed_opening_is_not_evaluated() {
        let law = WeirOrificeLaw::new(9.81).unwrap();
        let mut o = opening();
        o.close();
        let heads = Heads {
            crest: 2.0,
            node: 1.0,
            overland: 3.0,
        };
        assert!(o.evaluate(&law, heads).is_none());
        assert_eq!(o.regime(), CouplingRegime::Closed);

        o.open();
        assert_eq!(o.regime(), CouplingRegime::NoCouplingFlow);
        assert!(o.evaluate(&law, heads).is_some());
    }

    #[test]
    fn reconfigure_resets_state() {
        let law = WeirOrificeLaw::new(9.81).unwrap();
        let mut o = opening();
        o.evaluate(
            &law,
            Heads {
                crest: 2.0,
                node: 1.0,
                overland: 3.0,
            },
        );
        o.commit();
        o.reconfigure(
            OpeningKind::Manhole,
            OpeningGeometry::new(25.0, 1.0).unwrap(),
            *o.coefficients(),
        );
        assert_eq!(o.id, OpeningId(4));
        assert_eq!(o.kind, OpeningKind::Manhole);
        assert_eq!(o.regime(), CouplingRegime::NoCouplingFlow);
        assert_eq!(o.inflow(), 0.0);
        assert_eq!(o.previous_inflow(), 0.0);
        assert_eq!(o.param(OpeningParam::Area), 25.0);
    }

    #[test]
    fn kind_codes() {
        assert_eq!(OpeningKind::from_code(3), OpeningKind::Manhole);
        assert_eq!(OpeningKind::from_code(17), OpeningKind::Other(17));
        assert_eq!(OpeningKind::Other(17).code(), 17);
    }
}
