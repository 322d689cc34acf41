//! Scenario schema definitions.

use dl_core::OpeningId;
use dl_coupling::{OpeningCoefficients, OpeningKind};
use dl_network::NodeHydraulics;
use dl_sim::CouplingOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub options: CouplingOptions,
    /// Step length for command-line runs
    #[serde(default = "default_timestep")]
    pub timestep: f64,
    /// Number of steps for command-line runs
    #[serde(default = "default_steps")]
    pub steps: u32,
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
}

fn default_timestep() -> f64 {
    1.0
}

fn default_steps() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    pub name: String,
    pub invert_elev: f64,
    pub full_depth: f64,
    #[serde(default)]
    pub depth: f64,
    #[serde(default)]
    pub overland_depth: f64,
    #[serde(default)]
    pub coupling_area: f64,
    #[serde(default)]
    pub openings: Vec<OpeningDef>,
}

impl NodeDef {
    pub fn hydraulics(&self) -> NodeHydraulics {
        NodeHydraulics {
            invert_elev: self.invert_elev,
            full_depth: self.full_depth,
            depth: self.depth,
            overland_depth: self.overland_depth,
            coupling_area: self.coupling_area,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpeningDef {
    pub id: OpeningId,
    #[serde(default)]
    pub kind: OpeningKindDef,
    pub area: f64,
    pub width: f64,
    pub orifice_coeff: f64,
    pub free_weir_coeff: f64,
    pub submerged_weir_coeff: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub closed: bool,
}

impl OpeningDef {
    pub fn coefficients(&self) -> OpeningCoefficients {
        OpeningCoefficients {
            orifice: self.orifice_coeff,
            free_weir: self.free_weir_coeff,
            submerged_weir: self.submerged_weir_coeff,
        }
    }
}

/// Opening kind, written either by name or by numeric tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OpeningKindDef {
    Named(NamedKind),
    Code(u32),
}

impl Default for OpeningKindDef {
    fn default() -> Self {
        OpeningKindDef::Named(NamedKind::Grate)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NamedKind {
    Grate,
    CurbInlet,
    Combination,
    Manhole,
}

impl From<OpeningKindDef> for OpeningKind {
    fn from(def: OpeningKindDef) -> Self {
        match def {
            OpeningKindDef::Named(NamedKind::Grate) => OpeningKind::Grate,
            OpeningKindDef::Named(NamedKind::CurbInlet) => OpeningKind::CurbInlet,
            OpeningKindDef::Named(NamedKind::Combination) => OpeningKind::Combination,
            OpeningKindDef::Named(NamedKind::Manhole) => OpeningKind::Manhole,
            OpeningKindDef::Code(code) => OpeningKind::from_code(code),
        }
    }
}
