//! Coupled network nodes.

use dl_core::NodeId;
use dl_coupling::Heads;

use crate::openings::OpeningSet;

/// Hydraulic state of a node as read by the coupling step.
///
/// Written between steps by the pipe-network and overland solvers; read once
/// per node per step as an immutable snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeHydraulics {
    /// Invert elevation.
    pub invert_elev: f64,
    /// Crest height above the invert.
    pub full_depth: f64,
    /// Current water depth in the network.
    pub depth: f64,
    /// Current overland water depth above the crest.
    pub overland_depth: f64,
    /// Overland surface area coupled to the node.
    pub coupling_area: f64,
}

impl NodeHydraulics {
    pub fn heads(&self) -> Heads {
        Heads::from_depths(
            self.invert_elev,
            self.full_depth,
            self.depth,
            self.overland_depth,
        )
    }

    pub fn crest_elev(&self) -> f64 {
        self.invert_elev + self.full_depth
    }
}

/// A network node together with the openings that couple it to the surface.
#[derive(Debug, Clone)]
pub struct CouplingNode {
    pub id: NodeId,
    pub name: String,
    pub hydraulics: NodeHydraulics,
    openings: OpeningSet,
    /// Net flow from the surface into the node; output of the last step.
    coupling_inflow: f64,
}

impl CouplingNode {
    pub fn new(id: NodeId, name: impl Into<String>, hydraulics: NodeHydraulics) -> Self {
        Self {
            id,
            name: name.into(),
            hydraulics,
            openings: OpeningSet::new(id),
            coupling_inflow: 0.0,
        }
    }

    pub fn openings(&self) -> &OpeningSet {
        &self.openings
    }

    pub fn openings_mut(&mut self) -> &mut OpeningSet {
        &mut self.openings
    }

    pub fn coupling_inflow(&self) -> f64 {
        self.coupling_inflow
    }

    pub fn set_coupling_inflow(&mut self, q: f64) {
        self.coupling_inflow = q;
    }

    /// True if at least one opening is not closed.
    pub fn is_coupled(&self) -> bool {
        self.openings.is_coupled()
    }
}
