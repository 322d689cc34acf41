//! Water elevations seen by every opening of one node.

/// Hydraulic heads at a node for one timestep.
///
/// All three are elevations in the same datum and length unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Heads {
    /// Rim elevation separating surcharged from free network states.
    pub crest: f64,
    /// Water surface elevation inside the network node.
    pub node: f64,
    /// Water surface elevation of the coupled overland cell.
    pub overland: f64,
}

impl Heads {
    /// Derive heads from node geometry and the two solvers' depths.
    ///
    /// The overland depth is measured from the crest.
    pub fn from_depths(invert_elev: f64, full_depth: f64, depth: f64, overland_depth: f64) -> Self {
        let crest = invert_elev + full_depth;
        Self {
            crest,
            node: invert_elev + depth,
            overland: crest + overland_depth,
        }
    }

    /// Upstream (higher) head.
    pub fn upstream(&self) -> f64 {
        self.overland.max(self.node)
    }

    /// Downstream (lower) head.
    pub fn downstream(&self) -> f64 {
        self.overland.min(self.node)
    }

    /// Head difference driving the exchange, never negative.
    pub fn difference(&self) -> f64 {
        self.upstream() - self.downstream()
    }

    /// Upstream water depth above the crest.
    pub fn upstream_depth(&self) -> f64 {
        self.upstream() - self.crest
    }
}
