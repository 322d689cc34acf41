//! Administrative session: opening configuration and stepping lifecycle.
//!
//! Phases:
//! - `Closed`: nothing loaded; every call is rejected.
//! - `Open`: network loaded; openings may be configured and queried.
//! - `Running`: stepping; openings may be queried but not reconfigured.
//!
//! `start` moves Open → Running, `end` moves Running → Open.

use core::fmt;

use dl_core::{NodeId, OpeningId};
use dl_coupling::{CouplingRegime, OpeningCoefficients, OpeningKind, OpeningParam};
use dl_network::{CouplingNode, Network, NodeHydraulics, Upsert};
use tracing::{info, warn};

use crate::engine::{CouplingEngine, StepReport, commit_step};
use crate::error::{SimError, SimResult};
use crate::options::CouplingOptions;

/// Lifecycle phase of a [`CouplingSession`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    #[default]
    Closed,
    Open,
    Running,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionPhase::Closed => "closed",
            SessionPhase::Open => "open",
            SessionPhase::Running => "running",
        };
        f.write_str(s)
    }
}

/// Owns the network and coupling engine for one simulation.
#[derive(Debug, Default)]
pub struct CouplingSession {
    phase: SessionPhase,
    network: Network,
    options: CouplingOptions,
    engine: Option<CouplingEngine>,
    steps: u64,
    elapsed: f64,
}

impl CouplingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn options(&self) -> &CouplingOptions {
        &self.options
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Number of completed steps since `start`.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated time since `start`.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Load a network and options. Only legal when closed.
    pub fn open(&mut self, network: Network, options: CouplingOptions) -> SimResult<()> {
        self.require("open a session", &[SessionPhase::Closed])?;
        let engine = CouplingEngine::from_options(&options)?;
        info!(
            nodes = network.len(),
            gravity = options.gravity(),
            parallel = options.parallel,
            "coupling session opened"
        );
        self.network = network;
        self.options = options;
        self.engine = Some(engine);
        self.phase = SessionPhase::Open;
        Ok(())
    }

    /// Begin stepping. Configuration is frozen until `end`.
    pub fn start(&mut self) -> SimResult<()> {
        self.require("start stepping", &[SessionPhase::Open])?;
        self.steps = 0;
        self.elapsed = 0.0;
        self.phase = SessionPhase::Running;
        info!("coupling session started");
        Ok(())
    }

    /// Run one coupling step and commit opening history.
    pub fn step(&mut self, dt: f64) -> SimResult<StepReport> {
        self.require("step", &[SessionPhase::Running])?;
        let Some(engine) = self.engine.as_ref() else {
            return Err(SimError::Lifecycle {
                operation: "step",
                phase: self.phase,
            });
        };
        let report = if self.options.parallel {
            engine.execute_parallel(&mut self.network, dt)?
        } else {
            engine.execute(&mut self.network, dt)?
        };
        commit_step(&mut self.network);
        self.steps += 1;
        self.elapsed += dt;
        Ok(report)
    }

    /// Stop stepping; configuration becomes editable again.
    pub fn end(&mut self) -> SimResult<()> {
        self.require("end stepping", &[SessionPhase::Running])?;
        self.phase = SessionPhase::Open;
        info!(steps = self.steps, elapsed = self.elapsed, "coupling session ended");
        Ok(())
    }

    /// Release the network and return to the closed phase.
    pub fn close(&mut self) -> Network {
        self.phase = SessionPhase::Closed;
        self.engine = None;
        std::mem::take(&mut self.network)
    }

    // --- opening configuration (Open only)

    /// Create or overwrite an opening.
    pub fn set_opening(
        &mut self,
        node: NodeId,
        id: OpeningId,
        kind: OpeningKind,
        area: f64,
        width: f64,
        coefficients: OpeningCoefficients,
    ) -> SimResult<Upsert> {
        let node = self.configurable_node("set opening", node)?;
        Ok(node
            .openings_mut()
            .upsert(id, kind, area, width, coefficients)?)
    }

    pub fn delete_opening(&mut self, node: NodeId, id: OpeningId) -> SimResult<()> {
        let node = self.configurable_node("delete opening", node)?;
        node.openings_mut().remove(id)?;
        Ok(())
    }

    /// Delete every opening of a node. Not an error when there are none.
    pub fn delete_all_openings(&mut self, node: NodeId) -> SimResult<()> {
        let node = self.configurable_node("delete openings", node)?;
        node.openings_mut().clear();
        Ok(())
    }

    pub fn open_opening(&mut self, node: NodeId, id: OpeningId) -> SimResult<()> {
        let node = self.configurable_node("open opening", node)?;
        Ok(node.openings_mut().open(id)?)
    }

    pub fn close_opening(&mut self, node: NodeId, id: OpeningId) -> SimResult<()> {
        let node = self.configurable_node("close opening", node)?;
        Ok(node.openings_mut().close(id)?)
    }

    // --- queries (Open or Running)

    pub fn count_openings(&self, node: NodeId) -> SimResult<usize> {
        Ok(self.readable_node("count openings", node)?.openings().len())
    }

    pub fn opening_ids(&self, node: NodeId) -> SimResult<Vec<OpeningId>> {
        Ok(self.readable_node("list openings", node)?.openings().ids())
    }

    pub fn opening_kind(&self, node: NodeId, id: OpeningId) -> SimResult<OpeningKind> {
        let node = self.readable_node("get opening type", node)?;
        Ok(node.openings().get(id)?.kind)
    }

    pub fn opening_coupling_type(&self, node: NodeId, id: OpeningId) -> SimResult<CouplingRegime> {
        let node = self.readable_node("get coupling type", node)?;
        Ok(node.openings().get(id)?.regime())
    }

    /// Current-step flow of an opening; positive into the node.
    pub fn opening_flow(&self, node: NodeId, id: OpeningId) -> SimResult<f64> {
        let node = self.readable_node("get opening flow", node)?;
        Ok(node.openings().get(id)?.inflow())
    }

    pub fn opening_param(&self, node: NodeId, id: OpeningId, param: OpeningParam) -> SimResult<f64> {
        let node = self.readable_node("get opening parameter", node)?;
        Ok(node.openings().get(id)?.param(param))
    }

    /// Like [`CouplingSession::opening_param`] with an integer parameter key.
    pub fn opening_param_by_key(&self, node: NodeId, id: OpeningId, key: u32) -> SimResult<f64> {
        let node = self.readable_node("get opening parameter", node)?;
        let opening = node.openings().get(id)?;
        let param = OpeningParam::from_key(key).ok_or(SimError::InvalidParam { key })?;
        Ok(opening.param(param))
    }

    pub fn is_node_coupled(&self, node: NodeId) -> SimResult<bool> {
        Ok(self.readable_node("get coupling status", node)?.is_coupled())
    }

    pub fn node_coupling_inflow(&self, node: NodeId) -> SimResult<f64> {
        Ok(self.readable_node("get coupling inflow", node)?.coupling_inflow())
    }

    // --- hydraulic inputs written by the surrounding solvers (Open or Running)

    pub fn set_overland_state(
        &mut self,
        node: NodeId,
        overland_depth: f64,
        coupling_area: f64,
    ) -> SimResult<()> {
        let node = self.writable_node("set overland state", node)?;
        node.hydraulics.overland_depth = overland_depth;
        node.hydraulics.coupling_area = coupling_area;
        Ok(())
    }

    pub fn set_node_hydraulics(&mut self, node: NodeId, hydraulics: NodeHydraulics) -> SimResult<()> {
        self.writable_node("set node hydraulics", node)?.hydraulics = hydraulics;
        Ok(())
    }

    // --- phase checks

    fn require(&self, operation: &'static str, allowed: &[SessionPhase]) -> SimResult<()> {
        if allowed.contains(&self.phase) {
            return Ok(());
        }
        warn!(operation, phase = %self.phase, "rejected by session lifecycle");
        Err(SimError::Lifecycle {
            operation,
            phase: self.phase,
        })
    }

    fn configurable_node(&mut self, op: &'static str, node: NodeId) -> SimResult<&mut CouplingNode> {
        self.require(op, &[SessionPhase::Open])?;
        Ok(self.network.node_mut(node)?)
    }

    fn writable_node(&mut self, op: &'static str, node: NodeId) -> SimResult<&mut CouplingNode> {
        self.require(op, &[SessionPhase::Open, SessionPhase::Running])?;
        Ok(self.network.node_mut(node)?)
    }

    fn readable_node(&self, op: &'static str, node: NodeId) -> SimResult<&CouplingNode> {
        self.require(op, &[SessionPhase::Open, SessionPhase::Running])?;
        Ok(self.network.node(node)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dl_core::ErrorKind;

    fn coeffs() -> OpeningCoefficients {
        OpeningCoefficients {
            orifice: 0.167,
            free_weir: 0.54,
            submerged_weir: 0.056,
        }
    }

    fn opened() -> (CouplingSession, NodeId) {
        let mut net = Network::new();
        let j = net.add_node("J1", NodeHydraulics::default()).unwrap();
        let mut session = CouplingSession::new();
        session.open(net, CouplingOptions::default()).unwrap();
        (session, j)
    }

    #[test]
    fn closed_session_rejects_everything() {
        let mut s = CouplingSession::new();
        let j = NodeId::from_index(0);
        let kind = |r: SimResult<()>| r.unwrap_err().kind();

        assert_eq!(
            s.set_opening(j, OpeningId(0), OpeningKind::Grate, 0.0, 0.0, coeffs())
                .unwrap_err()
                .kind(),
            ErrorKind::LifecycleViolation
        );
        assert_eq!(kind(s.delete_opening(j, OpeningId(0))), ErrorKind::LifecycleViolation);
        assert_eq!(kind(s.delete_all_openings(j)), ErrorKind::LifecycleViolation);
        assert_eq!(kind(s.open_opening(j, OpeningId(0))), ErrorKind::LifecycleViolation);
        assert_eq!(kind(s.close_opening(j, OpeningId(0))), ErrorKind::LifecycleViolation);
        assert_eq!(
            s.count_openings(j).unwrap_err().kind(),
            ErrorKind::LifecycleViolation
        );
        assert_eq!(
            s.opening_flow(j, OpeningId(0)).unwrap_err().kind(),
            ErrorKind::LifecycleViolation
        );
        assert_eq!(
            s.is_node_coupled(j).unwrap_err().kind(),
            ErrorKind::LifecycleViolation
        );
        assert!(s.start().is_err());
        assert!(s.step(1.0).is_err());
    }

    #[test]
    fn running_session_freezes_configuration() {
        let (mut s, j) = opened();
        s.set_opening(j, OpeningId(1), OpeningKind::Grate, 1.0, 1.0, coeffs())
            .unwrap();
        s.start().unwrap();

        let err = s
            .set_opening(j, OpeningId(1), OpeningKind::Grate, 0.0, 0.0, coeffs())
            .unwrap_err();
        assert!(matches!(
            err,
            SimError::Lifecycle {
                phase: SessionPhase::Running,
                ..
            }
        ));
        assert!(s.close_opening(j, OpeningId(1)).is_err());
        assert!(s.delete_all_openings(j).is_err());

        // queries and solver inputs stay available
        assert_eq!(s.count_openings(j).unwrap(), 1);
        s.set_overland_state(j, 0.1, 50.0).unwrap();

        s.end().unwrap();
        s.close_opening(j, OpeningId(1)).unwrap();
    }

    #[test]
    fn unknown_ids_are_invalid_index() {
        let (mut s, j) = opened();
        let bogus = NodeId::from_index(100);
        assert_eq!(
            s.set_opening(bogus, OpeningId(0), OpeningKind::Grate, 1.0, 1.0, coeffs())
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidIndex
        );
        assert_eq!(
            s.count_openings(bogus).unwrap_err().kind(),
            ErrorKind::InvalidIndex
        );
        assert_eq!(
            s.delete_all_openings(bogus).unwrap_err().kind(),
            ErrorKind::InvalidIndex
        );
        assert_eq!(
            s.opening_kind(j, OpeningId(100)).unwrap_err().kind(),
            ErrorKind::InvalidIndex
        );

        s.set_opening(j, OpeningId(0), OpeningKind::Grate, 1.0, 2.0, coeffs())
            .unwrap();
        assert_eq!(
            s.opening_param_by_key(j, OpeningId(0), 100).unwrap_err(),
            SimError::InvalidParam { key: 100 }
        );
        assert_eq!(s.opening_param_by_key(j, OpeningId(0), 1).unwrap(), 2.0);
    }

    #[test]
    fn bad_geometry_is_reported() {
        let (mut s, j) = opened();
        let err = s
            .set_opening(j, OpeningId(0), OpeningKind::Grate, 0.0, 0.0, coeffs())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidGeometry);
        assert_eq!(s.count_openings(j).unwrap(), 0);
    }

    #[test]
    fn close_returns_network() {
        let (mut s, _) = opened();
        let net = s.close();
        assert_eq!(net.len(), 1);
        assert_eq!(s.phase(), SessionPhase::Closed);
        assert!(s.network().is_empty());
    }
}
