//! Build a coupling network and session from a scenario.

use dl_coupling::OpeningKind;
use dl_network::Network;
use dl_sim::CouplingSession;

use crate::ProjectResult;
use crate::schema::Scenario;

/// Create nodes and openings in scenario order.
///
/// Openings marked `closed` start in the closed regime.
pub fn build_network(scenario: &Scenario) -> ProjectResult<Network> {
    let mut network = Network::new();
    for def in &scenario.nodes {
        let id = network.add_node(def.name.clone(), def.hydraulics())?;
        let openings = network.node_mut(id)?.openings_mut();
        for opening in &def.openings {
            openings.upsert(
                opening.id,
                OpeningKind::from(opening.kind),
                opening.area,
                opening.width,
                opening.coefficients(),
            )?;
            if opening.closed {
                openings.close(opening.id)?;
            }
        }
    }
    Ok(network)
}

/// Open a session over the scenario's network and options.
pub fn open_session(scenario: &Scenario) -> ProjectResult<CouplingSession> {
    let network = build_network(scenario)?;
    let mut session = CouplingSession::new();
    session.open(network, scenario.options.clone())?;
    Ok(session)
}
