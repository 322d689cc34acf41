//! Node table of a coupled drainage network.

use dl_core::NodeId;

use crate::error::{NetworkError, NetworkResult};
use crate::node::{CouplingNode, NodeHydraulics};

/// All coupling nodes, addressed by [`NodeId`].
///
/// Node ids are assigned contiguously by [`Network::add_node`], so the id
/// index is also the storage offset.
#[derive(Debug, Clone, Default)]
pub struct Network {
    nodes: Vec<CouplingNode>,
}

impl Network {
    /// Create a new empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its ID.
    ///
    /// Fails with `OutOfMemory` once the id space or storage is exhausted.
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        hydraulics: NodeHydraulics,
    ) -> NetworkResult<NodeId> {
        let id = next_node_id(self.nodes.len())?;
        self.nodes
            .try_reserve(1)
            .map_err(|_| NetworkError::OutOfMemory { what: "node" })?;
        self.nodes.push(CouplingNode::new(id, name, hydraulics));
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> NetworkResult<&CouplingNode> {
        self.nodes
            .get(id.index() as usize)
            .ok_or(NetworkError::UnknownNode { node: id })
    }

    pub fn node_mut(&mut self, id: NodeId) -> NetworkResult<&mut CouplingNode> {
        self.nodes
            .get_mut(id.index() as usize)
            .ok_or(NetworkError::UnknownNode { node: id })
    }

    /// Look up a node id by name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.name == name).map(|n| n.id)
    }

    /// Return all nodes.
    pub fn nodes(&self) -> &[CouplingNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [CouplingNode] {
        &mut self.nodes
    }

    /// Drop every opening of every node.
    pub fn clear_openings(&mut self) {
        for node in &mut self.nodes {
            node.openings_mut().clear();
        }
    }
}

fn next_node_id(len: usize) -> NetworkResult<NodeId> {
    NodeId::checked_from_index(len).ok_or(NetworkError::OutOfMemory { what: "node id" })
}
