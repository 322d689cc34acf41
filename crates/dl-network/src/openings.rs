//! Per-node opening registry.
//!
//! Openings live in a growable vector in insertion order; a map from the
//! caller-assigned id to the vector slot gives O(1) lookup without relying on
//! ids being dense.

use std::collections::HashMap;

use dl_core::{NodeId, OpeningId};
use dl_coupling::{Opening, OpeningCoefficients, OpeningGeometry, OpeningKind};

use crate::error::{NetworkError, NetworkResult};

/// Outcome of [`OpeningSet::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Updated,
}

/// Openings of a single node.
#[derive(Debug, Clone)]
pub struct OpeningSet {
    /// Owning node, for error reporting.
    node: NodeId,
    openings: Vec<Opening>,
    slots: HashMap<OpeningId, usize>,
}

impl OpeningSet {
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            openings: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Create the opening if absent, otherwise overwrite its configuration.
    ///
    /// Either way the opening ends in the no-flow regime with zeroed history.
    /// Geometry is validated here and nowhere else.
    pub fn upsert(
        &mut self,
        id: OpeningId,
        kind: OpeningKind,
        area: f64,
        width: f64,
        coefficients: OpeningCoefficients,
    ) -> NetworkResult<Upsert> {
        let geometry = OpeningGeometry::new(area, width)?;

        if let Some(&slot) = self.slots.get(&id) {
            self.openings[slot].reconfigure(kind, geometry, coefficients);
            return Ok(Upsert::Updated);
        }

        self.openings
            .try_reserve(1)
            .map_err(|_| NetworkError::OutOfMemory { what: "opening" })?;
        self.slots
            .try_reserve(1)
            .map_err(|_| NetworkError::OutOfMemory { what: "opening index" })?;

        self.slots.insert(id, self.openings.len());
        self.openings.push(Opening::new(id, kind, geometry, coefficients));
        Ok(Upsert::Created)
    }

    /// Force the opening into the closed regime.
    pub fn close(&mut self, id: OpeningId) -> NetworkResult<()> {
        self.get_mut(id)?.close();
        Ok(())
    }

    /// Return a closed opening to the no-flow regime.
    pub fn open(&mut self, id: OpeningId) -> NetworkResult<()> {
        self.get_mut(id)?.open();
        Ok(())
    }

    /// Delete one opening.
    pub fn remove(&mut self, id: OpeningId) -> NetworkResult<Opening> {
        let slot = self.slots.remove(&id).ok_or(NetworkError::UnknownOpening {
            node: self.node,
            opening: id,
        })?;
        let removed = self.openings.remove(slot);
        for s in self.slots.values_mut() {
            if *s > slot {
                *s -= 1;
            }
        }
        Ok(removed)
    }

    /// Delete every opening. Safe on an empty set.
    pub fn clear(&mut self) {
        self.openings.clear();
        self.slots.clear();
    }

    /// Total number of openings, closed ones included.
    pub fn len(&self) -> usize {
        self.openings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.openings.is_empty()
    }

    pub fn contains(&self, id: OpeningId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn get(&self, id: OpeningId) -> NetworkResult<&Opening> {
        match self.slots.get(&id) {
            Some(&slot) => Ok(&self.openings[slot]),
            None => Err(NetworkError::UnknownOpening {
                node: self.node,
                opening: id,
            }),
        }
    }

    pub fn get_mut(&mut self, id: OpeningId) -> NetworkResult<&mut Opening> {
        match self.slots.get(&id) {
            Some(&slot) => Ok(&mut self.openings[slot]),
            None => Err(NetworkError::UnknownOpening {
                node: self.node,
                opening: id,
            }),
        }
    }

    /// Opening ids in insertion order.
    pub fn ids(&self) -> Vec<OpeningId> {
        self.openings.iter().map(|o| o.id).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Opening> {
        self.openings.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Opening> {
        self.openings.iter_mut()
    }

    /// True if at least one opening is not closed.
    pub fn is_coupled(&self) -> bool {
        self.openings.iter().any(|o| !o.is_closed())
    }

    /// Copy every opening's current-step flow into its history.
    pub fn commit_step(&mut self) {
        for opening in &mut self.openings {
            opening.commit();
        }
    }
}

impl<'a> IntoIterator for &'a OpeningSet {
    type Item = &'a Opening;
    type IntoIter = std::slice::Iter<'a, Opening>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
