#[cfg(test)]
mod unit_test;
use crate::graph::{EdgeId, NodeId};
use std::collections::HashMap;

/// Hands out a stable dense integer id for every ordered vertex pair ever
/// seen, with reverse lookup, so that per-edge scores and marks can live in
/// plain vectors. The two 32-bit endpoints are combined into one 64-bit
/// hash key.
/// # Examples
/// ```
/// use edge_hierarchies::data_structure::EdgeIdMap;
/// let mut ids = EdgeIdMap::new();
/// let first = ids.edge_id(3, 7);
/// let second = ids.edge_id(7, 3);
/// assert_ne!(first, second);
/// assert_eq!(ids.edge_id(3, 7), first);
/// assert_eq!(ids.edge(first), (3, 7));
/// ```
#[derive(Debug, Default, Clone)]
pub struct EdgeIdMap {
    ids: HashMap<u64, EdgeId>,
    edges: Vec<(NodeId, NodeId)>,
}

impl EdgeIdMap {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            edges: Vec::new(),
        }
    }

    /// Gives the number of distinct pairs seen so far.
    pub fn nb_edges(&self) -> usize {
        self.edges.len()
    }

    /// Gives the id of the pair `(u, v)`, allocating the next dense id the
    /// first time the pair is seen.
    pub fn edge_id(&mut self, u: NodeId, v: NodeId) -> EdgeId {
        let key = ((u as u64) << 32) | v as u64;
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }
        let id = self.edges.len() as EdgeId;
        self.ids.insert(key, id);
        self.edges.push((u, v));
        id
    }

    /// Gives the pair behind an id.
    /// # Panics
    /// It panics when the id was never handed out.
    pub fn edge(&self, id: EdgeId) -> (NodeId, NodeId) {
        self.edges[id as usize]
    }
}
