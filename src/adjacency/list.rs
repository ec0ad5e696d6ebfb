//! Sparse list-backed adjacency collection.

use super::{check_index, AdjacencyCollection, NO_CONNECTION};
use std::collections::BTreeMap;

/// Adjacency stored as an ordered map of outgoing connections per node.
///
/// Memory grows with the number of connections, which suits large lattices
/// where every node only has a handful of neighbors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdjacencyList {
    nodes: Vec<BTreeMap<usize, f64>>,
}

impl AdjacencyList {
    /// Creates a list for `size` nodes without any connections.
    pub fn new(size: usize) -> Self {
        Self {
            nodes: vec![BTreeMap::new(); size],
        }
    }

    /// Total number of stored connections.
    pub fn connection_count(&self) -> usize {
        self.nodes.iter().map(BTreeMap::len).sum()
    }
}

impl AdjacencyCollection for AdjacencyList {
    #[inline]
    fn size(&self) -> usize {
        self.nodes.len()
    }

    fn set_connection_value(&mut self, from: usize, to: usize, value: f64) {
        check_index(from, self.nodes.len());
        check_index(to, self.nodes.len());

        if value == NO_CONNECTION {
            self.nodes[from].remove(&to);
        } else {
            self.nodes[from].insert(to, value);
        }
    }

    fn get_connection(&self, from: usize, to: usize) -> f64 {
        check_index(from, self.nodes.len());
        check_index(to, self.nodes.len());
        self.nodes[from].get(&to).copied().unwrap_or(NO_CONNECTION)
    }

    fn get_neighbors(&self, node: usize) -> Vec<usize> {
        check_index(node, self.nodes.len());
        self.nodes[node].keys().copied().collect()
    }
}
