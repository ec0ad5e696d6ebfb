//! Adjacency collections describing which lattice nodes are connected.
//!
//! Two storage representations are provided behind one interface:
//!
//! - **Dense**: an `n x n` matrix of connection values (matrix.rs)
//! - **Sparse**: a per-node ordered map of outgoing connections (list.rs)
//!
//! All indices must be below [`AdjacencyCollection::size`]. Passing a larger
//! index is a contract violation and panics in every build profile.

mod list;
mod matrix;

pub use list::AdjacencyList;
pub use matrix::AdjacencyMatrix;

/// Value reported for a pair of nodes that are not connected.
pub const NO_CONNECTION: f64 = 0.0;

/// Value stored by [`AdjacencyCollection::set_connection`].
pub const DEFAULT_CONNECTION: f64 = 1.0;

/// Capability interface over adjacency storage.
pub trait AdjacencyCollection: Send + Sync {
    /// Number of nodes in the collection.
    fn size(&self) -> usize;

    /// Establishes a one-way connection from `from` to `to` with value 1.0.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    fn set_connection(&mut self, from: usize, to: usize) {
        self.set_connection_value(from, to, DEFAULT_CONNECTION);
    }

    /// Establishes a one-way connection from `from` to `to` with an explicit value.
    ///
    /// Storing [`NO_CONNECTION`] removes the connection.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    fn set_connection_value(&mut self, from: usize, to: usize, value: f64);

    /// Updates the connection from `from` to `to`.
    ///
    /// A zero `value` removes the connection; any other value makes it present
    /// with that value.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    fn update_connection(&mut self, from: usize, to: usize, value: f64) {
        self.set_connection_value(from, to, value);
    }

    /// Returns the connection value, or [`NO_CONNECTION`] if absent.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    fn get_connection(&self, from: usize, to: usize) -> f64;

    /// Returns true if a non-zero connection exists from `from` to `to`.
    fn has_connection(&self, from: usize, to: usize) -> bool {
        self.get_connection(from, to) != NO_CONNECTION
    }

    /// Returns every node reachable by a non-zero connection from `node`, in
    /// ascending index order.
    ///
    /// # Panics
    ///
    /// Panics if `node` is out of range.
    fn get_neighbors(&self, node: usize) -> Vec<usize>;
}

#[inline]
#[track_caller]
pub(crate) fn check_index(index: usize, size: usize) {
    assert!(
        index < size,
        "adjacency index out of bounds: {} >= {}",
        index,
        size
    );
}
