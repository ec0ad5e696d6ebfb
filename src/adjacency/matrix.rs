//! Dense matrix-backed adjacency collection.

use super::{check_index, AdjacencyCollection, NO_CONNECTION};

/// Adjacency stored as a row-major `size x size` matrix of connection values.
///
/// Lookups are O(1); neighbor enumeration scans a full row.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix {
    size: usize,
    values: Vec<f64>,
}

impl AdjacencyMatrix {
    /// Creates a matrix for `size` nodes without any connections.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            values: vec![NO_CONNECTION; size * size],
        }
    }

    #[inline]
    fn offset(&self, from: usize, to: usize) -> usize {
        check_index(from, self.size);
        check_index(to, self.size);
        from * self.size + to
    }
}

impl AdjacencyCollection for AdjacencyMatrix {
    #[inline]
    fn size(&self) -> usize {
        self.size
    }

    fn set_connection_value(&mut self, from: usize, to: usize, value: f64) {
        let offset = self.offset(from, to);
        self.values[offset] = value;
    }

    #[inline]
    fn get_connection(&self, from: usize, to: usize) -> f64 {
        self.values[self.offset(from, to)]
    }

    fn get_neighbors(&self, node: usize) -> Vec<usize> {
        check_index(node, self.size);
        let row = &self.values[node * self.size..(node + 1) * self.size];

        row.iter()
            .enumerate()
            .filter(|&(_, &value)| value != NO_CONNECTION)
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_creation() {
        let matrix = AdjacencyMatrix::new(5);
        assert_eq!(matrix.size(), 5);
        for i in 0..5 {
            assert!(matrix.get_neighbors(i).is_empty());
        }
    }

    #[test]
    fn test_self_connection() {
        let mut matrix = AdjacencyMatrix::new(2);
        matrix.set_connection(1, 1);
        assert_eq!(matrix.get_neighbors(1), vec![1]);
    }
}
