//! Lattice geometry and topology construction.
//!
//! The lattice is a `rows x cols` grid of neurons in row-major order. Static
//! topologies are written once into an [`AdjacencyCollection`]; the
//! function-neighbor topology stores nothing and derives neighborhoods from
//! the current radius.

use crate::adjacency::{AdjacencyCollection, AdjacencyList, AdjacencyMatrix};
use crate::config::Topology;

/// Largest `size * size` for which the dense adjacency matrix is used.
pub const DENSE_ADJACENCY_LIMIT: usize = 4096;

const GRID_FOUR: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

const GRID_EIGHT: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

// Odd rows are shifted half a cell to the right.
const HONEYCOMB_EVEN_ROW: [(isize, isize); 6] = [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, -1), (1, 0)];
const HONEYCOMB_ODD_ROW: [(isize, isize); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0), (1, 1)];

/// Fixed 2D coordinate of a neuron on the lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// Vertical coordinate.
    pub y: f64,
    /// Horizontal coordinate.
    pub x: f64,
}

impl Location {
    /// Squared Euclidean distance to another location.
    #[inline]
    pub fn distance_squared(&self, other: &Location) -> f64 {
        let dy = self.y - other.y;
        let dx = self.x - other.x;
        dy * dy + dx * dx
    }
}

/// Neuron lattice: locations, adjacency and cached neighbor distances.
pub struct Lattice {
    rows: usize,
    cols: usize,
    topology: Topology,
    locations: Vec<Location>,
    adjacency: Box<dyn AdjacencyCollection>,
    neighbors: Vec<Vec<usize>>,
    neighbor_distances: Vec<Vec<f64>>,
}

impl Lattice {
    /// Builds the lattice and its connections for the given topology.
    ///
    /// `rows` and `cols` must both be non-zero; the caller validates this.
    pub fn new(rows: usize, cols: usize, topology: Topology) -> Self {
        let size = rows * cols;
        let locations: Vec<Location> = (0..size)
            .map(|index| locate(index / cols, index % cols, topology))
            .collect();

        let mut adjacency = create_adjacency(size);
        if !topology.is_dynamic() {
            for index in 0..size {
                let (row, col) = (index / cols, index % cols);
                for &(dr, dc) in offsets(topology, row) {
                    if let Some(neighbor) = offset_index(row, col, dr, dc, rows, cols) {
                        adjacency.set_connection(index, neighbor);
                    }
                }
            }
        }

        let neighbors: Vec<Vec<usize>> = (0..size).map(|i| adjacency.get_neighbors(i)).collect();
        let neighbor_distances: Vec<Vec<f64>> = neighbors
            .iter()
            .enumerate()
            .map(|(i, list)| {
                list.iter()
                    .map(|&j| locations[i].distance_squared(&locations[j]))
                    .collect::<Vec<f64>>()
            })
            .collect();

        Self {
            rows,
            cols,
            topology,
            locations,
            adjacency,
            neighbors,
            neighbor_distances,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of neurons.
    #[inline]
    pub fn size(&self) -> usize {
        self.locations.len()
    }

    /// Topology the lattice was built with.
    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Location of a neuron.
    #[inline]
    pub fn location(&self, index: usize) -> Location {
        self.locations[index]
    }

    /// Squared lattice distance between two neurons.
    #[inline]
    pub fn distance_squared(&self, a: usize, b: usize) -> f64 {
        self.locations[a].distance_squared(&self.locations[b])
    }

    /// The stored connections.
    pub fn adjacency(&self) -> &dyn AdjacencyCollection {
        self.adjacency.as_ref()
    }

    /// Stored neighbors of a neuron (empty for the function-neighbor topology).
    #[inline]
    pub fn static_neighbors(&self, index: usize) -> &[usize] {
        &self.neighbors[index]
    }

    /// Squared distances matching [`Lattice::static_neighbors`] element-wise.
    #[inline]
    pub fn static_neighbor_distances(&self, index: usize) -> &[f64] {
        &self.neighbor_distances[index]
    }

    /// Visits every neuron other than `center` whose squared distance to it is
    /// strictly below `radius_sq`.
    #[inline]
    pub fn for_each_within<F>(&self, center: usize, radius_sq: f64, mut visit: F)
    where
        F: FnMut(usize, f64),
    {
        let origin = self.locations[center];
        for (index, location) in self.locations.iter().enumerate() {
            if index == center {
                continue;
            }
            let distance_sq = origin.distance_squared(location);
            if distance_sq < radius_sq {
                visit(index, distance_sq);
            }
        }
    }

    /// Neurons strictly inside `radius` of `center`, excluding `center`.
    pub fn neighbors_within(&self, center: usize, radius: f64) -> Vec<usize> {
        let mut result = Vec::new();
        self.for_each_within(center, radius * radius, |index, _| result.push(index));
        result
    }
}

impl std::fmt::Debug for Lattice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lattice")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("topology", &self.topology)
            .finish()
    }
}

fn create_adjacency(size: usize) -> Box<dyn AdjacencyCollection> {
    if size.saturating_mul(size) <= DENSE_ADJACENCY_LIMIT {
        Box::new(AdjacencyMatrix::new(size))
    } else {
        Box::new(AdjacencyList::new(size))
    }
}

fn offsets(topology: Topology, row: usize) -> &'static [(isize, isize)] {
    match topology {
        Topology::GridFour => &GRID_FOUR,
        Topology::GridEight => &GRID_EIGHT,
        Topology::Honeycomb if row % 2 == 0 => &HONEYCOMB_EVEN_ROW,
        Topology::Honeycomb => &HONEYCOMB_ODD_ROW,
        Topology::FuncNeighbor => &[],
    }
}

fn locate(row: usize, col: usize, topology: Topology) -> Location {
    match topology {
        Topology::Honeycomb => Location {
            y: row as f64 * 3f64.sqrt() / 2.0,
            x: col as f64 + if row % 2 == 1 { 0.5 } else { 0.0 },
        },
        _ => Location {
            y: row as f64,
            x: col as f64,
        },
    }
}

#[inline]
fn offset_index(
    row: usize,
    col: usize,
    dr: isize,
    dc: isize,
    rows: usize,
    cols: usize,
) -> Option<usize> {
    let r = row.checked_add_signed(dr)?;
    let c = col.checked_add_signed(dc)?;
    if r < rows && c < cols {
        Some(r * cols + c)
    } else {
        None
    }
}
