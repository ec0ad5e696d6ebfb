//! Self-Organizing Map (SOM) implementation.

use crate::adjacency::AdjacencyCollection;
use crate::config::{SomConfig, Topology};
use crate::error::{Result, SomError};
use crate::som::lattice::{Lattice, Location};
use crate::som::simd::{distance_squared, find_bmu, move_towards};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Radius covering the eight surrounding cells of a rectangular lattice.
const EIGHT_NEIGHBORHOOD_RADIUS: f64 = 1.5;

/// A Self-Organizing Feature Map.
///
/// The map is a `rows x cols` lattice of neurons, each holding a weight
/// vector. The weight dimensionality is fixed by the first call to
/// [`Som::train`]; until then the map holds no weights and read-only
/// operations fail with [`SomError::NotTrained`].
#[derive(Debug)]
pub struct Som {
    pub(super) config: SomConfig,
    pub(super) lattice: Lattice,
    pub(super) dimension: Option<usize>,
    /// Flat weight buffer, `size * dimension`, row-major per neuron.
    pub(super) weights: Vec<f64>,
    /// Weights as they were before the current epoch.
    pub(super) previous_weights: Vec<f64>,
    pub(super) awards: Vec<usize>,
    pub(super) capture_objects: Vec<Vec<usize>>,
    pub(super) adaptation_history: Vec<f64>,
    pub(super) epochs_trained: usize,
    pub(super) local_radius: f64,
    pub(super) learn_rate: f64,
    pub(super) rng: ChaCha8Rng,
}

impl Som {
    /// Creates a new SOM, validating the configuration before building the lattice.
    pub fn new(config: SomConfig) -> Result<Self> {
        config.validate()?;

        let lattice = Lattice::new(config.rows, config.cols, config.topology);
        let size = lattice.size();

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(Self {
            local_radius: config.effective_init_radius(),
            learn_rate: config.init_learn_rate,
            config,
            lattice,
            dimension: None,
            weights: Vec::new(),
            previous_weights: Vec::new(),
            awards: vec![0; size],
            capture_objects: vec![Vec::new(); size],
            adaptation_history: Vec::new(),
            epochs_trained: 0,
            rng,
        })
    }

    /// Discards weights and capture records; the next `train` call starts from
    /// a fresh initialization.
    pub fn reset(&mut self) {
        self.dimension = None;
        self.weights.clear();
        self.previous_weights.clear();
        self.clear_captures();
        self.adaptation_history.clear();
        self.epochs_trained = 0;
        self.local_radius = self.config.effective_init_radius();
        self.learn_rate = self.config.init_learn_rate;
    }

    /// Returns the configuration the map was built with.
    #[inline]
    pub fn config(&self) -> &SomConfig {
        &self.config
    }

    /// Returns the total number of neurons.
    #[inline]
    pub fn size(&self) -> usize {
        self.lattice.size()
    }

    /// Number of lattice rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.lattice.rows()
    }

    /// Number of lattice columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.lattice.cols()
    }

    /// Lattice topology.
    #[inline]
    pub fn topology(&self) -> Topology {
        self.lattice.topology()
    }

    /// Weight dimensionality, once established by training.
    #[inline]
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Returns true once weights exist.
    #[inline]
    pub fn is_trained(&self) -> bool {
        self.dimension.is_some()
    }

    /// Stored connections between neurons.
    pub fn adjacency(&self) -> &dyn AdjacencyCollection {
        self.lattice.adjacency()
    }

    /// Lattice location of a neuron.
    pub fn location(&self, index: usize) -> Result<Location> {
        self.check_neuron(index)?;
        Ok(self.lattice.location(index))
    }

    /// Converts a 1D index to `(row, col)`.
    #[inline]
    pub fn index_to_coords(&self, index: usize) -> (usize, usize) {
        (index / self.cols(), index % self.cols())
    }

    /// Converts `(row, col)` to a 1D index.
    #[inline]
    pub fn coords_to_index(&self, row: usize, col: usize) -> usize {
        row * self.cols() + col
    }

    /// Weight vector of one neuron.
    pub fn neuron_weights(&self, index: usize) -> Result<&[f64]> {
        let dimension = self.dimension.ok_or(SomError::NotTrained)?;
        self.check_neuron(index)?;
        Ok(&self.weights[index * dimension..(index + 1) * dimension])
    }

    /// Copy of the full weight matrix, one vector per neuron.
    ///
    /// Empty before the first training call.
    pub fn weights(&self) -> Vec<Vec<f64>> {
        match self.dimension {
            Some(dimension) => self.weights.chunks(dimension).map(<[f64]>::to_vec).collect(),
            None => Vec::new(),
        }
    }

    /// Number of samples each neuron won in the last training epoch.
    #[inline]
    pub fn awards(&self) -> &[usize] {
        &self.awards
    }

    /// Sample indices captured by each neuron in the last training epoch.
    #[inline]
    pub fn capture_objects(&self) -> &[Vec<usize>] {
        &self.capture_objects
    }

    /// Sample indices captured by one neuron.
    pub fn captured_by(&self, index: usize) -> Result<&[usize]> {
        self.check_neuron(index)?;
        Ok(&self.capture_objects[index])
    }

    /// Number of neurons that won at least one sample.
    pub fn winner_number(&self) -> usize {
        self.awards.iter().filter(|&&count| count > 0).count()
    }

    /// Neighbor indices of every neuron.
    ///
    /// For the function-neighbor topology these are the neurons inside the
    /// current radius.
    pub fn neighbors(&self) -> Vec<Vec<usize>> {
        (0..self.size()).map(|i| self.neighbors_of_unchecked(i)).collect()
    }

    /// Neighbor indices of one neuron.
    pub fn neighbors_of(&self, index: usize) -> Result<Vec<usize>> {
        self.check_neuron(index)?;
        Ok(self.neighbors_of_unchecked(index))
    }

    /// Neurons strictly inside `radius` of `index`, by lattice distance.
    pub fn neighbors_within(&self, index: usize, radius: f64) -> Result<Vec<usize>> {
        self.check_neuron(index)?;
        Ok(self.lattice.neighbors_within(index, radius))
    }

    /// Finds the winning neuron for a pattern without changing any state.
    pub fn simulate(&self, pattern: &[f64]) -> Result<usize> {
        self.check_pattern(pattern)?;
        Ok(self.competition(pattern))
    }

    /// Finds the winning neuron for each pattern, in parallel.
    ///
    /// Fails on the first pattern with a wrong dimensionality.
    pub fn simulate_batch(&self, patterns: &[Vec<f64>]) -> Result<Vec<usize>> {
        for pattern in patterns {
            self.check_pattern(pattern)?;
        }

        Ok(patterns
            .par_iter()
            .map(|pattern| self.competition(pattern))
            .collect())
    }

    /// Unified distance matrix (`rows x cols`): mean weight distance between
    /// each neuron and its lattice neighbors.
    ///
    /// The function-neighbor topology uses the eight surrounding cells.
    pub fn distance_matrix(&self) -> Result<Vec<Vec<f64>>> {
        let dimension = self.dimension.ok_or(SomError::NotTrained)?;

        let distances: Vec<f64> = (0..self.size())
            .map(|i| {
                let neighbors = match self.topology() {
                    Topology::FuncNeighbor => {
                        self.lattice.neighbors_within(i, EIGHT_NEIGHBORHOOD_RADIUS)
                    }
                    _ => self.lattice.static_neighbors(i).to_vec(),
                };
                if neighbors.is_empty() {
                    return 0.0;
                }

                let own = &self.weights[i * dimension..(i + 1) * dimension];
                let total: f64 = neighbors
                    .iter()
                    .map(|&j| {
                        let other = &self.weights[j * dimension..(j + 1) * dimension];
                        distance_squared(own, other).sqrt()
                    })
                    .sum();
                total / neighbors.len() as f64
            })
            .collect();

        Ok(distances.chunks(self.cols()).map(<[f64]>::to_vec).collect())
    }

    /// Award counts shaped `rows x cols`.
    pub fn density_matrix(&self) -> Vec<Vec<usize>> {
        self.awards.chunks(self.cols()).map(<[usize]>::to_vec).collect()
    }

    /// Index of the neuron closest to `pattern`; the dimensionality must already be checked.
    #[inline]
    pub(super) fn competition(&self, pattern: &[f64]) -> usize {
        let dimension = pattern.len();
        find_bmu(&self.weights, pattern, self.size(), dimension)
    }

    /// Moves the winner and its neighbors towards `pattern` and records the
    /// capture of sample `sample_index`.
    ///
    /// Returns how many neighbors (winner excluded) were adapted.
    pub(super) fn adaptation(&mut self, winner: usize, sample_index: usize, pattern: &[f64]) -> usize {
        let dimension = pattern.len();
        let radius_sq = self.local_radius * self.local_radius;
        let learn_rate = self.learn_rate;
        let mut adapted = 0;

        let winner_weights = &mut self.weights[winner * dimension..(winner + 1) * dimension];
        move_towards(winner_weights, pattern, learn_rate);

        if self.lattice.topology().is_dynamic() {
            let weights = &mut self.weights;
            self.lattice.for_each_within(winner, radius_sq, |neighbor, distance_sq| {
                let influence = learn_rate * gaussian(distance_sq, radius_sq);
                move_towards(
                    &mut weights[neighbor * dimension..(neighbor + 1) * dimension],
                    pattern,
                    influence,
                );
                adapted += 1;
            });
        } else {
            let neighbors = self.lattice.static_neighbors(winner);
            let distances = self.lattice.static_neighbor_distances(winner);
            for (&neighbor, &distance_sq) in neighbors.iter().zip(distances) {
                if distance_sq < radius_sq {
                    let influence = learn_rate * gaussian(distance_sq, radius_sq);
                    move_towards(
                        &mut self.weights[neighbor * dimension..(neighbor + 1) * dimension],
                        pattern,
                        influence,
                    );
                    adapted += 1;
                }
            }
        }

        self.awards[winner] += 1;
        self.capture_objects[winner].push(sample_index);

        adapted
    }

    pub(super) fn clear_captures(&mut self) {
        self.awards.iter_mut().for_each(|count| *count = 0);
        for captured in &mut self.capture_objects {
            captured.clear();
        }
    }

    fn neighbors_of_unchecked(&self, index: usize) -> Vec<usize> {
        if self.topology().is_dynamic() {
            self.lattice.neighbors_within(index, self.local_radius)
        } else {
            self.lattice.static_neighbors(index).to_vec()
        }
    }

    fn check_neuron(&self, index: usize) -> Result<()> {
        if index >= self.size() {
            return Err(SomError::IndexOutOfBounds {
                index,
                max: self.size(),
            });
        }
        Ok(())
    }

    fn check_pattern(&self, pattern: &[f64]) -> Result<()> {
        let expected = self.dimension.ok_or(SomError::NotTrained)?;
        if pattern.len() != expected {
            return Err(SomError::DimensionMismatch {
                expected,
                actual: pattern.len(),
            });
        }
        Ok(())
    }
}

/// Gaussian neighborhood kernel: 1 at the winner, decaying with lattice distance.
#[inline]
pub(super) fn gaussian(distance_sq: f64, radius_sq: f64) -> f64 {
    (-distance_sq / (2.0 * radius_sq)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(rows: usize, cols: usize, topology: Topology) -> SomConfig {
        SomConfig {
            seed: Some(42),
            ..SomConfig::new(rows, cols, topology)
        }
    }

    /// Map with hand-placed weights, as if trained on `dimension`-sized data.
    fn with_weights(rows: usize, cols: usize, topology: Topology, weights: Vec<f64>) -> Som {
        let mut som = Som::new(test_config(rows, cols, topology)).unwrap();
        let dimension = weights.len() / som.size();
        som.dimension = Some(dimension);
        som.previous_weights = weights.clone();
        som.weights = weights;
        som
    }

    #[test]
    fn test_som_creation() {
        let som = Som::new(test_config(3, 4, Topology::GridFour)).unwrap();
        assert_eq!(som.size(), 12);
        assert_eq!(som.rows(), 3);
        assert_eq!(som.cols(), 4);
        assert!(!som.is_trained());
        assert!(som.weights().is_empty());
        assert_eq!(som.awards(), &[0; 12]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = Som::new(SomConfig::new(0, 3, Topology::GridFour));
        assert!(matches!(result, Err(SomError::Config(_))));
    }

    #[test]
    fn test_simulate_before_training() {
        let som = Som::new(test_config(2, 2, Topology::GridFour)).unwrap();
        assert_eq!(som.simulate(&[0.0, 1.0]), Err(SomError::NotTrained));
        assert!(som.distance_matrix().is_err());
    }

    #[test]
    fn test_competition() {
        let som = with_weights(
            2,
            2,
            Topology::GridFour,
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0],
        );
        assert_eq!(som.simulate(&[0.9, 0.1]).unwrap(), 2);
        assert_eq!(som.simulate(&[0.1, 0.8]).unwrap(), 1);
        // equidistant from all four -> first index
        assert_eq!(som.simulate(&[0.5, 0.5]).unwrap(), 0);
    }

    #[test]
    fn test_simulate_dimension_mismatch() {
        let som = with_weights(1, 2, Topology::GridFour, vec![0.0, 0.0, 1.0, 1.0]);
        assert_eq!(
            som.simulate(&[0.0, 0.0, 0.0]),
            Err(SomError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_simulate_batch() {
        let som = with_weights(1, 3, Topology::GridFour, vec![0.0, 5.0, 10.0]);
        let winners = som
            .simulate_batch(&[vec![9.0], vec![-1.0], vec![4.0]])
            .unwrap();
        assert_eq!(winners, vec![2, 0, 1]);
        assert!(som.simulate_batch(&[vec![1.0], vec![1.0, 2.0]]).is_err());
    }

    #[test]
    fn test_adaptation_static_topology() {
        let mut som = with_weights(1, 3, Topology::GridFour, vec![0.0, 0.0, 0.0]);
        som.learn_rate = 0.5;
        som.local_radius = 1.5;

        let adapted = som.adaptation(0, 7, &[1.0]);
        assert_eq!(adapted, 1);

        let weights = som.weights();
        assert!((weights[0][0] - 0.5).abs() < 1e-12);
        let expected = 0.5 * gaussian(1.0, 2.25);
        assert!((weights[1][0] - expected).abs() < 1e-12);
        // not adjacent to the winner
        assert_eq!(weights[2][0], 0.0);

        assert_eq!(som.awards(), &[1, 0, 0]);
        assert_eq!(som.captured_by(0).unwrap(), &[7]);
    }

    #[test]
    fn test_adaptation_collapsed_radius_moves_only_winner() {
        let mut som = with_weights(2, 2, Topology::GridEight, vec![0.0; 4]);
        som.learn_rate = 0.25;
        som.local_radius = 1.0;

        assert_eq!(som.adaptation(3, 0, &[4.0]), 0);
        assert_eq!(som.weights(), vec![vec![0.0], vec![0.0], vec![0.0], vec![1.0]]);
    }

    #[test]
    fn test_adaptation_default_radius_reaches_only_neighbor() {
        let mut som = with_weights(1, 2, Topology::GridFour, vec![0.0, 0.0]);
        assert_eq!(som.current_radius(), 1.5);

        assert_eq!(som.adaptation(0, 0, &[2.0]), 1);
        let weights = som.weights();
        assert!((weights[0][0] - 0.2).abs() < 1e-12);
        assert!((weights[1][0] - 0.2 * gaussian(1.0, 2.25)).abs() < 1e-12);
    }

    #[test]
    fn test_adaptation_dynamic_topology() {
        let mut som = with_weights(1, 4, Topology::FuncNeighbor, vec![0.0; 4]);
        som.learn_rate = 1.0;
        som.local_radius = 2.5;

        // neurons 0, 2 and 3 all lie within 2.5 of neuron 1
        assert_eq!(som.adaptation(1, 0, &[1.0]), 3);
        let weights = som.weights();
        assert!((weights[1][0] - 1.0).abs() < 1e-12);
        assert!((weights[0][0] - gaussian(1.0, 6.25)).abs() < 1e-12);
        assert!((weights[3][0] - gaussian(4.0, 6.25)).abs() < 1e-12);
        assert!(weights[0][0] > weights[3][0]);
    }

    #[test]
    fn test_gaussian_kernel() {
        assert_eq!(gaussian(0.0, 4.0), 1.0);
        assert!(gaussian(1.0, 4.0) > gaussian(2.0, 4.0));
    }

    #[test]
    fn test_neighbors() {
        let som = Som::new(test_config(3, 3, Topology::GridFour)).unwrap();
        let neighbors = som.neighbors();
        assert_eq!(neighbors.len(), 9);
        assert_eq!(neighbors[4], vec![1, 3, 5, 7]);
        assert_eq!(som.neighbors_of(0).unwrap(), vec![1, 3]);
        assert!(matches!(
            som.neighbors_of(9),
            Err(SomError::IndexOutOfBounds { index: 9, max: 9 })
        ));
    }

    #[test]
    fn test_dynamic_neighbors_follow_radius() {
        let mut som = Som::new(test_config(3, 3, Topology::FuncNeighbor)).unwrap();
        // default radius for 3x3 is 2.0
        assert_eq!(som.neighbors_of(4).unwrap().len(), 8);
        som.local_radius = 1.2;
        assert_eq!(som.neighbors_of(4).unwrap(), vec![1, 3, 5, 7]);
    }

    #[test]
    fn test_distance_matrix() {
        let som = with_weights(1, 3, Topology::GridFour, vec![0.0, 1.0, 3.0]);
        let matrix = som.distance_matrix().unwrap();
        assert_eq!(matrix.len(), 1);
        assert!((matrix[0][0] - 1.0).abs() < 1e-12);
        assert!((matrix[0][1] - 1.5).abs() < 1e-12);
        assert!((matrix[0][2] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_density_matrix_and_winner_number() {
        let mut som = with_weights(2, 2, Topology::GridFour, vec![0.0; 4]);
        som.awards = vec![3, 0, 1, 0];
        assert_eq!(som.density_matrix(), vec![vec![3, 0], vec![1, 0]]);
        assert_eq!(som.winner_number(), 2);
    }

    #[test]
    fn test_coordinate_conversion() {
        let som = Som::new(test_config(3, 5, Topology::Honeycomb)).unwrap();
        assert_eq!(som.index_to_coords(7), (1, 2));
        assert_eq!(som.coords_to_index(1, 2), 7);
    }

    #[test]
    fn test_neuron_weights_bounds() {
        let som = with_weights(1, 2, Topology::GridFour, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(som.neuron_weights(1).unwrap(), &[3.0, 4.0]);
        assert!(matches!(
            som.neuron_weights(2),
            Err(SomError::IndexOutOfBounds { .. })
        ));
    }
}
