//! Initial weight placement.

use crate::config::InitType;
use crate::error::{Result, SomError};
use crate::som::lattice::Lattice;
use rand::Rng;
use rand_distr::{Distribution, Normal, StandardNormal};

/// Per-dimension summary of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    /// Minimum per dimension.
    pub min: Vec<f64>,
    /// Maximum per dimension.
    pub max: Vec<f64>,
    /// Mean per dimension.
    pub mean: Vec<f64>,
    /// Population standard deviation per dimension.
    pub std_dev: Vec<f64>,
}

impl DatasetStats {
    /// Computes statistics over a non-empty dataset of equal-length samples.
    pub fn from_samples(data: &[Vec<f64>]) -> Self {
        let dimension = data.first().map_or(0, Vec::len);
        let count = data.len() as f64;

        let mut min = vec![f64::INFINITY; dimension];
        let mut max = vec![f64::NEG_INFINITY; dimension];
        let mut mean = vec![0.0; dimension];

        for sample in data {
            for (d, &value) in sample.iter().enumerate() {
                min[d] = min[d].min(value);
                max[d] = max[d].max(value);
                mean[d] += value;
            }
        }
        for m in &mut mean {
            *m /= count;
        }

        let mut std_dev = vec![0.0; dimension];
        for sample in data {
            for (d, &value) in sample.iter().enumerate() {
                std_dev[d] += (value - mean[d]).powi(2);
            }
        }
        for s in &mut std_dev {
            *s = (*s / count).sqrt();
        }

        Self {
            min,
            max,
            mean,
            std_dev,
        }
    }

    /// Number of dimensions.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.mean.len()
    }
}

/// Creates the flat weight buffer (`lattice.size() * dimension`) for the given strategy.
pub fn initial_weights<R: Rng>(
    init_type: InitType,
    lattice: &Lattice,
    stats: &DatasetStats,
    rng: &mut R,
) -> Result<Vec<f64>> {
    let dimension = stats.dimension();
    let size = lattice.size();
    let mut weights = Vec::with_capacity(size * dimension);

    match init_type {
        InitType::Random => {
            for _ in 0..size * dimension {
                weights.push(rng.sample::<f64, _>(StandardNormal));
            }
        }
        InitType::RandomCentroid | InitType::RandomSurface => {
            let distributions = stats
                .mean
                .iter()
                .zip(stats.std_dev.iter())
                .map(|(&mean, &std_dev)| {
                    let spread = if init_type == InitType::RandomCentroid { 1.0 } else { std_dev };
                    Normal::new(mean, spread).map_err(|e| SomError::Config(e.to_string()))
                })
                .collect::<Result<Vec<_>>>()?;

            for _ in 0..size {
                for distribution in &distributions {
                    weights.push(distribution.sample(rng));
                }
            }
        }
        InitType::UniformGrid => {
            let cols = lattice.cols();
            let rows = lattice.rows();
            for index in 0..size {
                let (row, col) = (index / cols, index % cols);
                for d in 0..dimension {
                    let (step, steps) = match (dimension, d) {
                        (1, _) => (index, size),
                        (_, 0) => (col, cols),
                        (_, 1) => (row, rows),
                        _ => (0, 1),
                    };
                    weights.push(grid_coordinate(stats, d, step, steps));
                }
            }
        }
    }

    Ok(weights)
}

/// Position `step` of `steps` evenly spaced points across dimension `d`.
///
/// A single point sits at the mean.
#[inline]
fn grid_coordinate(stats: &DatasetStats, d: usize, step: usize, steps: usize) -> f64 {
    if steps <= 1 {
        return stats.mean[d];
    }
    let width = stats.max[d] - stats.min[d];
    stats.min[d] + width * step as f64 / (steps - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Topology;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn square() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
        ]
    }

    #[test]
    fn test_dataset_stats() {
        let stats = DatasetStats::from_samples(&square());
        assert_eq!(stats.min, vec![0.0, 0.0]);
        assert_eq!(stats.max, vec![1.0, 1.0]);
        assert_eq!(stats.mean, vec![0.5, 0.5]);
        assert!((stats.std_dev[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_uniform_grid_covers_bounding_box() {
        let lattice = Lattice::new(2, 2, Topology::GridFour);
        let stats = DatasetStats::from_samples(&square());
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let weights = initial_weights(InitType::UniformGrid, &lattice, &stats, &mut rng).unwrap();

        assert_eq!(weights, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_uniform_grid_extra_dimensions_use_mean() {
        let lattice = Lattice::new(1, 3, Topology::GridFour);
        let data = vec![vec![0.0, 5.0, 2.0], vec![4.0, 7.0, 4.0]];
        let stats = DatasetStats::from_samples(&data);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let weights = initial_weights(InitType::UniformGrid, &lattice, &stats, &mut rng).unwrap();

        // single row -> dim 1 sits at its mean, dim 2 always at its mean
        assert_eq!(weights, vec![0.0, 6.0, 3.0, 2.0, 6.0, 3.0, 4.0, 6.0, 3.0]);
    }

    #[test]
    fn test_uniform_grid_one_dimensional_data() {
        let lattice = Lattice::new(2, 2, Topology::GridFour);
        let data = vec![vec![-3.0], vec![3.0]];
        let stats = DatasetStats::from_samples(&data);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let weights = initial_weights(InitType::UniformGrid, &lattice, &stats, &mut rng).unwrap();

        assert_eq!(weights, vec![-3.0, -1.0, 1.0, 3.0]);
    }

    #[test]
    fn test_random_centroid_is_seeded() {
        let lattice = Lattice::new(3, 3, Topology::GridEight);
        let stats = DatasetStats::from_samples(&square());

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let a = initial_weights(InitType::RandomCentroid, &lattice, &stats, &mut rng).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let b = initial_weights(InitType::RandomCentroid, &lattice, &stats, &mut rng).unwrap();

        assert_eq!(a.len(), 18);
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_surface_zero_spread() {
        let lattice = Lattice::new(2, 2, Topology::GridFour);
        let data = vec![vec![2.0, -1.0]];
        let stats = DatasetStats::from_samples(&data);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let weights = initial_weights(InitType::RandomSurface, &lattice, &stats, &mut rng).unwrap();

        for pair in weights.chunks(2) {
            assert_eq!(pair, &[2.0, -1.0]);
        }
    }

    #[test]
    fn test_random_is_not_constant() {
        let lattice = Lattice::new(2, 2, Topology::GridFour);
        let stats = DatasetStats::from_samples(&square());
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let weights = initial_weights(InitType::Random, &lattice, &stats, &mut rng).unwrap();

        assert_eq!(weights.len(), 8);
        assert!(weights.iter().any(|&w| w != weights[0]));
    }
}
