//! Configuration for the Kohonen SOM engine.

use crate::error::{Result, SomError};
use serde::{Deserialize, Serialize};

/// Connection structure established between neurons of the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topology {
    /// Each neuron is connected with its left, upper, right and lower neighbors.
    GridFour,
    /// Grid four plus the four diagonal neighbors.
    GridEight,
    /// Hexagonal grid: left, right and two neighbors in each adjacent row.
    Honeycomb,
    /// No stored connections; neighbors are every neuron inside the current
    /// radius, recomputed on each adaptation step.
    FuncNeighbor,
}

impl Topology {
    /// Returns true if neighbors are derived from the radius rather than stored.
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Topology::FuncNeighbor)
    }
}

/// Strategy used to create the initial weight vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InitType {
    /// Gaussian N(0, 1) per component.
    Random,
    /// Gaussian centered at the dataset mean with unit spread.
    RandomCentroid,
    /// Gaussian centered at the dataset mean with the dataset's per-dimension
    /// standard deviation.
    RandomSurface,
    /// Evenly spaced grid spanning the dataset's bounding box.
    UniformGrid,
}

/// Self-Organizing Map configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SomConfig {
    /// Number of lattice rows.
    /// Default: 5.
    pub rows: usize,

    /// Number of lattice columns.
    /// Default: 5.
    pub cols: usize,

    /// Connection structure between neurons.
    /// Default: GridEight.
    pub topology: Topology,

    /// Weight initialization strategy.
    /// Default: UniformGrid (reproducible).
    pub init_type: InitType,

    /// Initial neighborhood radius.
    /// Default: None (derived from the lattice size).
    pub init_radius: Option<f64>,

    /// Initial learning rate.
    /// Default: 0.1.
    pub init_learn_rate: f64,

    /// Maximum weight change below which autostop ends training.
    /// Default: 0.001.
    pub adaptation_threshold: f64,

    /// Random seed for the random initialization strategies.
    /// Default: None (random).
    pub seed: Option<u64>,
}

impl Default for SomConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 5,
            topology: Topology::GridEight,
            init_type: InitType::UniformGrid,
            init_radius: None,
            init_learn_rate: 0.1,
            adaptation_threshold: 0.001,
            seed: None,
        }
    }
}

impl SomConfig {
    /// Creates a configuration for a `rows x cols` lattice with default parameters.
    pub fn new(rows: usize, cols: usize, topology: Topology) -> Self {
        Self {
            rows,
            cols,
            topology,
            ..Default::default()
        }
    }

    /// Returns the total number of neurons in the SOM.
    #[inline]
    pub fn total_neurons(&self) -> usize {
        self.rows * self.cols
    }

    /// Returns the configured initial radius, or the one derived from the lattice size.
    ///
    /// Adaptation only reaches neighbors strictly inside the radius, so on any
    /// lattice with more than one neuron the derived value stays above the
    /// farthest immediate neighbor (a diagonal at sqrt(2)). It grows with
    /// `max(rows, cols) / 2` on larger lattices.
    pub fn effective_init_radius(&self) -> f64 {
        if let Some(radius) = self.init_radius {
            return radius;
        }

        let ladder: f64 = if (self.rows + self.cols) as f64 / 4.0 > 1.0 {
            2.0
        } else if self.rows.max(self.cols) > 1 {
            1.5
        } else {
            1.0
        };

        ladder.max(self.rows.max(self.cols) as f64 / 2.0)
    }

    /// Checks every parameter, failing on the first invalid one.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(SomError::Config(format!(
                "Lattice must have at least one row and one column, got {}x{}",
                self.rows, self.cols
            )));
        }

        if self.rows.checked_mul(self.cols).is_none() {
            return Err(SomError::Config(format!(
                "Lattice {}x{} is too large",
                self.rows, self.cols
            )));
        }

        if let Some(radius) = self.init_radius {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(SomError::Config(format!(
                    "Initial radius must be positive and finite, got {}",
                    radius
                )));
            }
        }

        if !self.init_learn_rate.is_finite() || self.init_learn_rate <= 0.0 {
            return Err(SomError::Config(format!(
                "Initial learning rate must be positive and finite, got {}",
                self.init_learn_rate
            )));
        }

        if !self.adaptation_threshold.is_finite() || self.adaptation_threshold < 0.0 {
            return Err(SomError::Config(format!(
                "Adaptation threshold must be non-negative and finite, got {}",
                self.adaptation_threshold
            )));
        }

        Ok(())
    }
}
