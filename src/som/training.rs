//! SOM training: decay schedule, epoch loop and convergence detection.

use crate::error::{Result, SomError};
use crate::som::init::{initial_weights, DatasetStats};
use crate::som::simd::max_abs_difference;
use crate::som::Som;
use log::{debug, info};

/// Fraction of the epoch budget after which the radius has decayed to 1.
pub const RADIUS_COLLAPSE_FRACTION: f64 = 0.25;

/// Exponential learning-rate and radius decay over one training call.
///
/// Both values are monotonically non-increasing in the epoch index. The
/// radius time constant is chosen so the radius reaches 1 after
/// [`RADIUS_COLLAPSE_FRACTION`] of the epochs, leaving the rest of the
/// budget for winner-only fine tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecaySchedule {
    init_radius: f64,
    init_learn_rate: f64,
    epochs: usize,
    radius_time_constant: f64,
}

impl DecaySchedule {
    /// Creates a schedule over `epochs` epochs.
    pub fn new(init_radius: f64, init_learn_rate: f64, epochs: usize) -> Self {
        let budget = epochs.max(1) as f64;
        let radius_time_constant = if init_radius > 1.0 {
            budget * RADIUS_COLLAPSE_FRACTION / init_radius.ln()
        } else {
            budget
        };

        Self {
            init_radius,
            init_learn_rate,
            epochs: epochs.max(1),
            radius_time_constant,
        }
    }

    /// Computes the learning rate at a given epoch (0-based; epoch 0 yields the
    /// initial rate).
    #[inline]
    pub fn learning_rate(&self, epoch: usize) -> f64 {
        self.init_learn_rate * (-(epoch as f64) / self.epochs as f64).exp()
    }

    /// Computes the neighborhood radius at a given epoch (0-based).
    #[inline]
    pub fn radius(&self, epoch: usize) -> f64 {
        self.init_radius * (-(epoch as f64) / self.radius_time_constant).exp()
    }
}

impl Som {
    /// Trains the map on `data` for up to `epochs` epochs.
    ///
    /// Samples are presented in dataset order every epoch. With `autostop`,
    /// training ends early once the largest weight change of an epoch falls
    /// below the configured adaptation threshold. Returns the number of
    /// epochs actually run.
    ///
    /// The first call fixes the weight dimensionality and initializes the
    /// weights; later calls continue from the current weights. Use
    /// [`Som::reset`] to start over. On error nothing is modified.
    pub fn train(&mut self, data: &[Vec<f64>], epochs: usize, autostop: bool) -> Result<usize> {
        let dimension = validate_dataset(data)?;
        if let Some(expected) = self.dimension {
            if expected != dimension {
                return Err(SomError::DimensionMismatch {
                    expected,
                    actual: dimension,
                });
            }
        }
        if epochs == 0 {
            return Err(SomError::Config("Number of epochs must be positive".to_string()));
        }

        if self.dimension.is_none() {
            let stats = DatasetStats::from_samples(data);
            self.weights =
                initial_weights(self.config.init_type, &self.lattice, &stats, &mut self.rng)?;
            self.previous_weights = self.weights.clone();
            self.dimension = Some(dimension);
        }

        let schedule = DecaySchedule::new(
            self.config.effective_init_radius(),
            self.config.init_learn_rate,
            epochs,
        );
        self.adaptation_history.clear();

        info!(
            "Training SOM: {} samples, {} neurons ({}x{}, {:?}), {} dim, {} epochs",
            data.len(),
            self.size(),
            self.rows(),
            self.cols(),
            self.topology(),
            dimension,
            epochs
        );

        for epoch in 1..=epochs {
            // the first epoch runs at the configured radius and rate
            self.local_radius = schedule.radius(epoch - 1);
            self.learn_rate = schedule.learning_rate(epoch - 1);

            self.previous_weights.copy_from_slice(&self.weights);
            self.clear_captures();

            let mut adapted = 0;
            for (index, pattern) in data.iter().enumerate() {
                let winner = self.competition(pattern);
                adapted += self.adaptation(winner, index, pattern);
            }

            let max_adaptation = self.maximal_adaptation();
            self.adaptation_history.push(max_adaptation);
            self.epochs_trained += 1;

            debug!(
                "Epoch {}/{}: lr={:.4}, radius={:.3}, adapted neighbors={}, max adaptation={:.6}",
                epoch, epochs, self.learn_rate, self.local_radius, adapted, max_adaptation
            );

            if autostop && max_adaptation < self.config.adaptation_threshold {
                info!(
                    "SOM converged after {} epochs (max adaptation {:.6} < {})",
                    epoch, max_adaptation, self.config.adaptation_threshold
                );
                return Ok(epoch);
            }
        }

        info!("SOM training completed: {} winners", self.winner_number());
        Ok(epochs)
    }

    /// Largest weight change per epoch of the last training call.
    #[inline]
    pub fn adaptation_history(&self) -> &[f64] {
        &self.adaptation_history
    }

    /// Total epochs run since construction or the last reset.
    #[inline]
    pub fn epochs_trained(&self) -> usize {
        self.epochs_trained
    }

    /// Neighborhood radius used in the most recent epoch.
    #[inline]
    pub fn current_radius(&self) -> f64 {
        self.local_radius
    }

    /// Learning rate used in the most recent epoch.
    #[inline]
    pub fn current_learn_rate(&self) -> f64 {
        self.learn_rate
    }

    /// Largest absolute component change between the snapshot and the current weights.
    fn maximal_adaptation(&self) -> f64 {
        max_abs_difference(&self.weights, &self.previous_weights)
    }
}

/// Checks the dataset is non-empty and rectangular, returning its dimensionality.
fn validate_dataset(data: &[Vec<f64>]) -> Result<usize> {
    let first = data
        .first()
        .ok_or_else(|| SomError::EmptyInput("No training samples provided".to_string()))?;
    let dimension = first.len();
    if dimension == 0 {
        return Err(SomError::EmptyInput("Training samples have no features".to_string()));
    }

    if let Some(sample) = data.iter().find(|sample| sample.len() != dimension) {
        return Err(SomError::DimensionMismatch {
            expected: dimension,
            actual: sample.len(),
        });
    }

    Ok(dimension)
}
