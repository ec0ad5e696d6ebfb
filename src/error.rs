//! Error types for the Kohonen SOM engine.

use thiserror::Error;

/// The main error type for SOM operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SomError {
    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Empty input.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Sample dimensionality disagrees with the trained weight dimensionality.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The dimensionality established by training.
        expected: usize,
        /// The dimensionality that was supplied.
        actual: usize,
    },

    /// Index out of bounds.
    #[error("Index out of bounds: {index} >= {max}")]
    IndexOutOfBounds {
        /// The index that was out of bounds.
        index: usize,
        /// The maximum allowed index.
        max: usize,
    },

    /// The map has no weights yet.
    #[error("SOM has not been trained")]
    NotTrained,
}

/// Result type alias for SOM operations.
pub type Result<T> = std::result::Result<T, SomError>;
