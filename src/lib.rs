//! # Kohonen - Self-Organizing Feature Maps
//!
//! A Self-Organizing Feature Map (SOM) is an unsupervised competitive-learning
//! lattice of neurons. Training places each neuron's weight vector in the
//! input space so that neighboring neurons on the lattice respond to nearby
//! inputs, giving a low-dimensional topological embedding of the dataset.
//!
//! ## Key Features
//!
//! - **Four lattice topologies**: grid four, grid eight, honeycomb and a
//!   function-neighbor rule driven by the current radius
//! - **Four weight initializations**, with a deterministic uniform grid default
//! - **Gaussian neighborhood** with exponential learning-rate and radius decay
//! - **Autostop** once the per-epoch weight change drops below a threshold
//! - **Pluggable adjacency storage**: dense matrix or sparse list
//!
//! ## Quick Start
//!
//! ```rust
//! use kohonen::{Som, SomConfig, Topology};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.0, 1.0],
//!     vec![1.0, 0.0],
//!     vec![1.0, 1.0],
//! ];
//!
//! let mut som = Som::new(SomConfig::new(2, 2, Topology::GridFour))?;
//! let epochs = som.train(&data, 50, false)?;
//! assert_eq!(epochs, 50);
//!
//! let winner = som.simulate(&[0.9, 0.1])?;
//! assert!(winner < som.size());
//! # Ok::<(), kohonen::SomError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`adjacency`] - Connection storage behind the [`AdjacencyCollection`] trait
//! - [`som`] - Lattice, initialization, competition, adaptation and training
//! - [`config`] - Map parameters
//! - [`error`] - Error type

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adjacency;
pub mod config;
pub mod error;
pub mod som;

// Re-export commonly used types
pub use adjacency::{AdjacencyCollection, AdjacencyList, AdjacencyMatrix};
pub use config::{InitType, SomConfig, Topology};
pub use error::{Result, SomError};
pub use som::{DecaySchedule, Location, Som};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
