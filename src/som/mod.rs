//! Self-Organizing Map (SOM) module.
//!
//! - **Lattice**: neuron locations and topology construction (lattice.rs)
//! - **Initialization**: random and grid weight placement (init.rs)
//! - **Map**: competition, adaptation and result accessors (map.rs)
//! - **Training**: decay schedule and the epoch loop (training.rs)
//! - **Kernels**: autovectorized distance and update loops (simd.rs)

mod init;
mod lattice;
mod map;
pub mod simd;
pub mod training;

pub use init::DatasetStats;
pub use lattice::{Lattice, Location, DENSE_ADJACENCY_LIMIT};
pub use map::Som;
pub use training::{DecaySchedule, RADIUS_COLLAPSE_FRACTION};
