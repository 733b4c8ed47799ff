//! Two-dimensional periodic particle simulation with a uniform cell-list index.
//!
//! The domain is the square [0, N)^2 with periodic boundaries, partitioned into
//! N x N unit cells. Particles interact through a short-range inverse-square
//! law with a cutoff of at most one cell, so each particle only needs to see
//! its own cell and the eight cells around it.
//!
//! ```no_run
//! use cellsim::{MemorySnapshotWriter, SimConfig, Simulation};
//!
//! let config = SimConfig {
//!     grid_size: 16,
//!     ticks: 100,
//!     snapshot_every: 10,
//!     seed: Some(7),
//!     ..SimConfig::default()
//! };
//! let mut sim = Simulation::new(config)?;
//! sim.initialize()?;
//! let mut frames = MemorySnapshotWriter::default();
//! let summary = sim.run(&mut frames)?;
//! assert_eq!(summary.frames, 10);
//! # Ok::<(), cellsim::Error>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod snapshot;

#[cfg(feature = "python")]
mod python;

pub use crate::config::SimConfig;
pub use crate::core::{Particle, RunSummary, SimState, Simulation};
pub use crate::error::{Error, Result};
pub use crate::snapshot::{
    MemorySnapshotWriter, NullSnapshotWriter, ParticleRecord, SnapshotWriter, TextSnapshotWriter,
};
