//! Simulation tunables.
//!
//! All lengths are in grid units (a cell is 1x1) and one tick advances time by `dt`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Immutable parameter set handed to [`crate::core::Simulation`] at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Lattice side length N. The domain is [0, N)^2 and holds N*N cells.
    pub grid_size: usize,
    /// Discrete time step.
    pub dt: f32,
    /// Floor applied to pair distances before the force law is evaluated.
    pub min_distance: f32,
    /// Upper bound applied to each velocity component after the force pass.
    pub max_velocity: f32,
    /// Interaction cutoff radius, at most one cell.
    pub cutoff: f32,
    /// The G * m1 * m2 force prefactor.
    pub gravity_factor: f32,
    /// Number of ticks `run` performs.
    pub ticks: usize,
    /// Snapshot cadence in ticks; 0 disables snapshots.
    pub snapshot_every: usize,
    /// RNG seed for the initial placement; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_size: 40,
            dt: 0.05,
            min_distance: 1.0e-2,
            max_velocity: 1.0,
            cutoff: 1.0,
            gravity_factor: -1.0e-5,
            ticks: 150_000,
            snapshot_every: 200,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Default parameters on an `n` x `n` lattice.
    pub fn with_grid_size(n: usize) -> Self {
        Self {
            grid_size: n,
            ..Self::default()
        }
    }

    /// Number of particles created by random initialization (N*N).
    #[inline]
    pub fn particle_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Number of cells in the lattice (N*N).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Check every parameter.
    ///
    /// Errors: `Error::InvalidParam` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        // On a 1x1 lattice all nine stencil cells are the same cell, so a
        // neighbor would be counted once per image shift inside the cutoff.
        if self.grid_size < 2 {
            return Err(Error::InvalidParam("grid_size must be >= 2".into()));
        }
        // Identities are u32 and there are N*N of them.
        if self.grid_size > u16::MAX as usize {
            return Err(Error::InvalidParam("grid_size must be <= 65535".into()));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(Error::InvalidParam("dt must be finite and > 0".into()));
        }
        if !self.min_distance.is_finite() || self.min_distance <= 0.0 {
            return Err(Error::InvalidParam(
                "min_distance must be finite and > 0".into(),
            ));
        }
        if !self.max_velocity.is_finite() || self.max_velocity <= 0.0 {
            return Err(Error::InvalidParam(
                "max_velocity must be finite and > 0".into(),
            ));
        }
        if !self.cutoff.is_finite() || self.cutoff <= 0.0 || self.cutoff > 1.0 {
            return Err(Error::InvalidParam(
                "cutoff must lie in (0, 1]: only the 3x3 cell neighborhood is searched".into(),
            ));
        }
        if self.min_distance >= self.cutoff {
            return Err(Error::InvalidParam(
                "min_distance must be smaller than cutoff".into(),
            ));
        }
        if !self.gravity_factor.is_finite() {
            return Err(Error::InvalidParam("gravity_factor must be finite".into()));
        }
        Ok(())
    }

    /// Parse a JSON document; absent fields keep their defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
