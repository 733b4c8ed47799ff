use crate::config::SimConfig;
use crate::core::forces::ForcePass;
use crate::core::geometry::{wrap_position, ForceLaw};
use crate::core::grid::CellList;
use crate::core::integrate::update_positions;
use crate::core::particle::{Particle, Vec2, DIM};
use crate::error::{Error, Result};
use crate::snapshot::{ParticleRecord, SnapshotWriter};
use log::{debug, info};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Lifecycle of a [`Simulation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    /// Configured, no particles yet.
    Uninitialized,
    /// Particles placed, no tick executed.
    Ready,
    /// At least one tick executed, ticks remaining.
    Running,
    /// The configured tick count has been reached.
    Done,
}

/// Outcome of [`Simulation::run`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Ticks executed by this call.
    pub ticks: usize,
    /// Snapshot frames emitted by this call.
    pub frames: usize,
    /// Wall-clock time spent in the tick loop.
    pub elapsed: Duration,
    /// Particle updates per microsecond.
    pub mega_particles_per_second: f64,
}

/// Periodic N x N domain with cell-list accelerated short-range forces.
///
/// Each tick runs, strictly in order: cell-list rebuild, force pass
/// (velocities), integration pass (positions). Every stage is a parallel
/// region that completes before the next one starts.
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    state: SimState,
    tick: usize,
    frames: usize,
    particles: Vec<Particle>,
    cells: CellList,
    force: ForcePass,
    velocity_scratch: Vec<Vec2>,
}

impl Simulation {
    /// Create an uninitialized simulation after validating `config`.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let cells = CellList::new(config.grid_size);
        let force = ForcePass {
            law: ForceLaw::from(&config),
            dt: config.dt,
            max_velocity: config.max_velocity,
        };
        Ok(Self {
            config,
            state: SimState::Uninitialized,
            tick: 0,
            frames: 0,
            particles: Vec::new(),
            cells,
            force,
            velocity_scratch: Vec::new(),
        })
    }

    /// Create a ready simulation from caller-placed particles.
    ///
    /// Positions are wrapped into the domain. Identities must be unique.
    pub fn from_particles(config: SimConfig, particles: Vec<Particle>) -> Result<Self> {
        let mut sim = Self::new(config)?;
        if particles.is_empty() {
            return Err(Error::InvalidParam("at least one particle is required".into()));
        }
        let mut seen = HashSet::with_capacity(particles.len());
        let n = sim.config.grid_size as f32;
        let mut placed = Vec::with_capacity(particles.len());
        for p in particles {
            if !seen.insert(p.id) {
                return Err(Error::InvalidParam(format!(
                    "duplicate particle identity {}",
                    p.id
                )));
            }
            let p = Particle::new(p.id, wrap_position(p.r, n), p.v)?;
            placed.push(p);
        }
        sim.particles = placed;
        sim.state = SimState::Ready;
        debug!(
            "placed {} particles on a {}x{} grid",
            sim.particles.len(),
            sim.config.grid_size,
            sim.config.grid_size
        );
        Ok(sim)
    }

    /// Place N*N particles uniformly at random with zero velocity.
    ///
    /// Errors: `Error::InvalidState` unless the simulation is uninitialized.
    pub fn initialize(&mut self) -> Result<()> {
        if self.state != SimState::Uninitialized {
            return Err(Error::InvalidState(format!(
                "initialize called in state {:?}",
                self.state
            )));
        }
        self.particles = generate_particles(
            self.config.particle_count(),
            self.config.grid_size,
            self.config.seed,
        )?;
        self.state = SimState::Ready;
        info!(
            "initialized {} particles on a {}x{} grid",
            self.particles.len(),
            self.config.grid_size,
            self.config.grid_size
        );
        Ok(())
    }

    /// Current driver state.
    pub fn state(&self) -> SimState {
        self.state
    }

    /// Number of completed ticks.
    pub fn tick(&self) -> usize {
        self.tick
    }

    /// Ticks left before the simulation is done.
    pub fn remaining_ticks(&self) -> usize {
        self.config.ticks.saturating_sub(self.tick)
    }

    /// Configuration this simulation was built with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Number of particles in the collection.
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Particles in their current (cell-sorted after the last rebuild) order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Copy of the boundary table as of the last rebuild.
    pub fn boundary_table(&self) -> Vec<usize> {
        self.cells.offsets()
    }

    /// Identity and position of every particle.
    pub fn records(&self) -> Vec<ParticleRecord> {
        self.particles.iter().map(ParticleRecord::from).collect()
    }

    /// Total kinetic energy for unit masses (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        self.particles
            .iter()
            .map(|p| f64::from(p.kinetic_energy()))
            .sum()
    }

    /// Re-sort the particles by cell and recompute the boundary table.
    pub fn rebuild_index(&mut self) {
        self.cells.rebuild(&mut self.particles);
    }

    /// Execute one tick.
    ///
    /// Errors: `Error::InvalidState` before initialization or once all
    /// configured ticks have run. A failed call leaves the state unchanged.
    pub fn step(&mut self) -> Result<()> {
        match self.state {
            SimState::Uninitialized => {
                return Err(Error::InvalidState("simulation is not initialized".into()))
            }
            SimState::Done => {
                return Err(Error::InvalidState(format!(
                    "all {} ticks have been executed",
                    self.config.ticks
                )))
            }
            SimState::Ready | SimState::Running => {}
        }
        if self.remaining_ticks() == 0 {
            return Err(Error::InvalidState("no ticks remaining".into()));
        }

        self.rebuild_index();
        self.force
            .apply(&mut self.particles, &self.cells, &mut self.velocity_scratch);
        update_positions(&mut self.particles, self.config.dt, self.config.grid_size);

        self.tick += 1;
        self.state = if self.remaining_ticks() == 0 {
            SimState::Done
        } else {
            SimState::Running
        };
        Ok(())
    }

    /// Run all remaining ticks, handing snapshots to `writer` at the configured cadence.
    ///
    /// Tick `t` (0-based) emits a frame when `t % snapshot_every == 0`.
    pub fn run(&mut self, writer: &mut dyn SnapshotWriter) -> Result<RunSummary> {
        if self.state == SimState::Uninitialized {
            return Err(Error::InvalidState("simulation is not initialized".into()));
        }
        let start = Instant::now();
        let first_tick = self.tick;
        let first_frame = self.frames;
        info!(
            "running {} ticks with {} particles",
            self.remaining_ticks(),
            self.particles.len()
        );

        while self.remaining_ticks() > 0 {
            self.step()?;
            self.maybe_snapshot(self.tick - 1, writer);
        }
        self.state = SimState::Done;

        let elapsed = start.elapsed();
        let ticks = self.tick - first_tick;
        let micros = elapsed.as_secs_f64() * 1.0e6;
        let mega_particles_per_second = if micros > 0.0 {
            ticks as f64 * self.particles.len() as f64 / micros
        } else {
            0.0
        };
        let summary = RunSummary {
            ticks,
            frames: self.frames - first_frame,
            elapsed,
            mega_particles_per_second,
        };
        info!(
            "elapsed: {:.3}s, efficiency: {:.3} mega-particles per second",
            elapsed.as_secs_f64(),
            mega_particles_per_second
        );
        Ok(summary)
    }

    fn maybe_snapshot(&mut self, tick: usize, writer: &mut dyn SnapshotWriter) {
        let every = self.config.snapshot_every;
        if every > 0 && tick % every == 0 {
            writer.write_frame(self.frames, &self.records());
            self.frames += 1;
        }
    }
}

/// Uniform random positions in [0, n)^2, zero velocity, identities 0..count.
fn generate_particles(count: usize, n: usize, seed: Option<u64>) -> Result<Vec<Particle>> {
    let count_u32 = u32::try_from(count)
        .map_err(|_| Error::InvalidParam(format!("{count} particles exceed the identity range")))?;
    let seed = seed.unwrap_or_else(|| rng().random());
    debug!("placing particles with seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);
    let n_f = n as f32;
    (0..count_u32)
        .map(|id| {
            let mut r = [0.0_f32; DIM];
            for r_k in r.iter_mut() {
                *r_k = rng.random_range(0.0..n_f);
            }
            Particle::at_rest(id, wrap_position(r, n_f))
        })
        .collect()
}
