use cellsim::core::{Particle, SimState};
use cellsim::error::Result;
use cellsim::{SimConfig, Simulation};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn config(n: usize, ticks: usize, gravity_factor: f32) -> SimConfig {
    SimConfig {
        grid_size: n,
        ticks,
        gravity_factor,
        snapshot_every: 0,
        seed: Some(99),
        ..SimConfig::default()
    }
}

fn find(sim: &Simulation, id: u32) -> Particle {
    *sim
        .particles()
        .iter()
        .find(|p| p.id == id)
        .expect("identity survives reordering")
}

/// A lone particle at rest never moves.
#[test]
fn lone_particle_stays_put() -> Result<()> {
    let start = [1.3, 2.7];
    let mut sim = Simulation::from_particles(
        config(3, 50, 1.0),
        vec![Particle::at_rest(0, start)?],
    )?;
    for _ in 0..50 {
        sim.step()?;
    }
    assert_eq!(sim.state(), SimState::Done);
    assert_eq!(find(&sim, 0).r, start);
    assert_eq!(find(&sim, 0).v, [0.0, 0.0]);
    Ok(())
}

/// Particles exactly one unit apart do not interact.
#[test]
fn separation_at_cutoff_gives_zero_acceleration() -> Result<()> {
    let particles = vec![
        Particle::at_rest(0, [1.0, 1.5])?,
        Particle::at_rest(1, [2.0, 1.5])?,
    ];
    let mut sim = Simulation::from_particles(config(4, 1, 1.0e-3), particles)?;
    sim.step()?;
    assert_eq!(find(&sim, 0).v, [0.0, 0.0]);
    assert_eq!(find(&sim, 1).v, [0.0, 0.0]);
    Ok(())
}

/// Just inside the cutoff the pair attracts along the separation vector.
#[test]
fn separation_inside_cutoff_accelerates_along_axis() -> Result<()> {
    let particles = vec![
        Particle::at_rest(0, [1.0, 1.5])?,
        Particle::at_rest(1, [1.999, 1.5])?,
    ];
    let mut sim = Simulation::from_particles(config(4, 1, 1.0e-3), particles)?;
    sim.step()?;
    let p0 = find(&sim, 0);
    let p1 = find(&sim, 1);
    assert!(p0.v[0] > 0.0, "p0 should move towards p1, v = {:?}", p0.v);
    assert!(p1.v[0] < 0.0, "p1 should move towards p0, v = {:?}", p1.v);
    assert_eq!(p0.v[1], 0.0);
    assert_eq!(p1.v[1], 0.0);
    assert!((p0.v[0] + p1.v[0]).abs() < 1e-9);
    Ok(())
}

/// The pair interaction also works through the periodic seam in both axes.
#[test]
fn interaction_through_corner_seam() -> Result<()> {
    let particles = vec![
        Particle::at_rest(0, [0.1, 0.1])?,
        Particle::at_rest(1, [3.9, 3.9])?,
    ];
    let mut sim = Simulation::from_particles(config(4, 1, 1.0e-3), particles)?;
    sim.step()?;
    let v0 = find(&sim, 0).v;
    let v1 = find(&sim, 1).v;
    assert!(v0[0] < 0.0 && v0[1] < 0.0, "v0 = {v0:?}");
    assert!(v1[0] > 0.0 && v1[1] > 0.0, "v1 = {v1:?}");
    Ok(())
}

/// Nearest image 1.05 apart through the x seam: out of range, no kick.
#[test]
fn beyond_cutoff_through_seam_does_not_interact() -> Result<()> {
    let particles = vec![
        Particle::at_rest(0, [0.1, 1.5])?,
        Particle::at_rest(1, [2.05, 1.5])?,
    ];
    let mut sim = Simulation::from_particles(config(3, 1, 1.0e-3), particles)?;
    sim.step()?;
    assert_eq!(find(&sim, 0).v, [0.0, 0.0]);
    assert_eq!(find(&sim, 1).v, [0.0, 0.0]);
    Ok(())
}

/// With no gravity, velocities are carried through unchanged.
#[test]
fn zero_gravity_preserves_velocities() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(5);
    let n = 6;
    let particles = (0..(n * n) as u32)
        .map(|id| {
            let r = [rng.random_range(0.0..n as f32), rng.random_range(0.0..n as f32)];
            let v = [rng.random_range(-0.5..0.5), rng.random_range(-0.5..0.5)];
            Particle::new(id, r, v)
        })
        .collect::<Result<Vec<_>>>()?;
    let before: Vec<Particle> = particles.clone();
    let mut sim = Simulation::from_particles(config(n, 25, 0.0), particles)?;
    for _ in 0..25 {
        sim.step()?;
    }
    for p in &before {
        assert_eq!(find(&sim, p.id).v, p.v, "velocity of {} drifted", p.id);
    }
    Ok(())
}

/// Positions stay in the domain, velocities under the ceiling, values finite.
#[test]
fn invariants_hold_under_strong_attraction() -> Result<()> {
    let n = 10;
    let cfg = config(n, 40, 5.0e-2);
    let ceiling = cfg.max_velocity;
    let mut sim = Simulation::new(cfg)?;
    sim.initialize()?;
    for _ in 0..40 {
        sim.step()?;
        for p in sim.particles() {
            assert!(
                p.r.iter().all(|&x| (0.0..n as f32).contains(&x)),
                "particle {} left the domain: {:?}",
                p.id,
                p.r
            );
            assert!(p.v.iter().all(|&c| c <= ceiling), "v = {:?}", p.v);
            assert!(p.v.iter().all(|c| c.is_finite()));
        }
    }
    Ok(())
}

/// Kinetic energy is a finite diagnostic that starts at zero.
#[test]
fn kinetic_energy_starts_at_zero() -> Result<()> {
    let mut sim = Simulation::new(config(5, 5, -1.0e-3))?;
    sim.initialize()?;
    assert_eq!(sim.kinetic_energy(), 0.0);
    for _ in 0..5 {
        sim.step()?;
    }
    assert!(sim.kinetic_energy().is_finite());
    Ok(())
}
