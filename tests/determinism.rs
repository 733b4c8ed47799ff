use cellsim::core::Particle;
use cellsim::{MemorySnapshotWriter, SimConfig, Simulation};

type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

fn config() -> SimConfig {
    SimConfig {
        grid_size: 12,
        ticks: 60,
        gravity_factor: -2.0e-3,
        snapshot_every: 20,
        seed: Some(31337),
        ..SimConfig::default()
    }
}

fn final_state(threads: usize) -> std::result::Result<Vec<Particle>, Box<dyn std::error::Error>> {
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    let particles = pool.install(|| -> cellsim::Result<Vec<Particle>> {
        let mut sim = Simulation::new(config())?;
        sim.initialize()?;
        sim.run(&mut MemorySnapshotWriter::default())?;
        Ok(sim.particles().to_vec())
    })?;
    Ok(particles)
}

/// Repeated runs with the same seed agree bit for bit.
#[test]
fn same_seed_same_trajectory() -> TestResult {
    let a = final_state(2)?;
    let b = final_state(2)?;
    assert_eq!(a, b);
    Ok(())
}

/// The result does not depend on the number of worker threads.
#[test]
fn independent_of_thread_count() -> TestResult {
    let serial = final_state(1)?;
    for threads in [2, 3, 8] {
        let parallel = final_state(threads)?;
        assert_eq!(serial, parallel, "mismatch with {threads} threads");
    }
    Ok(())
}

/// Snapshot frames are identical across runs and carry every identity once.
#[test]
fn snapshots_are_reproducible() -> TestResult {
    let mut frames = Vec::new();
    for _ in 0..2 {
        let mut sim = Simulation::new(config())?;
        sim.initialize()?;
        let mut writer = MemorySnapshotWriter::default();
        sim.run(&mut writer)?;
        frames.push(writer.frames);
    }
    assert_eq!(frames[0], frames[1]);
    assert_eq!(frames[0].len(), 3);
    for (_, records) in &frames[0] {
        let mut ids: Vec<u32> = records.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..144).collect::<Vec<u32>>());
    }
    Ok(())
}
