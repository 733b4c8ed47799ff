//! Command-line runner.
//!
//! Usage:
//!   cellsim [CONFIG.json] [OUTPUT_DIR]
//!
//! Without a config file the default parameters are used. Snapshots are
//! written as `OUTPUT_DIR/pos_<frame>.txt` (default: current directory)
//! unless `snapshot_every` is 0. Set `RUST_LOG=info` for progress output.

use cellsim::{NullSnapshotWriter, SimConfig, Simulation, SnapshotWriter, TextSnapshotWriter};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

fn run(config_path: Option<PathBuf>, output_dir: PathBuf) -> cellsim::Result<()> {
    let config = match config_path {
        Some(path) => {
            info!("loading config from {}", path.display());
            SimConfig::from_json_file(path)?
        }
        None => SimConfig::default(),
    };

    let mut writer: Box<dyn SnapshotWriter> = if config.snapshot_every > 0 {
        Box::new(TextSnapshotWriter::new(output_dir)?)
    } else {
        Box::new(NullSnapshotWriter)
    };

    let mut sim = Simulation::new(config)?;
    sim.initialize()?;
    let summary = sim.run(writer.as_mut())?;

    println!("Elapsed: {}s", summary.elapsed.as_secs_f64());
    println!(
        "Efficiency: {} Mega-Particles-per-second",
        summary.mega_particles_per_second
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let output_dir = args.next().map_or_else(|| PathBuf::from("."), PathBuf::from);

    match run(config_path, output_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("cellsim: {e}");
            ExitCode::FAILURE
        }
    }
}
