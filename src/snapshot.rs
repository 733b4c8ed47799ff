//! Snapshot collaborators.
//!
//! The simulation hands a [`SnapshotWriter`] the (identity, position) pairs of
//! every particle at a fixed tick cadence. What happens to them, including
//! how write failures are handled, is up to the writer.

use crate::core::Particle;
use crate::error::Result;
use log::{debug, error};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// One particle's identity and position at snapshot time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleRecord {
    /// Particle identity.
    pub id: u32,
    /// Position x coordinate.
    pub x: f32,
    /// Position y coordinate.
    pub y: f32,
}

impl From<&Particle> for ParticleRecord {
    fn from(p: &Particle) -> Self {
        Self {
            id: p.id,
            x: p.r[0],
            y: p.r[1],
        }
    }
}

/// Receiver of periodic particle snapshots.
pub trait SnapshotWriter {
    /// Accept frame `frame`. Records are in the collection's current order.
    fn write_frame(&mut self, frame: usize, records: &[ParticleRecord]);
}

/// Discards every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSnapshotWriter;

impl SnapshotWriter for NullSnapshotWriter {
    fn write_frame(&mut self, _frame: usize, _records: &[ParticleRecord]) {}
}

/// Keeps every frame in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySnapshotWriter {
    /// Received frames as (frame number, records), in arrival order.
    pub frames: Vec<(usize, Vec<ParticleRecord>)>,
}

impl SnapshotWriter for MemorySnapshotWriter {
    fn write_frame(&mut self, frame: usize, records: &[ParticleRecord]) {
        self.frames.push((frame, records.to_vec()));
    }
}

/// Writes `pos_<frame>.txt` files, one `id x y` line per particle.
#[derive(Debug, Clone)]
pub struct TextSnapshotWriter {
    dir: PathBuf,
    failures: usize,
}

impl TextSnapshotWriter {
    /// Writer targeting `dir`, which is created if missing.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, failures: 0 })
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file for `frame`.
    pub fn frame_path(&self, frame: usize) -> PathBuf {
        self.dir.join(format!("pos_{frame}.txt"))
    }

    /// Number of frames that could not be written.
    pub fn failures(&self) -> usize {
        self.failures
    }

    fn try_write(&self, path: &Path, records: &[ParticleRecord]) -> std::io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        for rec in records {
            writeln!(
                out,
                "{:>10}{:>15}{:>15}",
                rec.id,
                significant(rec.x),
                significant(rec.y)
            )?;
        }
        out.flush()
    }
}

/// Format `x` with 6 significant digits, without trailing zeros.
fn significant(x: f32) -> String {
    const DIGITS: i32 = 6;
    if x == 0.0 || !x.is_finite() {
        return format!("{x}");
    }
    let magnitude = x.abs().log10().floor() as i32;
    if !(-5..DIGITS).contains(&magnitude) {
        return format!("{:.*e}", (DIGITS - 1) as usize, x);
    }
    let decimals = (DIGITS - 1 - magnitude).max(0) as usize;
    let s = format!("{x:.decimals$}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

impl SnapshotWriter for TextSnapshotWriter {
    fn write_frame(&mut self, frame: usize, records: &[ParticleRecord]) {
        let path = self.frame_path(frame);
        match self.try_write(&path, records) {
            Ok(()) => debug!("wrote snapshot {} ({} particles)", path.display(), records.len()),
            Err(e) => {
                self.failures += 1;
                error!("failed to write snapshot {}: {e}", path.display());
            }
        }
    }
}
