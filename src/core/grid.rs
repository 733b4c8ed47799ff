//! Uniform cell list over the N x N periodic lattice.
//!
//! After [`CellList::rebuild`] the particle slice is sorted by cell id and the
//! boundary table holds, for every cell, the offset of its first particle.
//! Empty cells hold the offset of the next occupied cell (or the particle
//! count when no occupied cell follows), so the table is non-decreasing and
//! `table[c]..table[c + 1]` is exactly the particles of cell `c`.

use crate::core::particle::{Particle, Vec2};
use rayon::prelude::*;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Integer cell coordinates of a position, clamped to [0, n-1] on each axis.
///
/// Round-off in the periodic wrap can produce a coordinate equal to `n`,
/// which belongs to the last cell.
#[inline]
pub fn cell_coords(r: Vec2, n: usize) -> (usize, usize) {
    let x = (r[0] as usize).min(n - 1);
    let y = (r[1] as usize).min(n - 1);
    (x, y)
}

/// Linear cell id `y + n * x` of a position.
#[inline]
pub fn cell_of(r: Vec2, n: usize) -> usize {
    let (x, y) = cell_coords(r, n);
    y + n * x
}

/// Sort `particles` by cell and scatter the per-cell start offsets into `table`.
///
/// Particles sharing a cell are ordered by identity, which makes the
/// permutation independent of how the parallel sort splits its work.
///
/// # Panics
/// If `table.len() != n * n`.
pub fn rebuild_cell_list(
    particles: &mut [Particle],
    table: &[AtomicUsize],
    cells: &mut Vec<usize>,
    n: usize,
) {
    assert_eq!(
        table.len(),
        n * n,
        "boundary table must have one slot per cell"
    );

    particles.par_sort_unstable_by_key(|p| (cell_of(p.r, n), p.id));

    particles
        .par_iter()
        .map(|p| cell_of(p.r, n))
        .collect_into_vec(cells);

    // Particle i owns the slots after its predecessor's cell up to its own
    // cell, so the writes of different particles never overlap.
    let cells = &cells[..];
    (0..cells.len()).into_par_iter().for_each(|i| {
        let idx = cells[i];
        let first = if i == 0 { 0 } else { cells[i - 1] + 1 };
        for slot in &table[first..=idx] {
            slot.store(i, Ordering::Relaxed);
        }
    });

    let tail = cells.last().map_or(0, |&c| c + 1);
    let count = particles.len();
    table[tail..]
        .par_iter()
        .for_each(|slot| slot.store(count, Ordering::Relaxed));
}

/// Boundary table of the cell list plus the scratch buffer used to build it.
#[derive(Debug)]
pub struct CellList {
    n: usize,
    table: Vec<AtomicUsize>,
    cells: Vec<usize>,
}

impl CellList {
    /// Empty cell list for an `n` x `n` lattice.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            table: (0..n * n).map(|_| AtomicUsize::new(0)).collect(),
            cells: Vec::new(),
        }
    }

    /// Lattice side length.
    #[inline]
    pub fn grid_size(&self) -> usize {
        self.n
    }

    /// Number of cells (n * n).
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.table.len()
    }

    /// Re-sort `particles` and recompute the boundary table from scratch.
    pub fn rebuild(&mut self, particles: &mut [Particle]) {
        rebuild_cell_list(particles, &self.table, &mut self.cells, self.n);
    }

    /// Offset of the first particle of `cell`.
    #[inline]
    pub fn offset(&self, cell: usize) -> usize {
        self.table[cell].load(Ordering::Relaxed)
    }

    /// Half-open range of particle indices belonging to `cell`.
    #[inline]
    pub fn range(&self, cell: usize, num_particles: usize) -> Range<usize> {
        let begin = self.offset(cell);
        let end = if cell + 1 == self.table.len() {
            num_particles
        } else {
            self.offset(cell + 1)
        };
        begin..end
    }

    /// Copy of the boundary table.
    pub fn offsets(&self) -> Vec<usize> {
        self.table.iter().map(|s| s.load(Ordering::Relaxed)).collect()
    }
}
