//! Short-range force pass over the cell list.

use crate::core::geometry::{periodic_image, ForceLaw};
use crate::core::grid::{cell_coords, CellList};
use crate::core::particle::{Particle, Vec2};
use rayon::prelude::*;

/// Time stepping and stability parameters of the force pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForcePass {
    /// Pair acceleration law.
    pub law: ForceLaw,
    /// Time step used to integrate accelerations into velocities.
    pub dt: f32,
    /// Upper clamp on each velocity component. No lower clamp is applied.
    pub max_velocity: f32,
}

impl ForcePass {
    /// Velocity of `particle` after one force step, reading neighbors from `particles`.
    ///
    /// Every interaction partner is within the cutoff of at most one cell, so
    /// only the particle's own cell and its eight periodic neighbors are visited.
    pub fn updated_velocity(
        &self,
        particle: &Particle,
        particles: &[Particle],
        cells: &CellList,
    ) -> Vec2 {
        let n = cells.grid_size();
        let n_i = n as i64;
        let (ix, iy) = cell_coords(particle.r, n);
        let mut v = particle.v;

        for dx in -1_i64..=1 {
            for dy in -1_i64..=1 {
                let cx = ix as i64 + dx;
                let cy = iy as i64 + dy;
                let nb = cy.rem_euclid(n_i) as usize + n * cx.rem_euclid(n_i) as usize;

                for other in &particles[cells.range(nb, particles.len())] {
                    if other.id == particle.id {
                        continue;
                    }
                    let image = periodic_image(other.r, cx, cy, n);
                    let a = self.law.acceleration(particle.r, image);
                    v[0] += self.dt * a[0];
                    v[1] += self.dt * a[1];
                }
            }
        }

        v[0] = v[0].min(self.max_velocity);
        v[1] = v[1].min(self.max_velocity);
        v
    }

    /// Update every particle's velocity. Positions are not touched.
    ///
    /// New velocities are computed against the frozen particle slice into
    /// `scratch`, then written back in a second parallel region.
    pub fn apply(&self, particles: &mut [Particle], cells: &CellList, scratch: &mut Vec<Vec2>) {
        {
            let frozen: &[Particle] = particles;
            frozen
                .par_iter()
                .map(|p| self.updated_velocity(p, frozen, cells))
                .collect_into_vec(scratch);
        }
        particles
            .par_iter_mut()
            .zip(scratch.par_iter())
            .for_each(|(p, v)| p.v = *v);
    }
}
