//! Integration pass: drift positions by velocity and wrap them into the
//! periodic domain.

use crate::core::geometry::wrap_coordinate;
use crate::core::particle::Particle;
use rayon::prelude::*;

/// Advance positions by `dt * v` and wrap them back into [0, n).
///
/// Each particle is independent; velocities are only read.
pub fn update_positions(particles: &mut [Particle], dt: f32, n: usize) {
    let n_f = n as f32;
    particles.par_iter_mut().for_each(|p| {
        for k in 0..p.r.len() {
            p.r[k] = wrap_coordinate(p.r[k] + dt * p.v[k], n_f);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drift_without_crossing() {
        let mut ps = vec![Particle {
            id: 0,
            r: [1.0, 1.0],
            v: [0.5, -0.5],
        }];
        update_positions(&mut ps, 0.5, 4);
        assert_eq!(ps[0].r, [1.25, 0.75]);
        assert_eq!(ps[0].v, [0.5, -0.5]);
    }

    #[test]
    fn crossing_upper_and_lower_boundaries_wraps() {
        let mut ps = vec![Particle {
            id: 0,
            r: [3.9, 0.1],
            v: [1.0, -1.0],
        }];
        update_positions(&mut ps, 0.25, 4);
        assert!((ps[0].r[0] - 0.15).abs() < 1e-6);
        assert!((ps[0].r[1] - 3.85).abs() < 1e-6);
    }
}
