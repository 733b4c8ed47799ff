//! Periodic-boundary geometry and the pairwise acceleration law.

use crate::config::SimConfig;
use crate::core::particle::{Vec2, DIM};

/// Parameters of the short-range inverse-square law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceLaw {
    /// The G * m1 * m2 prefactor.
    pub gravity_factor: f32,
    /// Distances below this are raised to it.
    pub min_distance: f32,
    /// Pairs at or beyond this distance do not interact.
    pub cutoff: f32,
}

impl From<&SimConfig> for ForceLaw {
    fn from(cfg: &SimConfig) -> Self {
        Self {
            gravity_factor: cfg.gravity_factor,
            min_distance: cfg.min_distance,
            cutoff: cfg.cutoff,
        }
    }
}

impl ForceLaw {
    /// Acceleration felt by a particle at `from` due to one at `to`.
    ///
    /// `gravity_factor * (to - from) / d^3` with `d` floored at `min_distance`,
    /// and exactly zero once `d >= cutoff`.
    #[inline]
    pub fn acceleration(&self, from: Vec2, to: Vec2) -> Vec2 {
        let sep = [to[0] - from[0], to[1] - from[1]];
        let d = (sep[0] * sep[0] + sep[1] * sep[1]).sqrt();
        let d = d.max(self.min_distance);
        if !(d < self.cutoff) {
            return [0.0; DIM];
        }
        let inv_d3 = 1.0 / (d * d * d);
        [
            self.gravity_factor * sep[0] * inv_d3,
            self.gravity_factor * sep[1] * inv_d3,
        ]
    }
}

/// Wrap one coordinate into [0, n).
///
/// A single crossing is corrected by +-n. Larger excursions fall back to a
/// Euclidean remainder, and a result that rounds up to `n` is mapped to 0.
#[inline]
pub fn wrap_coordinate(x: f32, n: f32) -> f32 {
    let mut x = x;
    if x >= n {
        x -= n;
    } else if x < 0.0 {
        x += n;
    }
    if x.is_finite() && !(0.0..n).contains(&x) {
        x = x.rem_euclid(n);
        if x >= n {
            x = 0.0;
        }
    }
    x
}

/// Wrap both coordinates into [0, n).
#[inline]
pub fn wrap_position(r: Vec2, n: f32) -> Vec2 {
    [wrap_coordinate(r[0], n), wrap_coordinate(r[1], n)]
}

/// Shift `pos` to the periodic image seen from an unwrapped neighbor cell.
///
/// `cell_x`/`cell_y` are the neighbor's cell coordinates before wrapping,
/// so they may be -1 or `n`. A neighbor found past the upper seam lives at
/// `pos + n`, one past the lower seam at `pos - n`.
#[inline]
pub fn periodic_image(pos: Vec2, cell_x: i64, cell_y: i64, n: usize) -> Vec2 {
    let n_i = n as i64;
    let n_f = n as f32;
    let mut out = pos;
    for (k, c) in [cell_x, cell_y].into_iter().enumerate() {
        if c >= n_i {
            out[k] += n_f;
        } else if c < 0 {
            out[k] -= n_f;
        }
    }
    out
}
