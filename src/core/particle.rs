use crate::error::{Error, Result};

/// Fixed spatial dimension (2D).
pub const DIM: usize = 2;

/// Two-component vector used for positions, velocities and accelerations.
pub type Vec2 = [f32; DIM];

/// A point particle in the periodic domain.
///
/// Fields:
/// - `id`: stable identifier, assigned at creation and never reused
/// - `r`: position [x, y], kept inside [0, N) on both axes
/// - `v`: velocity [vx, vy]
///
/// The particle collection is reordered every tick, so `id` is the only
/// durable handle on a particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Stable particle identifier.
    pub id: u32,
    /// Position (x, y).
    pub r: Vec2,
    /// Velocity (vx, vy).
    pub v: Vec2,
}

impl Particle {
    /// Create a new particle after validating that all components are finite.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if any position or velocity component is NaN/inf.
    pub fn new(id: u32, r: Vec2, v: Vec2) -> Result<Self> {
        if !r.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !v.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        Ok(Self { id, r, v })
    }

    /// Particle at rest at `r`.
    pub fn at_rest(id: u32, r: Vec2) -> Result<Self> {
        Self::new(id, r, [0.0; DIM])
    }

    /// Kinetic energy for unit mass: 1/2 |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        let vsq: f32 = self.v.iter().map(|&c| c * c).sum();
        0.5 * vsq
    }
}
