//! Simulation core: particles, periodic geometry, the cell list, the force and
//! integration passes, and the driver that sequences them.

pub mod forces;
pub mod geometry;
pub mod grid;
pub mod integrate;
pub mod particle;
pub mod sim;

pub use forces::ForcePass;
pub use geometry::ForceLaw;
pub use grid::{cell_of, CellList};
pub use particle::{Particle, Vec2, DIM};
pub use sim::{RunSummary, SimState, Simulation};
