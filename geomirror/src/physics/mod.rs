//! Physics simulation powered by rapier.

mod description;
mod simulation;
mod world;

pub use description::{DEFAULT_FIXED_TIMESTEP, GeomSpec, SceneDescription};
pub use simulation::{Simulation, SimulationError};
pub use world::PhysicsWorld;

pub use ::rapier3d;
