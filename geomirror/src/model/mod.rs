//! The read-only view the mirror has of a physics simulation.
//!
//! [`PhysicsModel`] exposes the static geom table and [`PhysicsState`] the per-frame poses.
//! Both are implemented for plain geom/pose vectors and for the rapier-backed
//! [`Simulation`](crate::physics::Simulation).

pub mod geom;
pub mod provider;

pub use geom::*;
pub use provider::*;
