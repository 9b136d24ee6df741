//! Mirrors the geoms of a rigid-body simulation into a remote, path-addressed 3D scene graph.
//!
//! A [`SceneMirror`] builds one renderable object per geom once, then copies every geom's pose
//! into its scene-graph slot each time it renders.

pub mod app;
pub mod math;
pub mod mirror;
pub mod model;
pub mod physics;
pub mod scene;
pub mod utils;

pub use app::{AppError, Application, RunSettings};
pub use mirror::{DEFAULT_ROOT, SceneMirror, pose_matrix};
pub use model::{GeomDesc, GeomKind, PhysicsModel, PhysicsState, Pose};
pub use physics::{SceneDescription, Simulation, SimulationError};
pub use scene::{RecordingScene, RemoteScene, SceneError, SceneGraph, ScenePath};

pub use ::tracing;
pub use geomirror_utils::debug_panic;
