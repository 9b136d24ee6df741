//! Drives a [`SceneMirror`] from a hand-written physics model, without any simulation.
//!
//! The commands are recorded in memory and printed in the same JSON form a viewer bridge
//! would receive.

use geomirror::math::{Rotation3, Vector3, Vector4};
use geomirror::scene::RecordingScene;
use geomirror::{GeomDesc, GeomKind, Pose, SceneMirror};
use std::error::Error;
use std::f32::consts::TAU;
use tracing::info;

const FRAMES: usize = 8;

fn main() -> Result<(), Box<dyn Error>> {
    geomirror_utils::init_logging();

    let model = vec![
        GeomDesc::new("hub", GeomKind::Cylinder, Vector3::new(0.2, 0.05, 0.0), Vector4::new(0.6, 0.6, 0.6, 1.0)),
        GeomDesc::new("moon", GeomKind::Sphere, Vector3::new(0.1, 0.0, 0.0), Vector4::new(0.9, 0.9, 1.0, 1.0)),
        GeomDesc::new("ground", GeomKind::Plane, Vector3::new(1.0, 1.0, 0.1), Vector4::new(0.2, 0.2, 0.2, 1.0)),
    ];
    let mut poses = vec![Pose::identity(); model.len()];

    let mut mirror = SceneMirror::new(RecordingScene::new(), &model, &poses)?;

    for frame in 0..FRAMES {
        let angle = frame as f32 / FRAMES as f32 * TAU;
        let spin = Rotation3::from_axis_angle(&Vector3::z_axis(), angle);

        poses[0] = Pose::new(spin.into_inner(), Vector3::zeros());
        poses[1] = Pose::at(spin * Vector3::new(0.6, 0.0, 0.2));
        mirror.render(&poses)?;
    }

    let scene = mirror.into_scene();
    for command in scene.history() {
        println!("{}", serde_json::to_string(command)?);
    }

    info!(
        "{} commands for {} scene nodes",
        scene.history().len(),
        scene.node_count()
    );

    Ok(())
}
