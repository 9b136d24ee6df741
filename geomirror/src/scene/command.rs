use crate::math::Matrix4;
use crate::scene::object::column_major;
use crate::scene::{SceneObject, ScenePath};
use serde::Serialize;

/// One operation on the remote scene graph.
///
/// Serialized with a `type` tag, e.g.
/// `{"type":"set_transform","path":"/meshcat/physics/a","matrix":[...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneCommand {
    /// Removes the node and everything below it.
    Delete { path: ScenePath },
    /// Replaces the object held by the node.
    SetObject { path: ScenePath, object: SceneObject },
    /// Replaces the node's transform. `matrix` is sent column-major.
    SetTransform {
        path: ScenePath,
        #[serde(serialize_with = "column_major")]
        matrix: Matrix4<f32>,
    },
}

impl SceneCommand {
    pub fn path(&self) -> &ScenePath {
        match self {
            SceneCommand::Delete { path }
            | SceneCommand::SetObject { path, .. }
            | SceneCommand::SetTransform { path, .. } => path,
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            SceneCommand::Delete { .. } => "delete",
            SceneCommand::SetObject { .. } => "set_object",
            SceneCommand::SetTransform { .. } => "set_transform",
        }
    }
}
