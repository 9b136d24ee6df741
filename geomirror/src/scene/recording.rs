use crate::math::Matrix4;
use crate::scene::{SceneCommand, SceneError, SceneGraph, SceneObject, ScenePath};
use std::collections::BTreeMap;
use tracing::trace;

/// A node of the [`RecordingScene`].
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub object: Option<SceneObject>,
    pub transform: Matrix4<f32>,
}

impl Default for SceneNode {
    fn default() -> Self {
        SceneNode {
            object: None,
            transform: Matrix4::identity(),
        }
    }
}

/// In-memory scene graph that applies commands the way the viewer does and keeps a history.
///
/// Used for headless runs and to inspect what a mirror would have sent.
#[derive(Debug, Default)]
pub struct RecordingScene {
    nodes: BTreeMap<ScenePath, SceneNode>,
    history: Vec<SceneCommand>,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, path: &ScenePath) -> Option<&SceneNode> {
        self.nodes.get(path)
    }

    pub fn object(&self, path: &ScenePath) -> Option<&SceneObject> {
        self.node(path)?.object.as_ref()
    }

    pub fn transform(&self, path: &ScenePath) -> Option<&Matrix4<f32>> {
        self.node(path).map(|node| &node.transform)
    }

    /// All nodes that currently hold an object, in path order.
    pub fn objects(&self) -> impl Iterator<Item = (&ScenePath, &SceneObject)> {
        self.nodes
            .iter()
            .filter_map(|(path, node)| Some((path, node.object.as_ref()?)))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Every command received so far, oldest first.
    pub fn history(&self) -> &[SceneCommand] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn apply(&mut self, command: &SceneCommand) {
        match command {
            SceneCommand::Delete { path } => {
                self.nodes.retain(|node_path, _| !node_path.starts_with(path));
            }
            SceneCommand::SetObject { path, object } => {
                self.nodes.entry(path.clone()).or_default().object = Some(object.clone());
            }
            SceneCommand::SetTransform { path, matrix } => {
                self.nodes.entry(path.clone()).or_default().transform = *matrix;
            }
        }
    }
}

impl SceneGraph for RecordingScene {
    fn send(&mut self, command: SceneCommand) -> Result<(), SceneError> {
        trace!("[RecordingScene] {} {}", command.kind(), command.path());
        self.apply(&command);
        self.history.push(command);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use crate::scene::{Material, Shape};

    fn sphere() -> SceneObject {
        SceneObject::new(Shape::Sphere { radius: 1.0 }, Material::default())
    }

    #[test]
    fn set_transform_creates_missing_node() {
        let mut scene = RecordingScene::new();
        let path = ScenePath::default().join("physics/a");
        let matrix = Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0));

        scene.set_transform(&path, &matrix).unwrap();

        assert_eq!(scene.transform(&path), Some(&matrix));
        assert!(scene.object(&path).is_none());
    }

    #[test]
    fn set_object_keeps_transform() {
        let mut scene = RecordingScene::new();
        let path = ScenePath::default().join("physics/a");
        let matrix = Matrix4::new_translation(&Vector3::new(1.0, 0.0, 0.0));

        scene.set_transform(&path, &matrix).unwrap();
        scene.set_object(&path, sphere()).unwrap();

        assert_eq!(scene.transform(&path), Some(&matrix));
        assert!(scene.object(&path).is_some());
    }

    #[test]
    fn delete_removes_subtree_only() {
        let mut scene = RecordingScene::new();
        let root = ScenePath::default().join("physics");
        let other = ScenePath::default().join("physics_extra");

        scene.set_object(&root.join("a"), sphere()).unwrap();
        scene.set_object(&root.join("a/b"), sphere()).unwrap();
        scene.set_object(&other, sphere()).unwrap();

        scene.delete(&root).unwrap();

        assert_eq!(scene.node_count(), 1);
        assert!(scene.object(&other).is_some());
    }

    #[test]
    fn history_records_in_order() {
        let mut scene = RecordingScene::new();
        let path = ScenePath::default().join("physics");

        scene.delete(&path).unwrap();
        scene.set_object(&path, sphere()).unwrap();
        scene.set_transform(&path, &Matrix4::identity()).unwrap();

        let kinds: Vec<_> = scene.history().iter().map(SceneCommand::kind).collect();
        assert_eq!(kinds, ["delete", "set_object", "set_transform"]);

        scene.clear_history();
        assert!(scene.history().is_empty());
        assert_eq!(scene.node_count(), 1);
    }
}
