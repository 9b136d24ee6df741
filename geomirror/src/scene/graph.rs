use crate::math::Matrix4;
use crate::scene::{SceneCommand, SceneObject, ScenePath};
use snafu::Snafu;
use std::net::SocketAddr;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)), visibility(pub(crate)))]
pub enum SceneError {
    #[snafu(display("Could not connect to the viewer bridge at {address}: {source}"))]
    Connect {
        address: SocketAddr,
        source: std::io::Error,
    },

    #[snafu(display("Failed to encode {kind} command for {path}: {source}"))]
    Encode {
        kind: &'static str,
        path: ScenePath,
        source: serde_json::Error,
    },

    #[snafu(display("Lost connection to the viewer bridge: {source}"))]
    Io { source: std::io::Error },
}

/// A path-addressed scene graph that accepts delete / set-object / set-transform operations.
pub trait SceneGraph {
    fn send(&mut self, command: SceneCommand) -> Result<(), SceneError>;

    /// Pushes out anything the client buffered.
    fn flush(&mut self) -> Result<(), SceneError> {
        Ok(())
    }

    fn delete(&mut self, path: &ScenePath) -> Result<(), SceneError> {
        self.send(SceneCommand::Delete { path: path.clone() })
    }

    fn set_object(&mut self, path: &ScenePath, object: SceneObject) -> Result<(), SceneError> {
        self.send(SceneCommand::SetObject {
            path: path.clone(),
            object,
        })
    }

    fn set_transform(&mut self, path: &ScenePath, matrix: &Matrix4<f32>) -> Result<(), SceneError> {
        self.send(SceneCommand::SetTransform {
            path: path.clone(),
            matrix: *matrix,
        })
    }
}

impl<G: SceneGraph + ?Sized> SceneGraph for &mut G {
    fn send(&mut self, command: SceneCommand) -> Result<(), SceneError> {
        (**self).send(command)
    }

    fn flush(&mut self) -> Result<(), SceneError> {
        (**self).flush()
    }
}

impl<G: SceneGraph + ?Sized> SceneGraph for Box<G> {
    fn send(&mut self, command: SceneCommand) -> Result<(), SceneError> {
        (**self).send(command)
    }

    fn flush(&mut self) -> Result<(), SceneError> {
        (**self).flush()
    }
}
