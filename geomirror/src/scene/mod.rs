//! Client side of the remote scene graph: paths, renderable objects, commands and the two
//! [`SceneGraph`] implementations (in-memory and streamed to a viewer bridge).

pub mod command;
pub mod graph;
pub mod material;
pub mod object;
pub mod path;
pub mod recording;
pub mod remote;
pub mod shape;

pub use command::SceneCommand;
pub use graph::{SceneError, SceneGraph};
pub use material::{Material, pack_rgb};
pub use object::SceneObject;
pub use path::ScenePath;
pub use recording::{RecordingScene, SceneNode};
pub use remote::{RemoteScene, TcpScene};
pub use shape::Shape;
