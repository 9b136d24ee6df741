use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};

const VIEWER_ROOT: &str = "meshcat";

/// Slash-separated address of a node in the remote scene graph.
///
/// Every path starts below the viewer root, so `ScenePath::default().join("physics")` renders
/// as `/meshcat/physics`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ScenePath {
    segments: Vec<String>,
}

impl Default for ScenePath {
    fn default() -> Self {
        ScenePath {
            segments: vec![VIEWER_ROOT.to_string()],
        }
    }
}

impl ScenePath {
    /// Returns a child path. `name` may itself contain slashes; empty segments are dropped.
    pub fn join(&self, name: &str) -> ScenePath {
        let mut segments = self.segments.clone();
        segments.extend(
            name.split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string),
        );
        ScenePath { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment of the path.
    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// True if `self` is `ancestor` or lies below it.
    pub fn starts_with(&self, ancestor: &ScenePath) -> bool {
        self.segments.starts_with(&ancestor.segments)
    }

    pub fn parent(&self) -> Option<ScenePath> {
        let (_, parent) = self.segments.split_last()?;
        Some(ScenePath {
            segments: parent.to_vec(),
        })
    }
}

impl Display for ScenePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl Serialize for ScenePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
