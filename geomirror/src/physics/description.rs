use crate::model::GeomKind;
use crate::physics::simulation::{ParseDescriptionErr, ReadDescriptionErr};
use crate::physics::SimulationError;
use bon::Builder;
use serde::Deserialize;
use snafu::ResultExt;
use std::path::Path;
use tracing::info;

pub const DEFAULT_FIXED_TIMESTEP: f64 = 0.002;

const EARTH_GRAVITY: f32 = 9.81;
const DEFAULT_RGBA: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

fn default_gravity() -> [f32; 3] {
    [0.0, 0.0, -EARTH_GRAVITY]
}

fn default_timestep() -> f64 {
    DEFAULT_FIXED_TIMESTEP
}

fn default_rgba() -> [f32; 4] {
    DEFAULT_RGBA
}

/// Scene loaded by a [`Simulation`](crate::physics::Simulation). The world is z-up.
///
/// ```json
/// {
///     "timestep": 0.002,
///     "geoms": [
///         { "name": "floor", "kind": "plane", "size": [5, 5, 0.1] },
///         { "name": "crate", "kind": "box", "size": [0.2, 0.2, 0.2], "position": [0, 0, 1] }
///     ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Builder)]
pub struct SceneDescription {
    #[serde(default = "default_gravity")]
    #[builder(default = default_gravity())]
    pub gravity: [f32; 3],
    /// Fixed internal physics step in seconds.
    #[serde(default = "default_timestep")]
    #[builder(default = DEFAULT_FIXED_TIMESTEP)]
    pub timestep: f64,
    #[serde(default)]
    #[builder(default)]
    pub geoms: Vec<GeomSpec>,
}

impl SceneDescription {
    pub fn from_json_str(json: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(json).context(ParseDescriptionErr)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).context(ReadDescriptionErr { path })?;
        let description = Self::from_json_str(&json)?;

        info!("Loaded {} geoms from {}", description.geoms.len(), path.display());

        Ok(description)
    }
}

impl Default for SceneDescription {
    fn default() -> Self {
        SceneDescription::builder().build()
    }
}

/// One geom of a [`SceneDescription`]. Every geom gets its own rigid body.
#[derive(Debug, Clone, PartialEq, Deserialize, Builder)]
pub struct GeomSpec {
    #[serde(default)]
    #[builder(into, default)]
    pub name: String,
    pub kind: GeomKind,
    #[serde(default)]
    #[builder(default)]
    pub size: [f32; 3],
    #[serde(default = "default_rgba")]
    #[builder(default = DEFAULT_RGBA)]
    pub rgba: [f32; 4],
    #[serde(default)]
    #[builder(default)]
    pub position: [f32; 3],
    /// Roll, pitch and yaw in radians.
    #[serde(default)]
    #[builder(default)]
    pub euler: [f32; 3],
    /// Fixed geoms never move. Planes are always fixed.
    #[serde(default)]
    #[builder(default)]
    pub fixed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let description: SceneDescription =
            serde_json::from_str(r#"{ "geoms": [{ "kind": "sphere", "size": [0.5, 0, 0] }] }"#).unwrap();

        assert_eq!(description.gravity, [0.0, 0.0, -EARTH_GRAVITY]);
        assert_eq!(description.timestep, DEFAULT_FIXED_TIMESTEP);

        let geom = &description.geoms[0];
        assert_eq!(geom.name, "");
        assert_eq!(geom.kind, GeomKind::Sphere);
        assert_eq!(geom.rgba, DEFAULT_RGBA);
        assert_eq!(geom.position, [0.0; 3]);
        assert!(!geom.fixed);
    }

    #[test]
    fn builder_matches_parsed_description() {
        let parsed: SceneDescription = serde_json::from_str(
            r#"{
                "timestep": 0.01,
                "geoms": [
                    { "name": "a", "kind": "box", "size": [1, 2, 3], "rgba": [1, 0, 0, 1], "fixed": true }
                ]
            }"#,
        )
        .unwrap();

        let built = SceneDescription::builder()
            .timestep(0.01)
            .geoms(vec![
                GeomSpec::builder()
                    .name("a")
                    .kind(GeomKind::Box)
                    .size([1.0, 2.0, 3.0])
                    .rgba([1.0, 0.0, 0.0, 1.0])
                    .fixed(true)
                    .build(),
            ])
            .build();

        assert_eq!(parsed, built);
    }

    #[test]
    fn empty_description_is_valid() {
        let description: SceneDescription = serde_json::from_str("{}").unwrap();
        assert_eq!(description, SceneDescription::default());
        assert!(description.geoms.is_empty());
    }
}
