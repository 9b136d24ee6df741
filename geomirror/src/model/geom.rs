use crate::math::{Matrix3, Vector3, Vector4};
use serde::Deserialize;
use std::fmt::{Display, Formatter};

/// Shape tag of a simulated geom.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeomKind {
    Plane,
    HeightField,
    Sphere,
    Capsule,
    Ellipsoid,
    Cylinder,
    Box,
    Mesh,
}

impl GeomKind {
    pub const fn name(self) -> &'static str {
        match self {
            GeomKind::Plane => "plane",
            GeomKind::HeightField => "heightfield",
            GeomKind::Sphere => "sphere",
            GeomKind::Capsule => "capsule",
            GeomKind::Ellipsoid => "ellipsoid",
            GeomKind::Cylinder => "cylinder",
            GeomKind::Box => "box",
            GeomKind::Mesh => "mesh",
        }
    }
}

impl Display for GeomKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Static description of one geom. Never changes after the model is built.
///
/// `size` is interpreted per kind: half-extents for boxes, `(radius, half-height, _)` for
/// cylinders and capsules, radii for ellipsoids and `(radius, _, _)` for spheres.
#[derive(Debug, Clone, PartialEq)]
pub struct GeomDesc {
    pub name: String,
    pub kind: GeomKind,
    pub size: Vector3<f32>,
    pub rgba: Vector4<f32>,
}

impl GeomDesc {
    pub fn new(name: impl Into<String>, kind: GeomKind, size: Vector3<f32>, rgba: Vector4<f32>) -> Self {
        GeomDesc {
            name: name.into(),
            kind,
            size,
            rgba,
        }
    }
}

/// World-space orientation and position of a geom for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pose {
    pub rotation: Matrix3<f32>,
    pub position: Vector3<f32>,
}

impl Default for Pose {
    fn default() -> Self {
        Pose::identity()
    }
}

impl Pose {
    pub fn new(rotation: Matrix3<f32>, position: Vector3<f32>) -> Self {
        Pose { rotation, position }
    }

    pub fn identity() -> Self {
        Pose {
            rotation: Matrix3::identity(),
            position: Vector3::zeros(),
        }
    }

    pub fn at(position: Vector3<f32>) -> Self {
        Pose {
            rotation: Matrix3::identity(),
            position,
        }
    }
}
