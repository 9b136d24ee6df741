use crate::math::Vector3;
use crate::model::GeomKind;

/// Viewer-side geometry a geom is displayed as.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape {
    /// Full extents along x, y and z.
    Box { extents: Vector3<f32> },
    Sphere { radius: f32 },
    /// A unit sphere scaled by `radii`.
    Ellipsoid { radii: Vector3<f32> },
    /// Axis-aligned with the local y axis of the viewer object.
    Cylinder { radius: f32, height: f32 },
}

impl Shape {
    /// Maps a geom to the shape it is rendered as, or `None` if the kind has no renderable.
    ///
    /// Capsules are drawn as plain cylinders of the same radius and body height; the
    /// hemispherical caps are not rendered.
    pub fn from_geom(kind: GeomKind, size: &Vector3<f32>) -> Option<Shape> {
        match kind {
            GeomKind::Box => Some(Shape::Box { extents: size * 2.0 }),
            GeomKind::Sphere => Some(Shape::Sphere { radius: size.x }),
            GeomKind::Ellipsoid => Some(Shape::Ellipsoid { radii: *size }),
            GeomKind::Cylinder | GeomKind::Capsule => Some(Shape::Cylinder {
                radius: size.x,
                height: 2.0 * size.y,
            }),
            GeomKind::Plane | GeomKind::HeightField | GeomKind::Mesh => None,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Shape::Box { .. } => "box",
            Shape::Sphere { .. } => "sphere",
            Shape::Ellipsoid { .. } => "ellipsoid",
            Shape::Cylinder { .. } => "cylinder",
        }
    }
}
