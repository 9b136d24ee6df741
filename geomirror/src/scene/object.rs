use crate::math::{Matrix4, Vector3};
use crate::scene::{Material, Shape};
use serde::{Serialize, Serializer};
use uuid::Uuid;

const SPHERE_SEGMENTS: u32 = 20;
const CYLINDER_SEGMENTS: u32 = 50;
const DOUBLE_SIDE: u32 = 2;

/// A renderable object as it is placed into a scene-graph slot: one shape with one material.
///
/// Serializes to a three.js object document. Ids are generated once on construction so that a
/// recorded command and its wire form refer to the same viewer objects.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub shape: Shape,
    pub material: Material,
    object_id: Uuid,
    geometry_id: Uuid,
    material_id: Uuid,
}

impl SceneObject {
    pub fn new(shape: Shape, material: Material) -> Self {
        SceneObject {
            shape,
            material,
            object_id: Uuid::new_v4(),
            geometry_id: Uuid::new_v4(),
            material_id: Uuid::new_v4(),
        }
    }

    /// Transform applied to the geometry inside the slot, before the slot transform.
    pub fn intrinsic_transform(&self) -> Matrix4<f32> {
        match self.shape {
            Shape::Ellipsoid { radii } => Matrix4::new_nonuniform_scaling(&radii),
            _ => Matrix4::identity(),
        }
    }

    fn geometry(&self) -> GeometryJson {
        let uuid = self.geometry_id;
        match self.shape {
            Shape::Box { extents } => GeometryJson::BoxGeometry {
                uuid,
                width: extents.x,
                height: extents.y,
                depth: extents.z,
            },
            Shape::Sphere { radius } => GeometryJson::sphere(uuid, radius),
            Shape::Ellipsoid { .. } => GeometryJson::sphere(uuid, 1.0),
            Shape::Cylinder { radius, height } => GeometryJson::CylinderGeometry {
                uuid,
                radius_top: radius,
                radius_bottom: radius,
                height,
                radial_segments: CYLINDER_SEGMENTS,
            },
        }
    }
}

pub(crate) fn column_major<S: Serializer>(matrix: &Matrix4<f32>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(matrix.as_slice())
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum GeometryJson {
    BoxGeometry {
        uuid: Uuid,
        width: f32,
        height: f32,
        depth: f32,
    },
    #[serde(rename_all = "camelCase")]
    SphereGeometry {
        uuid: Uuid,
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    #[serde(rename_all = "camelCase")]
    CylinderGeometry {
        uuid: Uuid,
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
}

impl GeometryJson {
    fn sphere(uuid: Uuid, radius: f32) -> Self {
        GeometryJson::SphereGeometry {
            uuid,
            radius,
            width_segments: SPHERE_SEGMENTS,
            height_segments: SPHERE_SEGMENTS,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MaterialJson {
    uuid: Uuid,
    #[serde(rename = "type")]
    kind: &'static str,
    color: u32,
    reflectivity: f32,
    side: u32,
    transparent: bool,
    opacity: f32,
    linewidth: f32,
    wireframe: bool,
    vertex_colors: bool,
}

#[derive(Serialize)]
struct MeshJson {
    uuid: Uuid,
    #[serde(rename = "type")]
    kind: &'static str,
    geometry: Uuid,
    material: Uuid,
    #[serde(serialize_with = "column_major")]
    matrix: Matrix4<f32>,
}

#[derive(Serialize)]
struct MetadataJson {
    version: f32,
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ObjectJson {
    metadata: MetadataJson,
    geometries: [GeometryJson; 1],
    materials: [MaterialJson; 1],
    object: MeshJson,
}

impl Serialize for SceneObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let material = MaterialJson {
            uuid: self.material_id,
            kind: "MeshPhongMaterial",
            color: self.material.color,
            reflectivity: self.material.reflectivity,
            side: DOUBLE_SIDE,
            transparent: self.material.opacity < 1.0,
            opacity: self.material.opacity,
            linewidth: 1.0,
            wireframe: false,
            vertex_colors: false,
        };

        ObjectJson {
            metadata: MetadataJson {
                version: 4.5,
                kind: "Object",
            },
            geometries: [self.geometry()],
            materials: [material],
            object: MeshJson {
                uuid: self.object_id,
                kind: "Mesh",
                geometry: self.geometry_id,
                material: self.material_id,
                matrix: self.intrinsic_transform(),
            },
        }
        .serialize(serializer)
    }
}
