use crate::math::{Matrix3, Vector3, Vector4};
use crate::model::{GeomDesc, GeomKind, Pose};

/// Read-only access to the static geom table of a physics model.
///
/// Indices run from `0` to `geom_count() - 1` and stay stable for the lifetime of the model.
/// Out-of-range indices are a caller bug and may panic.
pub trait PhysicsModel {
    fn geom_count(&self) -> usize;
    fn geom_kind(&self, index: usize) -> GeomKind;
    fn geom_size(&self, index: usize) -> Vector3<f32>;
    fn geom_rgba(&self, index: usize) -> Vector4<f32>;
    fn geom_name(&self, index: usize) -> &str;
}

/// Read-only access to the current world-space geom poses of a physics state.
pub trait PhysicsState {
    fn geom_rotation(&self, index: usize) -> Matrix3<f32>;
    fn geom_position(&self, index: usize) -> Vector3<f32>;

    fn geom_pose(&self, index: usize) -> Pose {
        Pose::new(self.geom_rotation(index), self.geom_position(index))
    }
}

impl PhysicsModel for [GeomDesc] {
    fn geom_count(&self) -> usize {
        self.len()
    }

    fn geom_kind(&self, index: usize) -> GeomKind {
        self[index].kind
    }

    fn geom_size(&self, index: usize) -> Vector3<f32> {
        self[index].size
    }

    fn geom_rgba(&self, index: usize) -> Vector4<f32> {
        self[index].rgba
    }

    fn geom_name(&self, index: usize) -> &str {
        &self[index].name
    }
}

impl PhysicsModel for Vec<GeomDesc> {
    fn geom_count(&self) -> usize {
        self.as_slice().geom_count()
    }

    fn geom_kind(&self, index: usize) -> GeomKind {
        self.as_slice().geom_kind(index)
    }

    fn geom_size(&self, index: usize) -> Vector3<f32> {
        self.as_slice().geom_size(index)
    }

    fn geom_rgba(&self, index: usize) -> Vector4<f32> {
        self.as_slice().geom_rgba(index)
    }

    fn geom_name(&self, index: usize) -> &str {
        self.as_slice().geom_name(index)
    }
}

impl PhysicsState for [Pose] {
    fn geom_rotation(&self, index: usize) -> Matrix3<f32> {
        self[index].rotation
    }

    fn geom_position(&self, index: usize) -> Vector3<f32> {
        self[index].position
    }

    fn geom_pose(&self, index: usize) -> Pose {
        self[index]
    }
}

impl PhysicsState for Vec<Pose> {
    fn geom_rotation(&self, index: usize) -> Matrix3<f32> {
        self.as_slice().geom_rotation(index)
    }

    fn geom_position(&self, index: usize) -> Vector3<f32> {
        self.as_slice().geom_position(index)
    }

    fn geom_pose(&self, index: usize) -> Pose {
        self.as_slice().geom_pose(index)
    }
}
