use crate::math::{Matrix3, Matrix4, Vector3};
use crate::model::{PhysicsModel, PhysicsState};
use crate::scene::{Material, SceneError, SceneGraph, SceneObject, ScenePath, Shape};
use tracing::{debug, warn};

/// Slot name every geom is placed under unless the mirror is built with [`SceneMirror::with_root`].
///
/// Viewers already laid out for MuJoCo scenes keep their geoms under `mujoco`; pass that to
/// [`SceneMirror::with_root`] to reuse them.
pub const DEFAULT_ROOT: &str = "physics";

/// Builds the homogeneous transform of a geom: `rotation` in the upper-left 3x3 block,
/// `position` in the last column and `[0, 0, 0, 1]` as the bottom row.
pub fn pose_matrix(rotation: &Matrix3<f32>, position: &Vector3<f32>) -> Matrix4<f32> {
    let mut mat = Matrix4::identity();
    mat.fixed_view_mut::<3, 3>(0, 0).copy_from(rotation);
    mat.fixed_view_mut::<3, 1>(0, 3).copy_from(position);
    mat
}

/// Keeps a remote scene graph in sync with the geoms of a physics model.
///
/// Construction clears the root slot and creates one object per supported geom. After that only
/// transforms are sent: the geom set of a model is fixed, so [`SceneMirror::render`] never
/// recreates or restyles anything.
pub struct SceneMirror<S: SceneGraph> {
    scene: S,
    root: ScenePath,
    slots: Vec<ScenePath>,
}

impl<S: SceneGraph> SceneMirror<S> {
    pub fn new<M, D>(scene: S, model: &M, state: &D) -> Result<Self, SceneError>
    where
        M: PhysicsModel + ?Sized,
        D: PhysicsState + ?Sized,
    {
        Self::with_root(scene, DEFAULT_ROOT, model, state)
    }

    /// Like [`SceneMirror::new`], but places every geom under `root` instead of the default slot.
    pub fn with_root<M, D>(scene: S, root: &str, model: &M, state: &D) -> Result<Self, SceneError>
    where
        M: PhysicsModel + ?Sized,
        D: PhysicsState + ?Sized,
    {
        let geom_count = model.geom_count();
        let mut mirror = SceneMirror {
            scene,
            root: ScenePath::default().join(root),
            slots: Vec::with_capacity(geom_count),
        };

        mirror.scene.delete(&mirror.root)?;
        for index in 0..geom_count {
            mirror.build_geom(model, state, index)?;
        }
        mirror.scene.flush()?;

        debug!(
            "[SceneMirror] Built {} slots under {}",
            mirror.slots.len(),
            mirror.root
        );

        Ok(mirror)
    }

    fn build_geom<M, D>(&mut self, model: &M, state: &D, index: usize) -> Result<(), SceneError>
    where
        M: PhysicsModel + ?Sized,
        D: PhysicsState + ?Sized,
    {
        let slot = self.unique_slot(model.geom_name(index), index);
        self.slots.push(slot.clone());

        let kind = model.geom_kind(index);
        let Some(shape) = Shape::from_geom(kind, &model.geom_size(index)) else {
            warn!("Geom {index} ({slot}) has kind \"{kind}\", which is not supported yet. Skipping it.");
            return Ok(());
        };

        debug!("[SceneMirror] {slot}: {} from {kind}", shape.name());

        let material = Material::from_rgba(&model.geom_rgba(index));
        let pose = state.geom_pose(index);
        let transform = pose_matrix(&pose.rotation, &pose.position);

        self.scene.set_object(&slot, SceneObject::new(shape, material))?;
        self.scene.set_transform(&slot, &transform)
    }

    /// Slot of geom `index`: its name below the root, or `geom_<index>` when the name is empty,
    /// resolves to the root itself or is already taken by an earlier geom.
    fn unique_slot(&self, name: &str, index: usize) -> ScenePath {
        let named = self.root.join(name);
        if named != self.root && !self.slots.contains(&named) {
            return named;
        }
        if !name.is_empty() {
            warn!("Geom {index} name \"{name}\" does not give a free slot under {}", self.root);
        }

        let fallback = format!("geom_{index}");
        let mut slot = self.root.join(&fallback);
        let mut suffix = 1;
        while self.slots.contains(&slot) {
            slot = self.root.join(&format!("{fallback}_{suffix}"));
            suffix += 1;
        }
        slot
    }

    /// Sends the current pose of geom `index` to its slot.
    pub fn update<D: PhysicsState + ?Sized>(&mut self, state: &D, index: usize) -> Result<(), SceneError> {
        let pose = state.geom_pose(index);
        let transform = pose_matrix(&pose.rotation, &pose.position);
        self.scene.set_transform(&self.slots[index], &transform)
    }

    /// Sends the current pose of every geom, then flushes the scene client.
    pub fn render<D: PhysicsState + ?Sized>(&mut self, state: &D) -> Result<(), SceneError> {
        for index in 0..self.slots.len() {
            self.update(state, index)?;
        }
        self.scene.flush()
    }

    /// Number of geoms the mirror was built for, including unsupported ones.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn root(&self) -> &ScenePath {
        &self.root
    }

    pub fn slot(&self, index: usize) -> Option<&ScenePath> {
        self.slots.get(index)
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn into_scene(self) -> S {
        self.scene
    }
}
