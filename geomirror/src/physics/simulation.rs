//! A rigid-body simulation that exposes its geoms through [`PhysicsModel`] and
//! [`PhysicsState`].
//!
//! Every geom of the [`SceneDescription`] becomes one rapier body carrying one collider, so the
//! world pose of a geom is the pose of its body.

use crate::model::{GeomDesc, GeomKind, PhysicsModel, PhysicsState, Pose};
use crate::physics::{GeomSpec, PhysicsWorld, SceneDescription};
use delegate::delegate;
use geomirror_utils::debug_panic;
use itertools::iproduct;
use nalgebra::{Matrix3, Point3, UnitQuaternion, Vector3, Vector4};
use rapier3d::prelude::*;
use snafu::{OptionExt, ResultExt, Snafu, ensure};
use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::path::{Path, PathBuf};
use tracing::debug;

const ELLIPSOID_RINGS: usize = 8;
const ELLIPSOID_SEGMENTS: usize = 16;
const GEOM_DENSITY: f32 = 1000.0;
const GEOM_FRICTION: f32 = 1.0;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)), visibility(pub(crate)))]
pub enum SimulationError {
    #[snafu(display("Could not read scene description {}: {source}", path.display()))]
    ReadDescription {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Scene description is not valid: {source}"))]
    ParseDescription { source: serde_json::Error },

    #[snafu(display("The physics timestep must be positive and finite, got {timestep}"))]
    InvalidTimestep { timestep: f64 },

    #[snafu(display("Geom \"{name}\" has kind {kind}, which has no collision shape"))]
    UnsupportedCollider { name: String, kind: GeomKind },

    #[snafu(display("Geom \"{name}\" ({kind}) needs positive size components, got {size:?}"))]
    InvalidSize {
        name: String,
        kind: GeomKind,
        size: [f32; 3],
    },
}

#[derive(Debug, Copy, Clone)]
struct GeomBody {
    handle: RigidBodyHandle,
    initial_translation: Vector3<f32>,
    initial_rotation: UnitQuaternion<f32>,
}

pub struct Simulation {
    geoms: Vec<GeomDesc>,
    bodies: Vec<GeomBody>,
    world: PhysicsWorld,
    fixed_timestep: f64,
    time: f64,
    num_sim_steps: u64,
    num_total_sim_steps: u64,
    num_total_steps: u64,
}

impl Simulation {
    pub fn new(description: &SceneDescription) -> Result<Self, SimulationError> {
        let timestep = description.timestep;
        ensure!(
            timestep.is_finite() && timestep > 0.0,
            InvalidTimestepErr { timestep }
        );

        let mut world = PhysicsWorld::new(Vector3::from(description.gravity), timestep as f32);
        let mut geoms = Vec::with_capacity(description.geoms.len());
        let mut bodies = Vec::with_capacity(description.geoms.len());

        for (index, geom) in description.geoms.iter().enumerate() {
            let body = Self::insert_geom(&mut world, index, geom)?;
            geoms.push(GeomDesc::new(
                geom.name.clone(),
                geom.kind,
                Vector3::from(geom.size),
                Vector4::from(geom.rgba),
            ));
            bodies.push(body);
        }

        debug!(
            "[Simulation] Created {} geoms, timestep {timestep}s",
            geoms.len()
        );

        Ok(Simulation {
            geoms,
            bodies,
            world,
            fixed_timestep: timestep,
            time: 0.0,
            num_sim_steps: 0,
            num_total_sim_steps: 0,
            num_total_steps: 0,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, SimulationError> {
        Self::new(&SceneDescription::from_json_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        Self::new(&SceneDescription::from_json_file(path)?)
    }

    fn insert_geom(world: &mut PhysicsWorld, index: usize, geom: &GeomSpec) -> Result<GeomBody, SimulationError> {
        let shape = Self::collider_shape(geom)?;

        let [roll, pitch, yaw] = geom.euler;
        let rotation = UnitQuaternion::from_euler_angles(roll, pitch, yaw);
        let translation = Vector3::from(geom.position);

        let builder = if geom.fixed || geom.kind == GeomKind::Plane {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic()
        };
        let rigid_body = builder
            .user_data(index as u128)
            .translation(translation)
            .rotation(rotation.scaled_axis())
            .build();
        let handle = world.rigid_body_set.insert(rigid_body);

        let mut collider = ColliderBuilder::new(shape)
            .density(GEOM_DENSITY)
            .friction(GEOM_FRICTION)
            .user_data(index as u128);
        if geom.kind == GeomKind::Cylinder {
            // rapier cylinders run along y, geoms along z
            collider = collider.rotation(Vector3::x() * FRAC_PI_2);
        }
        world
            .collider_set
            .insert_with_parent(collider.build(), handle, &mut world.rigid_body_set);

        Ok(GeomBody {
            handle,
            initial_translation: translation,
            initial_rotation: rotation,
        })
    }

    fn collider_shape(geom: &GeomSpec) -> Result<SharedShape, SimulationError> {
        let [x, y, z] = geom.size;
        let shape = match geom.kind {
            GeomKind::Plane => SharedShape::halfspace(Vector3::z_axis()),
            GeomKind::Sphere => {
                Self::ensure_positive(geom, 1)?;
                SharedShape::ball(x)
            }
            GeomKind::Capsule => {
                Self::ensure_positive(geom, 2)?;
                SharedShape::capsule_z(y, x)
            }
            GeomKind::Cylinder => {
                Self::ensure_positive(geom, 2)?;
                SharedShape::cylinder(y, x)
            }
            GeomKind::Box => {
                Self::ensure_positive(geom, 3)?;
                SharedShape::cuboid(x, y, z)
            }
            GeomKind::Ellipsoid => {
                Self::ensure_positive(geom, 3)?;
                Self::ellipsoid_hull(&Vector3::new(x, y, z)).context(InvalidSizeErr {
                    name: geom.name.clone(),
                    kind: geom.kind,
                    size: geom.size,
                })?
            }
            GeomKind::HeightField | GeomKind::Mesh => {
                return UnsupportedColliderErr {
                    name: geom.name.clone(),
                    kind: geom.kind,
                }
                .fail();
            }
        };

        Ok(shape)
    }

    fn ensure_positive(geom: &GeomSpec, components: usize) -> Result<(), SimulationError> {
        ensure!(
            geom.size[..components].iter().all(|s| s.is_finite() && *s > 0.0),
            InvalidSizeErr {
                name: geom.name.clone(),
                kind: geom.kind,
                size: geom.size,
            }
        );
        Ok(())
    }

    /// rapier has no ellipsoid primitive, so collide against the hull of its sampled surface.
    fn ellipsoid_hull(radii: &Vector3<f32>) -> Option<SharedShape> {
        let rings = (1..ELLIPSOID_RINGS).map(|ring| ring as f32 / ELLIPSOID_RINGS as f32 * PI);
        let segments = (0..ELLIPSOID_SEGMENTS).map(|seg| seg as f32 / ELLIPSOID_SEGMENTS as f32 * TAU);

        let mut points: Vec<Point3<f32>> = iproduct!(rings, segments)
            .map(|(polar, azimuth)| {
                Point3::new(
                    radii.x * polar.sin() * azimuth.cos(),
                    radii.y * polar.sin() * azimuth.sin(),
                    radii.z * polar.cos(),
                )
            })
            .collect();
        points.push(Point3::new(0.0, 0.0, radii.z));
        points.push(Point3::new(0.0, 0.0, -radii.z));

        SharedShape::convex_hull(&points)
    }

    /// Advances the simulation by at least `step_size` seconds using fixed internal steps.
    ///
    /// A non-positive `step_size` advances by exactly one fixed timestep.
    pub fn step(&mut self, step_size: f64) {
        let step_size = if step_size <= 0.0 {
            self.fixed_timestep
        } else {
            step_size
        };
        let start_time = self.time;

        self.num_sim_steps = 0;
        while self.time - start_time < step_size {
            self.world.step();
            self.time += self.fixed_timestep;
            self.num_sim_steps += 1;
        }
        self.num_total_sim_steps += self.num_sim_steps;
        self.num_total_steps += 1;
    }

    /// Puts every body back at its initial pose, at rest, and clears time and counters.
    pub fn reset(&mut self) {
        for body in &self.bodies {
            let Some(rb) = self.world.rigid_body_set.get_mut(body.handle) else {
                debug_panic!("de-synced rigid body during reset");
                continue;
            };
            rb.set_translation(body.initial_translation, true);
            rb.set_rotation(body.initial_rotation, true);
            rb.set_linvel(Vector3::zeros(), true);
            rb.set_angvel(Vector3::zeros(), true);
        }

        self.time = 0.0;
        self.num_sim_steps = 0;
        self.num_total_sim_steps = 0;
        self.num_total_steps = 0;
    }

    fn body_pose(&self, index: usize) -> Pose {
        let Some(rb) = self.world.rigid_body_set.get(self.bodies[index].handle) else {
            debug_panic!("de-synced rigid body for geom {index}");
            return Pose::identity();
        };

        Pose::new(
            rb.rotation().to_rotation_matrix().into_inner(),
            *rb.translation(),
        )
    }

    pub fn fixed_timestep(&self) -> f64 {
        self.fixed_timestep
    }

    /// Simulated seconds since creation or the last reset.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Fixed internal steps taken by the last call to [`Simulation::step`].
    pub fn num_sim_steps(&self) -> u64 {
        self.num_sim_steps
    }

    pub fn num_total_sim_steps(&self) -> u64 {
        self.num_total_sim_steps
    }

    /// Calls to [`Simulation::step`].
    pub fn num_total_steps(&self) -> u64 {
        self.num_total_steps
    }

    pub fn geoms(&self) -> &[GeomDesc] {
        &self.geoms
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    /// Handle of the rapier body carrying geom `index`.
    pub fn body_handle(&self, index: usize) -> Option<RigidBodyHandle> {
        self.bodies.get(index).map(|body| body.handle)
    }
}

impl PhysicsModel for Simulation {
    delegate! {
        to self.geoms {
            fn geom_count(&self) -> usize;
            fn geom_kind(&self, index: usize) -> GeomKind;
            fn geom_size(&self, index: usize) -> Vector3<f32>;
            fn geom_rgba(&self, index: usize) -> Vector4<f32>;
            fn geom_name(&self, index: usize) -> &str;
        }
    }
}

impl PhysicsState for Simulation {
    fn geom_rotation(&self, index: usize) -> Matrix3<f32> {
        self.body_pose(index).rotation
    }

    fn geom_position(&self, index: usize) -> Vector3<f32> {
        self.body_pose(index).position
    }

    fn geom_pose(&self, index: usize) -> Pose {
        self.body_pose(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::DEFAULT_FIXED_TIMESTEP;
    use more_asserts::{assert_ge, assert_gt, assert_lt};

    fn drop_test() -> SceneDescription {
        SceneDescription::builder()
            .geoms(vec![
                GeomSpec::builder()
                    .name("floor")
                    .kind(GeomKind::Plane)
                    .size([5.0, 5.0, 0.1])
                    .build(),
                GeomSpec::builder()
                    .name("ball")
                    .kind(GeomKind::Sphere)
                    .size([0.1, 0.0, 0.0])
                    .position([0.0, 0.0, 2.0])
                    .build(),
            ])
            .build()
    }

    #[test]
    fn exposes_geoms_in_description_order() {
        let sim = Simulation::new(&drop_test()).unwrap();

        assert_eq!(sim.geom_count(), 2);
        assert_eq!(sim.geom_name(0), "floor");
        assert_eq!(sim.geom_kind(0), GeomKind::Plane);
        assert_eq!(sim.geom_name(1), "ball");
        assert_eq!(sim.geom_size(1), Vector3::new(0.1, 0.0, 0.0));
        assert_eq!(sim.geom_position(1), Vector3::new(0.0, 0.0, 2.0));
        assert_eq!(sim.geom_rotation(1), Matrix3::identity());
    }

    #[test]
    fn non_positive_step_advances_one_timestep() {
        let mut sim = Simulation::new(&drop_test()).unwrap();

        sim.step(0.0);

        assert_eq!(sim.num_sim_steps(), 1);
        assert_eq!(sim.num_total_steps(), 1);
        assert!((sim.time() - DEFAULT_FIXED_TIMESTEP).abs() < 1e-12);
    }

    #[test]
    fn step_covers_requested_duration() {
        let mut sim = Simulation::new(&drop_test()).unwrap();

        sim.step(1.0 / 60.0);
        sim.step(1.0 / 60.0);

        assert_ge!(sim.time(), 2.0 / 60.0);
        assert_lt!(sim.time(), 2.0 / 60.0 + 2.0 * DEFAULT_FIXED_TIMESTEP);
        assert_eq!(sim.num_total_steps(), 2);
        assert_eq!(
            sim.num_total_sim_steps(),
            (sim.time() / DEFAULT_FIXED_TIMESTEP).round() as u64
        );
    }

    #[test]
    fn dynamic_geoms_fall_and_fixed_geoms_stay() {
        let mut sim = Simulation::new(&drop_test()).unwrap();

        for _ in 0..10 {
            sim.step(1.0 / 60.0);
        }

        assert_lt!(sim.geom_position(1).z, 2.0);
        assert_gt!(sim.geom_position(1).z, 0.0);
        assert_eq!(sim.geom_position(0), Vector3::zeros());
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut sim = Simulation::new(&drop_test()).unwrap();
        for _ in 0..10 {
            sim.step(1.0 / 60.0);
        }

        sim.reset();

        assert_eq!(sim.geom_position(1), Vector3::new(0.0, 0.0, 2.0));
        assert_eq!(sim.time(), 0.0);
        assert_eq!(sim.num_total_steps(), 0);
        assert_eq!(sim.num_total_sim_steps(), 0);
    }

    #[test]
    fn euler_angles_set_initial_rotation() {
        let description = SceneDescription::builder()
            .geoms(vec![
                GeomSpec::builder()
                    .kind(GeomKind::Box)
                    .size([1.0, 1.0, 1.0])
                    .euler([0.0, 0.0, FRAC_PI_2])
                    .fixed(true)
                    .build(),
            ])
            .build();
        let sim = Simulation::new(&description).unwrap();

        let x_axis = sim.geom_rotation(0) * Vector3::x();
        assert!((x_axis - Vector3::y()).norm() < 1e-5);
    }

    #[test]
    fn supports_every_renderable_kind() {
        let kinds = [
            GeomKind::Box,
            GeomKind::Sphere,
            GeomKind::Ellipsoid,
            GeomKind::Cylinder,
            GeomKind::Capsule,
        ];
        let geoms = kinds
            .iter()
            .map(|&kind| GeomSpec::builder().kind(kind).size([0.2, 0.3, 0.4]).build())
            .collect();

        let sim = Simulation::new(&SceneDescription::builder().geoms(geoms).build()).unwrap();

        assert_eq!(sim.geom_count(), kinds.len());
        assert_eq!(sim.world().collider_set.len(), kinds.len());
    }

    #[test]
    fn heightfield_has_no_collider() {
        let description = SceneDescription::builder()
            .geoms(vec![GeomSpec::builder().name("terrain").kind(GeomKind::HeightField).build()])
            .build();

        assert!(matches!(
            Simulation::new(&description),
            Err(SimulationError::UnsupportedCollider { .. })
        ));
    }

    #[test]
    fn zero_radius_is_rejected() {
        let description = SceneDescription::builder()
            .geoms(vec![GeomSpec::builder().kind(GeomKind::Sphere).build()])
            .build();

        assert!(matches!(
            Simulation::new(&description),
            Err(SimulationError::InvalidSize { .. })
        ));
    }

    #[test]
    fn invalid_timestep_is_rejected() {
        for timestep in [0.0, -0.01, f64::NAN] {
            let description = SceneDescription::builder().timestep(timestep).build();
            assert!(matches!(
                Simulation::new(&description),
                Err(SimulationError::InvalidTimestep { .. })
            ));
        }
    }

    #[test]
    fn bad_json_is_a_parse_error() {
        assert!(matches!(
            Simulation::from_json_str("{ \"geoms\": 3 }"),
            Err(SimulationError::ParseDescription { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        assert!(matches!(
            Simulation::from_json_file("does/not/exist.json"),
            Err(SimulationError::ReadDescription { .. })
        ));
    }
}
