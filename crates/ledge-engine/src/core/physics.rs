use std::num::NonZeroUsize;
use std::sync::Mutex;

use glam::Vec2;
use rapier2d::prelude::*;

use crate::api::types::BodyIndex;
use crate::components::body::SensorRole;

// ---------------------------------------------------------------------------
// Conversion helpers (private): glam ↔ nalgebra
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn na_to_vec2(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

// ---------------------------------------------------------------------------
// Shape tags, packed into collider user_data
// ---------------------------------------------------------------------------

/// Owner body and (for sensors) role of a collider.
/// Layout in `user_data`: bits 0..32 body index, bits 32..40 role code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeTag {
    pub body: BodyIndex,
    pub role: Option<SensorRole>,
}

impl ShapeTag {
    pub fn encode(self) -> u128 {
        let role = self.role.map(SensorRole::code).unwrap_or(0) as u128;
        (self.body.0 as u128) | (role << 32)
    }

    pub fn decode(data: u128) -> Self {
        Self {
            body: BodyIndex(data as u32),
            role: SensorRole::from_code((data >> 32) as u8),
        }
    }
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    Fixed,
    /// Driven by an assigned velocity; the engine integrates position.
    Kinematic,
}

impl BodyType {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::Fixed => RigidBodyType::Fixed,
            BodyType::Kinematic => RigidBodyType::KinematicVelocityBased,
        }
    }
}

/// Shape description for a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderDesc {
    Ball { radius: f32 },
    Cuboid { half_width: f32, half_height: f32 },
}

impl ColliderDesc {
    fn build_collider(&self) -> ColliderBuilder {
        match *self {
            ColliderDesc::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderDesc::Cuboid { half_width, half_height } => {
                ColliderBuilder::cuboid(half_width, half_height)
            }
        }
    }
}

/// Physical material properties for a collider.
#[derive(Debug, Clone, Copy)]
pub struct ColliderMaterial {
    pub friction: f32,
    pub density: f32,
    /// When set, overrides the density-derived mass of this collider.
    pub mass: Option<f32>,
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            friction: 0.5,
            density: 1.0,
            mass: None,
        }
    }
}

impl ColliderMaterial {
    /// Massless, frictionless material for sensors.
    pub fn sensor() -> Self {
        Self {
            friction: 0.0,
            density: 0.0,
            mass: None,
        }
    }
}

/// A collider to attach to an existing body.
#[derive(Debug, Clone, Copy)]
pub struct ShapeDesc {
    pub shape: ColliderDesc,
    /// Offset from the body's local origin.
    pub offset: Vec2,
    pub material: ColliderMaterial,
    /// `Some` makes the collider a sensor carrying that role.
    pub role: Option<SensorRole>,
}

impl ShapeDesc {
    pub fn solid(shape: ColliderDesc, material: ColliderMaterial) -> Self {
        Self {
            shape,
            offset: Vec2::ZERO,
            material,
            role: None,
        }
    }

    pub fn sensor(shape: ColliderDesc, role: SensorRole) -> Self {
        Self {
            shape,
            offset: Vec2::ZERO,
            material: ColliderMaterial::sensor(),
            role: Some(role),
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }
}

/// Builder for describing a rigid body before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub position: Vec2,
    pub fixed_rotation: bool,
}

impl BodyDesc {
    pub fn new(body_type: BodyType) -> Self {
        Self {
            body_type,
            position: Vec2::ZERO,
            fixed_rotation: false,
        }
    }

    pub fn dynamic() -> Self {
        Self::new(BodyType::Dynamic)
    }

    pub fn fixed() -> Self {
        Self::new(BodyType::Fixed).with_fixed_rotation(true)
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_fixed_rotation(mut self, fixed: bool) -> Self {
        self.fixed_rotation = fixed;
        self
    }
}

/// A sensor overlap that began or ended during the last step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorContact {
    pub role: SensorRole,
    /// Body owning the sensor shape.
    pub sensor_body: BodyIndex,
    /// Body whose collider entered or left the sensor.
    pub other_body: BodyIndex,
    /// `true` on begin-touch, `false` on end-touch.
    pub began: bool,
}

// ---------------------------------------------------------------------------
// WASM-safe event collector (no crossbeam)
// ---------------------------------------------------------------------------

struct DirectEventCollector {
    collisions: Mutex<Vec<CollisionEvent>>,
}

impl DirectEventCollector {
    fn new() -> Self {
        Self {
            collisions: Mutex::new(Vec::new()),
        }
    }

    fn drain_collisions(&self) -> Vec<CollisionEvent> {
        let mut guard = self.collisions.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *guard)
    }
}

impl EventHandler for DirectEventCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        self.collisions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: f32,
    ) {
        // Contact forces are not interpreted, but the trait requires this.
    }
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier2D boilerplate for one level.
/// Dropping it releases every body and collider at once.
pub struct PhysicsWorld {
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    event_collector: DirectEventCollector,
}

impl PhysicsWorld {
    /// Create a new physics world. Simulation space is y-up, so downward
    /// gravity has a negative Y component (e.g. `Vec2::new(0.0, -10.0)`).
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            event_collector: DirectEventCollector::new(),
        }
    }

    /// Set the integration timestep.
    pub fn set_dt(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    /// Set the constraint solver iteration count (clamped to at least 1).
    pub fn set_solver_iterations(&mut self, iterations: usize) {
        self.integration_parameters.num_solver_iterations =
            NonZeroUsize::new(iterations).unwrap_or(NonZeroUsize::MIN);
    }

    /// Create a rigid body without colliders. The body index is stored in the
    /// body's `user_data`.
    pub fn create_body(&mut self, index: BodyIndex, desc: &BodyDesc) -> RigidBodyHandle {
        let rb = RigidBodyBuilder::new(desc.body_type.to_rapier())
            .translation(vec2_to_na(desc.position))
            .locked_axes(if desc.fixed_rotation {
                LockedAxes::ROTATION_LOCKED
            } else {
                LockedAxes::empty()
            })
            .user_data(index.0 as u128)
            .build();

        self.bodies.insert(rb)
    }

    /// Attach a collider to `body`. Sensors and solids both report
    /// collision events so sensor overlaps reach [`PhysicsWorld::step_into`].
    pub fn attach_collider(
        &mut self,
        body: RigidBodyHandle,
        index: BodyIndex,
        desc: &ShapeDesc,
    ) -> ColliderHandle {
        let tag = ShapeTag {
            body: index,
            role: desc.role,
        };
        let mut builder = desc
            .shape
            .build_collider()
            .translation(vec2_to_na(desc.offset))
            .sensor(desc.role.is_some())
            .friction(desc.material.friction)
            .density(desc.material.density)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .user_data(tag.encode());
        if let Some(mass) = desc.material.mass {
            builder = builder.mass(mass);
        }

        self.colliders
            .insert_with_parent(builder.build(), body, &mut self.bodies)
    }

    /// Step the simulation once and collect sensor begin/end touches.
    pub fn step_into(&mut self, contacts: &mut Vec<SensorContact>) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.event_collector,
        );

        for event in self.event_collector.drain_collisions() {
            let (h1, h2, began) = match event {
                CollisionEvent::Started(h1, h2, _) => (h1, h2, true),
                CollisionEvent::Stopped(h1, h2, _) => (h1, h2, false),
            };
            let (Some(a), Some(b)) = (self.collider_tag(h1), self.collider_tag(h2)) else {
                continue;
            };
            for (sensor, other) in [(a, b), (b, a)] {
                if let Some(role) = sensor.role {
                    contacts.push(SensorContact {
                        role,
                        sensor_body: sensor.body,
                        other_body: other.body,
                        began,
                    });
                }
            }
        }
    }

    /// Replace the force acting on a body for the next step only.
    pub fn set_force(&mut self, body: RigidBodyHandle, force: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body) {
            rb.reset_forces(false);
            rb.add_force(vec2_to_na(force), force != Vec2::ZERO);
        }
    }

    /// Set the linear velocity of a body directly.
    pub fn set_velocity(&mut self, body: RigidBodyHandle, vel: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body) {
            rb.set_linvel(vec2_to_na(vel), true);
        }
    }

    /// Get the current linear velocity of a body.
    pub fn velocity(&self, body: RigidBodyHandle) -> Vec2 {
        self.bodies
            .get(body)
            .map(|rb| na_to_vec2(rb.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Get the current center position of a body.
    pub fn body_position(&self, body: RigidBodyHandle) -> Vec2 {
        self.bodies
            .get(body)
            .map(|rb| na_to_vec2(rb.translation()))
            .unwrap_or(Vec2::ZERO)
    }

    pub fn body_type(&self, body: RigidBodyHandle) -> Option<BodyType> {
        let rb = self.bodies.get(body)?;
        match rb.body_type() {
            RigidBodyType::Dynamic => Some(BodyType::Dynamic),
            RigidBodyType::Fixed => Some(BodyType::Fixed),
            RigidBodyType::KinematicVelocityBased => Some(BodyType::Kinematic),
            RigidBodyType::KinematicPositionBased => None,
        }
    }

    pub fn body_mass(&self, body: RigidBodyHandle) -> f32 {
        self.bodies.get(body).map(|rb| rb.mass()).unwrap_or(0.0)
    }

    pub fn is_rotation_locked(&self, body: RigidBodyHandle) -> bool {
        self.bodies
            .get(body)
            .map(|rb| rb.locked_axes().contains(LockedAxes::ROTATION_LOCKED))
            .unwrap_or(false)
    }

    /// Number of rigid bodies in the simulation.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of colliders (solids and sensors) in the simulation.
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Query the shape of a collider.
    pub fn collider_shape(&self, collider: ColliderHandle) -> Option<ColliderDesc> {
        let shape = self.colliders.get(collider)?.shape();
        if let Some(ball) = shape.as_ball() {
            Some(ColliderDesc::Ball { radius: ball.radius })
        } else {
            shape.as_cuboid().map(|cuboid| ColliderDesc::Cuboid {
                half_width: cuboid.half_extents.x,
                half_height: cuboid.half_extents.y,
            })
        }
    }

    /// Offset of a collider from its parent body's origin.
    pub fn collider_offset(&self, collider: ColliderHandle) -> Option<Vec2> {
        let c = self.colliders.get(collider)?;
        let local = c.position_wrt_parent()?;
        Some(na_to_vec2(&local.translation.vector))
    }

    pub fn collider_friction(&self, collider: ColliderHandle) -> Option<f32> {
        self.colliders.get(collider).map(|c| c.friction())
    }

    pub fn is_sensor(&self, collider: ColliderHandle) -> bool {
        self.colliders
            .get(collider)
            .map(|c| c.is_sensor())
            .unwrap_or(false)
    }

    pub fn collider_tag(&self, collider: ColliderHandle) -> Option<ShapeTag> {
        self.colliders
            .get(collider)
            .map(|c| ShapeTag::decode(c.user_data))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn box_shape(hw: f32, hh: f32) -> ShapeDesc {
        ShapeDesc::solid(
            ColliderDesc::Cuboid {
                half_width: hw,
                half_height: hh,
            },
            ColliderMaterial::default(),
        )
    }

    #[test]
    fn shape_tag_round_trip() {
        let tag = ShapeTag {
            body: BodyIndex(37),
            role: Some(SensorRole::Collectible),
        };
        assert_eq!(ShapeTag::decode(tag.encode()), tag);

        let solid = ShapeTag {
            body: BodyIndex(5),
            role: None,
        };
        assert_eq!(ShapeTag::decode(solid.encode()), solid);
    }

    #[test]
    fn gravity_pulls_dynamic_body_down() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, -10.0));
        world.set_dt(1.0 / 60.0);

        let body = world.create_body(
            BodyIndex(0),
            &BodyDesc::dynamic().with_position(Vec2::new(0.0, 10.0)),
        );
        world.attach_collider(body, BodyIndex(0), &box_shape(0.5, 0.5));

        let mut contacts = Vec::new();
        for _ in 0..10 {
            world.step_into(&mut contacts);
        }
        let pos = world.body_position(body);
        assert!(pos.y < 10.0, "Body should fall (y-up): y={}", pos.y);
    }

    #[test]
    fn fixed_mass_overrides_density() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_body(BodyIndex(0), &BodyDesc::dynamic());
        let material = ColliderMaterial {
            mass: Some(40.0),
            density: 3.0,
            ..ColliderMaterial::default()
        };
        world.attach_collider(
            body,
            BodyIndex(0),
            &ShapeDesc::solid(
                ColliderDesc::Cuboid {
                    half_width: 2.0,
                    half_height: 2.0,
                },
                material,
            ),
        );
        world.attach_collider(
            body,
            BodyIndex(0),
            &ShapeDesc::sensor(ColliderDesc::Ball { radius: 1.0 }, SensorRole::Ground),
        );
        world.step_into(&mut Vec::new());
        assert!((world.body_mass(body) - 40.0).abs() < 1e-3, "mass was {}", world.body_mass(body));
    }

    #[test]
    fn force_applies_for_one_step_only() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.set_dt(1.0 / 60.0);
        let body = world.create_body(BodyIndex(0), &BodyDesc::dynamic());
        world.attach_collider(
            body,
            BodyIndex(0),
            &ShapeDesc::solid(
                ColliderDesc::Ball { radius: 0.5 },
                ColliderMaterial {
                    mass: Some(1.0),
                    ..ColliderMaterial::default()
                },
            ),
        );

        let mut contacts = Vec::new();
        world.set_force(body, Vec2::new(60.0, 0.0));
        world.step_into(&mut contacts);
        let after_push = world.velocity(body);
        assert!((after_push.x - 1.0).abs() < 1e-3, "vx was {}", after_push.x);

        world.set_force(body, Vec2::ZERO);
        world.step_into(&mut contacts);
        let coasting = world.velocity(body);
        assert!((coasting.x - after_push.x).abs() < 1e-4, "force leaked into next step");
    }

    #[test]
    fn set_velocity_directly() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_body(BodyIndex(0), &BodyDesc::new(BodyType::Kinematic));
        world.set_velocity(body, Vec2::new(5.0, -3.0));
        let vel = world.velocity(body);
        assert!((vel.x - 5.0).abs() < 1e-3);
        assert!((vel.y + 3.0).abs() < 1e-3);
    }

    #[test]
    fn sensor_reports_begin_with_roles_and_bodies() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, -10.0));
        world.set_dt(1.0 / 60.0);

        let platform = world.create_body(BodyIndex(1), &BodyDesc::fixed());
        world.attach_collider(platform, BodyIndex(1), &box_shape(5.0, 0.2));
        world.attach_collider(
            platform,
            BodyIndex(1),
            &ShapeDesc::sensor(
                ColliderDesc::Cuboid {
                    half_width: 4.75,
                    half_height: 0.02,
                },
                SensorRole::Ground,
            )
            .with_offset(Vec2::new(0.0, 0.2)),
        );

        let player = world.create_body(
            BodyIndex(0),
            &BodyDesc::dynamic()
                .with_position(Vec2::new(0.0, 2.0))
                .with_fixed_rotation(true),
        );
        world.attach_collider(player, BodyIndex(0), &box_shape(0.5, 0.5));

        let mut contacts = Vec::new();
        for _ in 0..120 {
            world.step_into(&mut contacts);
        }

        let begins: Vec<_> = contacts.iter().filter(|c| c.began).collect();
        assert!(!begins.is_empty(), "Player should touch the ground sensor");
        let first = begins[0];
        assert_eq!(first.role, SensorRole::Ground);
        assert_eq!(first.sensor_body, BodyIndex(1));
        assert_eq!(first.other_body, BodyIndex(0));
    }

    #[test]
    fn collider_queries() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_body(BodyIndex(3), &BodyDesc::fixed());
        let solid = world.attach_collider(body, BodyIndex(3), &box_shape(2.0, 1.0));
        let sensor = world.attach_collider(
            body,
            BodyIndex(3),
            &ShapeDesc::sensor(ColliderDesc::Ball { radius: 0.5 }, SensorRole::Wall)
                .with_offset(Vec2::new(-2.0, 0.0)),
        );

        assert_eq!(
            world.collider_shape(solid),
            Some(ColliderDesc::Cuboid {
                half_width: 2.0,
                half_height: 1.0
            })
        );
        assert!(!world.is_sensor(solid));
        assert!(world.is_sensor(sensor));
        assert_eq!(world.collider_offset(sensor), Some(Vec2::new(-2.0, 0.0)));
        assert_eq!(
            world.collider_tag(sensor).and_then(|t| t.role),
            Some(SensorRole::Wall)
        );
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.collider_count(), 2);
        assert!(world.is_rotation_locked(body));
    }
}
