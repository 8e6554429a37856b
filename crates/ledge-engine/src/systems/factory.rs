use glam::Vec2;

use crate::api::config::GameConfig;
use crate::api::types::BodyIndex;
use crate::components::body::{Body, BodyKind, BodySpec, SensorRole};
use crate::core::physics::{
    BodyDesc, BodyType, ColliderDesc, ColliderMaterial, PhysicsWorld, ShapeDesc,
};
use crate::core::units::Units;

/// Ground sensors straddle the top face with at most this half-height
/// (simulation units).
const GROUND_SENSOR_MAX_HALF_HEIGHT: f32 = 0.1;

fn body_type(kind: BodyKind) -> BodyType {
    match kind {
        BodyKind::Dynamic => BodyType::Dynamic,
        BodyKind::Kinematic => BodyType::Kinematic,
        BodyKind::Static | BodyKind::Collectible => BodyType::Fixed,
    }
}

/// Ground, left-wall and right-wall sensors for a platform with the given
/// half extents.
pub fn side_sensors(half: Vec2) -> [ShapeDesc; 3] {
    let ground = ShapeDesc::sensor(
        ColliderDesc::Cuboid {
            half_width: half.x * 0.95,
            half_height: (half.y * 0.1).min(GROUND_SENSOR_MAX_HALF_HEIGHT),
        },
        SensorRole::Ground,
    )
    .with_offset(Vec2::new(0.0, half.y));

    let wall = ColliderDesc::Cuboid {
        half_width: half.x * 0.1,
        half_height: half.y * 0.95,
    };
    let left = ShapeDesc::sensor(wall, SensorRole::Wall).with_offset(Vec2::new(-half.x, 0.0));
    let right = ShapeDesc::sensor(wall, SensorRole::Wall).with_offset(Vec2::new(half.x, 0.0));

    [ground, left, right]
}

/// Create the simulation body, primary shape and sensors for one level body.
pub fn spawn_body(
    physics: &mut PhysicsWorld,
    units: &Units,
    config: &GameConfig,
    index: BodyIndex,
    spec: &BodySpec,
) -> Body {
    let half = units.half_extents(&spec.rect);
    let desc = BodyDesc::new(body_type(spec.kind))
        .with_position(units.rect_to_sim(&spec.rect))
        .with_fixed_rotation(true);
    let handle = physics.create_body(index, &desc);

    let primary_shape = if spec.kind.is_round() {
        ShapeDesc::sensor(ColliderDesc::Ball { radius: half.x }, SensorRole::Collectible)
    } else {
        let friction = if spec.kind == BodyKind::Kinematic {
            config.kinematic_friction
        } else {
            config.friction
        };
        ShapeDesc::solid(
            ColliderDesc::Cuboid {
                half_width: half.x,
                half_height: half.y,
            },
            ColliderMaterial {
                friction,
                mass: Some(config.body_mass),
                ..ColliderMaterial::default()
            },
        )
    };
    let primary = physics.attach_collider(handle, index, &primary_shape);

    let sensors = if spec.kind.has_side_sensors() {
        side_sensors(half)
            .iter()
            .filter_map(|shape| {
                let role = shape.role?;
                Some((physics.attach_collider(handle, index, shape), role))
            })
            .collect()
    } else {
        Vec::new()
    };

    Body {
        index,
        kind: spec.kind,
        color: spec.color,
        handle,
        primary,
        sensors,
        rect: spec.rect,
        visible: true,
        motion: spec.motion,
    }
}
