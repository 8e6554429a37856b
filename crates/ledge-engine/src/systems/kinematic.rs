use glam::Vec2;

use crate::components::body::{BodyKind, KinematicMotion};
use crate::core::physics::PhysicsWorld;
use crate::core::scene::Scene;
use crate::core::units::Units;

/// Triangle-wave velocity: out toward `end` for the first half of the
/// period, back toward `start` for the second half.
pub fn kinematic_velocity(motion: &KinematicMotion, units: &Units, time_secs: f64) -> Vec2 {
    let period = motion.period as f64;
    let half = period / 2.0;
    let phase = time_secs.rem_euclid(period);
    let sign = if phase <= half { 1.0 } else { -1.0 };

    units.delta_to_sim(motion.end - motion.start) / half as f32 * sign
}

/// Assign this tick's velocity to every moving platform.
pub fn drive_kinematics(physics: &mut PhysicsWorld, scene: &Scene, units: &Units, time_secs: f64) {
    for body in scene.iter() {
        if body.kind != BodyKind::Kinematic {
            continue;
        }
        if let Some(motion) = &body.motion {
            physics.set_velocity(body.handle, kinematic_velocity(motion, units, time_secs));
        }
    }
}
