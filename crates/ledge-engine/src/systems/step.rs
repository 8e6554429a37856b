use log::debug;

use crate::api::types::BodyIndex;
use crate::components::body::SensorRole;
use crate::components::player::Player;
use crate::core::level::Level;
use crate::core::physics::{PhysicsWorld, SensorContact};
use crate::core::scene::Scene;
use crate::core::time::SimTime;

/// Running totals of interpreted sensor events for the current level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorStats {
    pub ground_begins: u32,
    pub ground_ends: u32,
    pub wall_begins: u32,
    pub wall_ends: u32,
    pub collected: u32,
    /// Events dropped during the startup grace period.
    pub suppressed: u32,
}

/// Hand the player's desired force to the simulation for the coming step.
pub fn apply_player_force(physics: &mut PhysicsWorld, scene: &Scene, player: &Player) {
    if let Some(body) = scene.player() {
        physics.set_force(body.handle, player.desired_force);
    }
}

/// Advance one fixed step and collect its sensor contacts into `contacts`.
/// Contacts from steps that end inside the grace period are discarded.
pub fn step_world(
    physics: &mut PhysicsWorld,
    time: &mut SimTime,
    grace_secs: f64,
    contacts: &mut Vec<SensorContact>,
    stats: &mut SensorStats,
) {
    contacts.clear();
    physics.step_into(contacts);
    time.tick();

    if time.seconds() <= grace_secs && !contacts.is_empty() {
        stats.suppressed += contacts.len() as u32;
        contacts.clear();
    }
}

/// Interpret one step's sensor contacts: begin-touches first, then
/// end-touches. Only contacts made by the player's body count.
pub fn apply_sensor_events(
    contacts: &[SensorContact],
    scene: &mut Scene,
    player: &mut Player,
    level: &mut Level,
    stats: &mut SensorStats,
) {
    let by_player = |c: &&SensorContact| c.other_body == BodyIndex::PLAYER;

    for contact in contacts.iter().filter(by_player).filter(|c| c.began) {
        match contact.role {
            SensorRole::Ground => {
                player.land();
                stats.ground_begins += 1;
                debug!(
                    "ground touch on body {}: jump buffer refilled to {}",
                    contact.sensor_body.0, player.jump_buffer_frames
                );
            }
            SensorRole::Collectible => {
                let Some(body) = scene.get_mut(contact.sensor_body) else {
                    continue;
                };
                if body.visible {
                    body.visible = false;
                    level.collect();
                    stats.collected += 1;
                    debug!(
                        "collectible {} cleared, {} remaining",
                        contact.sensor_body.0, level.collectibles_remaining
                    );
                }
            }
            SensorRole::Wall => {
                stats.wall_begins += 1;
                debug!("wall touch on body {}", contact.sensor_body.0);
            }
        }
    }

    for contact in contacts.iter().filter(by_player).filter(|c| !c.began) {
        match contact.role {
            SensorRole::Ground => {
                stats.ground_ends += 1;
                if player.leave_ground() {
                    debug!("left body {} without jumping: buffer forfeited", contact.sensor_body.0);
                }
            }
            SensorRole::Wall => {
                stats.wall_ends += 1;
                debug!("wall release on body {}", contact.sensor_body.0);
            }
            SensorRole::Collectible => {}
        }
    }
}
