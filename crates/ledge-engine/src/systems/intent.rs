use glam::Vec2;

use crate::components::player::Player;
use crate::input::keys::{Key, KeyState};

/// What the player asked for this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Close request: the frame goes no further.
    Quit,
    /// Force to apply to the player body on the next step.
    Force(Vec2),
}

/// Turn this frame's keys into a player force. Also stores the force in
/// `player.desired_force`. Forces scale with `elapsed_ms`.
pub fn map_input(player: &mut Player, elapsed_ms: f32, keys: KeyState, velocity: Vec2) -> Intent {
    if keys.is_down(Key::Quit) {
        return Intent::Quit;
    }

    let tuning = player.tuning;
    let mut force = Vec2::ZERO;

    // Holding Up keeps spending buffer frames: longer hold, higher jump.
    if keys.is_down(Key::Up) && player.may_jump() {
        player.consume_jump_frame();
        force.y += tuning.vertical_force * elapsed_ms;
    }

    if keys.is_down(Key::Left) {
        force.x -= tuning.horizontal_force * elapsed_ms;
    }
    if keys.is_down(Key::Right) {
        force.x += tuning.horizontal_force * elapsed_ms;
    }

    let max = tuning.max_horizontal_speed;
    let past_cap = (force.x < 0.0 && velocity.x < -max) || (force.x > 0.0 && velocity.x > max);
    if past_cap {
        force.x = 0.0;
    }

    player.desired_force = force;
    Intent::Force(force)
}
