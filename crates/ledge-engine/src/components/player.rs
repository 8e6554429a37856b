use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Movement tuning. Forces are per elapsed millisecond of frame time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_jump_buffer_frames: u32,
    pub max_horizontal_speed: f32,
    pub horizontal_force: f32,
    pub vertical_force: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_jump_buffer_frames: 10,
            max_horizontal_speed: 10.0,
            horizontal_force: 2.0,
            vertical_force: 3.0,
        }
    }
}

/// Movement state of the player. Rides on body 0 of the level.
#[derive(Debug, Clone)]
pub struct Player {
    pub tuning: PlayerTuning,
    /// Set by touching a ground sensor, cleared by jumping or walking off.
    pub can_jump: bool,
    /// Frames of upward force still available for the current jump.
    pub jump_buffer_frames: u32,
    /// Force the next simulation step applies to the player body.
    pub desired_force: Vec2,
}

impl Player {
    pub fn new(tuning: PlayerTuning) -> Self {
        Self {
            tuning,
            can_jump: false,
            jump_buffer_frames: 0,
            desired_force: Vec2::ZERO,
        }
    }

    pub fn may_jump(&self) -> bool {
        self.can_jump || self.jump_buffer_frames > 0
    }

    /// Spend one frame of jump: loses ground eligibility, drains the buffer.
    pub fn consume_jump_frame(&mut self) {
        self.can_jump = false;
        self.jump_buffer_frames = self.jump_buffer_frames.saturating_sub(1);
    }

    /// Ground contact began: jump available with a full buffer.
    pub fn land(&mut self) {
        self.can_jump = true;
        self.jump_buffer_frames = self.tuning.max_jump_buffer_frames;
    }

    /// Walked off a ground sensor without jumping: the buffer is forfeited.
    /// Returns whether anything changed.
    pub fn leave_ground(&mut self) -> bool {
        if !self.can_jump {
            return false;
        }
        self.can_jump = false;
        self.jump_buffer_frames = 0;
        true
    }
}
