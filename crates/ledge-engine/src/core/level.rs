use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::body::BodySpec;
use crate::components::player::PlayerTuning;

/// Authored level: dimensions, goal and body list. Body 0 is the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDesc {
    #[serde(default)]
    pub name: String,
    /// Level width in pixels.
    pub width: f32,
    /// Level height in pixels.
    pub height: f32,
    /// Collectibles to clear before the level is won.
    pub collectibles_needed: i32,
    /// Overrides the configured player tuning for this level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerTuning>,
    pub bodies: Vec<BodySpec>,
}

/// Player pixel positions at which the camera stops following.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl CameraBounds {
    pub fn new(level_size: Vec2, viewport: Vec2) -> Self {
        let half = viewport / 2.0;
        Self {
            left: half.x,
            right: level_size.x - half.x,
            bottom: half.y,
            top: level_size.y - half.y,
        }
    }
}

/// Per-level outcome. The numeric codes are the loop signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelStatus {
    Continue,
    Won,
    Quit,
}

impl LevelStatus {
    pub fn code(self) -> i32 {
        match self {
            LevelStatus::Continue => 0,
            LevelStatus::Won => 1,
            LevelStatus::Quit => -1,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != LevelStatus::Continue
    }
}

/// Runtime state of the level being played.
#[derive(Debug, Clone)]
pub struct Level {
    pub name: String,
    pub size: Vec2,
    pub bounds: CameraBounds,
    pub collectibles_remaining: i32,
    status: LevelStatus,
    /// Clock time at which the level was loaded.
    pub start_ms: f64,
}

impl Level {
    pub fn new(desc: &LevelDesc, viewport: Vec2, start_ms: f64) -> Self {
        let size = Vec2::new(desc.width, desc.height);
        Self {
            name: desc.name.clone(),
            size,
            bounds: CameraBounds::new(size, viewport),
            collectibles_remaining: desc.collectibles_needed,
            status: LevelStatus::Continue,
            start_ms,
        }
    }

    pub fn status(&self) -> LevelStatus {
        self.status
    }

    /// A collectible was cleared.
    pub fn collect(&mut self) {
        self.collectibles_remaining -= 1;
    }

    /// External close request. Has no effect once the level is over.
    pub fn request_quit(&mut self) {
        if self.status == LevelStatus::Continue {
            self.status = LevelStatus::Quit;
        }
    }

    /// Re-evaluate the win condition. Called once per frame after the step.
    pub fn evaluate(&mut self) -> LevelStatus {
        if self.status == LevelStatus::Continue && self.collectibles_remaining <= 0 {
            self.status = LevelStatus::Won;
        }
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(needed: i32) -> LevelDesc {
        LevelDesc {
            name: "test".into(),
            width: 2000.0,
            height: 500.0,
            collectibles_needed: needed,
            player: None,
            bodies: Vec::new(),
        }
    }

    #[test]
    fn camera_bounds_from_dimensions() {
        let bounds = CameraBounds::new(Vec2::new(3000.0, 1000.0), Vec2::new(1000.0, 500.0));
        assert_eq!(bounds.left, 500.0);
        assert_eq!(bounds.right, 2500.0);
        assert_eq!(bounds.bottom, 250.0);
        assert_eq!(bounds.top, 750.0);
    }

    #[test]
    fn starts_in_continue() {
        let level = Level::new(&desc(3), Vec2::new(1000.0, 500.0), 0.0);
        assert_eq!(level.status(), LevelStatus::Continue);
        assert_eq!(level.status().code(), 0);
    }

    #[test]
    fn won_when_all_collected_and_stays_won() {
        let mut level = Level::new(&desc(2), Vec2::new(1000.0, 500.0), 0.0);
        level.collect();
        assert_eq!(level.evaluate(), LevelStatus::Continue);
        level.collect();
        assert_eq!(level.evaluate(), LevelStatus::Won);
        level.request_quit();
        assert_eq!(level.evaluate(), LevelStatus::Won);
        assert_eq!(level.status().code(), 1);
    }

    #[test]
    fn zero_needed_wins_on_first_evaluation() {
        let mut level = Level::new(&desc(0), Vec2::new(1000.0, 500.0), 0.0);
        assert_eq!(level.evaluate(), LevelStatus::Won);
    }

    #[test]
    fn quit_is_terminal() {
        let mut level = Level::new(&desc(1), Vec2::new(1000.0, 500.0), 0.0);
        level.request_quit();
        level.collect();
        assert_eq!(level.evaluate(), LevelStatus::Quit);
        assert_eq!(level.status().code(), -1);
        assert!(level.status().is_terminal());
    }
}
