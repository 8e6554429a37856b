use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::error::ConfigError;
use crate::components::player::PlayerTuning;
use crate::core::units::{Units, PIXELS_PER_UNIT};

/// Configuration for the engine. Every field has a default, so a JSON
/// config only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Viewport width in pixels (default: 1000).
    pub viewport_width: f32,
    /// Viewport height in pixels (default: 500).
    pub viewport_height: f32,
    /// Pixels per simulation unit (default: 50).
    pub pixels_per_unit: f32,
    /// Gravity in simulation units, y-up (default: (0, -10)).
    pub gravity: Vec2,
    /// Fixed simulation timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Constraint solver iterations per step (default: 8).
    pub solver_iterations: usize,
    /// Target frame duration in milliseconds (default: 1000/60).
    pub frame_budget_ms: f64,
    /// Simulated seconds after level start during which sensor events are
    /// dropped (default: 0.5).
    pub sensor_grace_secs: f32,
    /// Upper bound on the elapsed frame time fed to the input mapper (default: 100).
    pub max_frame_elapsed_ms: f32,
    /// Mass of every dynamic body, independent of its size (default: 1).
    pub body_mass: f32,
    /// Friction for ordinary bodies (default: 0.5).
    pub friction: f32,
    /// Friction for moving platforms (default: 1.0).
    pub kinematic_friction: f32,
    /// Player tuning for levels that do not override it.
    pub player: PlayerTuning,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1000.0,
            viewport_height: 500.0,
            pixels_per_unit: PIXELS_PER_UNIT,
            gravity: Vec2::new(0.0, -10.0),
            fixed_dt: 1.0 / 60.0,
            solver_iterations: 8,
            frame_budget_ms: 1000.0 / 60.0,
            sensor_grace_secs: 0.5,
            max_frame_elapsed_ms: 100.0,
            body_mass: 1.0,
            friction: 0.5,
            kinematic_friction: 1.0,
            player: PlayerTuning::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive, got {}", value),
                })
            }
        }

        fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be non-negative, got {}", value),
                })
            }
        }

        positive("viewport_width", self.viewport_width)?;
        positive("viewport_height", self.viewport_height)?;
        positive("pixels_per_unit", self.pixels_per_unit)?;
        positive("fixed_dt", self.fixed_dt)?;
        positive("body_mass", self.body_mass)?;
        non_negative("max_frame_elapsed_ms", self.max_frame_elapsed_ms)?;
        non_negative("sensor_grace_secs", self.sensor_grace_secs)?;
        non_negative("friction", self.friction)?;
        non_negative("kinematic_friction", self.kinematic_friction)?;
        if self.solver_iterations == 0 {
            return Err(ConfigError::Invalid {
                field: "solver_iterations",
                reason: "must be at least 1".into(),
            });
        }
        if self.frame_budget_ms.is_nan() || self.frame_budget_ms < 0.0 {
            return Err(ConfigError::Invalid {
                field: "frame_budget_ms",
                reason: format!("must be non-negative, got {}", self.frame_budget_ms),
            });
        }
        Ok(())
    }

    pub fn units(&self) -> Units {
        Units::new(self.pixels_per_unit, self.viewport_height)
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuned_values() {
        let config = GameConfig::default();
        assert_eq!(config.viewport(), Vec2::new(1000.0, 500.0));
        assert_eq!(config.solver_iterations, 8);
        assert!((config.fixed_dt - 1.0 / 60.0).abs() < 1e-9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "gravity": [0.0, -20.0], "player": { "horizontal_force": 3.0 } }"#)
            .unwrap();
        assert_eq!(config.gravity, Vec2::new(0.0, -20.0));
        assert!((config.player.horizontal_force - 3.0).abs() < 1e-6);
        assert_eq!(config.player.max_jump_buffer_frames, 10);
        assert!((config.pixels_per_unit - 50.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_zero_scale() {
        let err = GameConfig::from_json(r#"{ "pixels_per_unit": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "pixels_per_unit", .. }));
    }

    #[test]
    fn rejects_negative_elapsed_cap() {
        let err = GameConfig::from_json(r#"{ "max_frame_elapsed_ms": -1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "max_frame_elapsed_ms", .. }));

        let config = GameConfig {
            max_frame_elapsed_ms: f32::NAN,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_negative_grace_and_friction() {
        for field in ["sensor_grace_secs", "friction", "kinematic_friction"] {
            let json = format!(r#"{{ "{}": -0.5 }}"#, field);
            let err = GameConfig::from_json(&json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { field: f, .. } if f == field));
        }
    }

    #[test]
    fn zero_elapsed_cap_is_allowed() {
        let config = GameConfig::from_json(r#"{ "max_frame_elapsed_ms": 0, "sensor_grace_secs": 0 }"#)
            .unwrap();
        assert_eq!(config.max_frame_elapsed_ms, 0.0);
    }

    #[test]
    fn rejects_zero_solver_iterations() {
        let err = GameConfig::from_json(r#"{ "solver_iterations": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "solver_iterations", .. }));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            GameConfig::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }
}
