//! Initialization errors. Everything here is fatal for the level or game
//! being built; nothing at frame time can fail.

use std::collections::TryReserveError;

use thiserror::Error;

/// A level descriptor that cannot be played.
#[derive(Error, Debug)]
pub enum LevelError {
    #[error("level JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("level has no bodies; body 0 must be the player")]
    NoBodies,

    #[error("body 0 must be dynamic to carry the player, found {found:?}")]
    PlayerNotDynamic { found: crate::components::body::BodyKind },

    #[error("level dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },

    #[error("body {index} has a non-positive size {w}x{h}")]
    InvalidBodySize { index: usize, w: f32, h: f32 },

    #[error("kinematic body {index} has no motion descriptor")]
    MissingMotion { index: usize },

    #[error("kinematic body {index} has an invalid period {period}")]
    InvalidPeriod { index: usize, period: f32 },

    #[error("could not allocate {count} bodies: {source}")]
    Allocation {
        count: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Game configuration that cannot be used.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Failure to start or advance the level sequence.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("no levels to play")]
    NoLevels,

    #[error("level {index} failed to load: {source}")]
    Level {
        index: usize,
        #[source]
        source: LevelError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
