pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::config::GameConfig;
pub use api::error::{ConfigError, GameError, LevelError};
pub use api::game::{run, Game, GameStatus};
pub use api::types::{BodyIndex, PixelRect, Rgba};
pub use api::world::World;
pub use components::body::{Body, BodyKind, BodySpec, KinematicMotion, SensorRole};
pub use components::player::{Player, PlayerTuning};
pub use self::core::level::{CameraBounds, Level, LevelDesc, LevelStatus};
pub use self::core::physics::{PhysicsWorld, SensorContact};
pub use self::core::scene::Scene;
pub use self::core::time::{Clock, FramePacer, ManualClock, SimTime, SystemClock};
pub use self::core::units::{Units, PIXELS_PER_UNIT};
pub use input::keys::{InputSource, Key, KeyState};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::Camera;
pub use renderer::instance::{DrawInstance, DrawList, TextCommand};
pub use renderer::traits::Renderer;
pub use systems::step::SensorStats;
