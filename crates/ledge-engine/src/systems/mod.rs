pub mod factory;
pub mod intent;
pub mod kinematic;
pub mod render;
pub mod step;
