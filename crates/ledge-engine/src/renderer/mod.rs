pub mod camera;
pub mod instance;
pub mod traits;

pub use camera::Camera;
pub use instance::{DrawInstance, DrawList, TextCommand};
pub use traits::Renderer;
