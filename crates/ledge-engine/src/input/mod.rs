pub mod keys;
pub mod queue;

pub use keys::{InputSource, Key, KeyState};
pub use queue::{InputEvent, InputQueue};
