pub mod levels;
pub mod manifest;
