//! Renderer contract for front-ends.
//!
//! The engine never touches a graphics API. Each frame it clears, issues
//! filled rectangles and circles in screen pixels, writes the HUD readout
//! and presents. Backends decide how that reaches the screen: the web
//! bridge records a [`DrawList`](super::instance::DrawList) that
//! JavaScript replays onto a canvas, the native binary logs it.

use glam::Vec2;

use crate::api::types::{PixelRect, Rgba};

pub trait Renderer {
    /// Start a frame by filling the whole viewport with `color`.
    fn clear(&mut self, color: Rgba);

    /// Filled axis-aligned rectangle. `rect` is in screen pixels.
    fn fill_rect(&mut self, rect: PixelRect, color: Rgba);

    /// Filled circle centered at `center` (screen pixels).
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// White text with its top-left corner at (x, y).
    fn draw_text(&mut self, x: f32, y: f32, text: &str);

    /// Finish the frame.
    fn present(&mut self);
}
