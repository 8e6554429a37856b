//! Pixel space ↔ simulation space.
//!
//! Pixel space is what levels are authored in and what the renderer draws:
//! origin at the top-left of the viewport, y grows downward, positions name
//! a rectangle's top-left corner.
//!
//! Simulation space is what the physics engine integrates: origin at the
//! bottom-left, y grows upward, one unit is `pixels_per_unit` pixels and
//! positions name a body's center.

use glam::Vec2;

use crate::api::types::PixelRect;

/// Default pixels per simulation unit.
pub const PIXELS_PER_UNIT: f32 = 50.0;

/// Conversion parameters shared by every body in a level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Units {
    pixels_per_unit: f32,
    viewport_height: f32,
}

impl Units {
    pub fn new(pixels_per_unit: f32, viewport_height: f32) -> Self {
        Self {
            pixels_per_unit,
            viewport_height,
        }
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Scalar pixels → simulation units.
    pub fn to_sim_units(&self, pixels: f32) -> f32 {
        pixels / self.pixels_per_unit
    }

    /// Scalar simulation units → pixels.
    pub fn to_pixel_units(&self, units: f32) -> f32 {
        units * self.pixels_per_unit
    }

    /// Half extents of a pixel rectangle, in simulation units.
    pub fn half_extents(&self, rect: &PixelRect) -> Vec2 {
        Vec2::new(
            self.to_sim_units(rect.w / 2.0),
            self.to_sim_units(rect.h / 2.0),
        )
    }

    /// Simulation-space center of a pixel rectangle.
    pub fn rect_to_sim(&self, rect: &PixelRect) -> Vec2 {
        Vec2::new(
            self.to_sim_units(rect.x + rect.w / 2.0),
            self.to_sim_units(self.viewport_height - rect.y - rect.h / 2.0),
        )
    }

    /// Top-left pixel corner of a `size`-sized rectangle centered at `sim_pos`.
    /// Exact inverse of [`Units::rect_to_sim`].
    pub fn sim_to_pixel(&self, sim_pos: Vec2, size: Vec2) -> Vec2 {
        Vec2::new(
            self.to_pixel_units(sim_pos.x) - size.x / 2.0,
            self.viewport_height - self.to_pixel_units(sim_pos.y) - size.y / 2.0,
        )
    }

    /// Pixel-space displacement → simulation-space displacement (y flipped).
    pub fn delta_to_sim(&self, delta: Vec2) -> Vec2 {
        Vec2::new(self.to_sim_units(delta.x), -self.to_sim_units(delta.y))
    }
}

impl Default for Units {
    fn default() -> Self {
        Self::new(PIXELS_PER_UNIT, 500.0)
    }
}
