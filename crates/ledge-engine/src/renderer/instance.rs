use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::traits::Renderer;
use crate::api::types::{PixelRect, Rgba};

/// One filled shape, as read by the JavaScript canvas replayer.
/// 9 floats = 36 bytes stride.
///
/// Circles are stored as their bounding square, so `x`/`y` are always a
/// top-left corner in screen pixels.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// [`DrawInstance::SHAPE_RECT`] or [`DrawInstance::SHAPE_CIRCLE`].
    pub shape: f32,
    /// Color channels in 0.0..=1.0.
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl DrawInstance {
    pub const FLOATS: usize = 9;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
    pub const SHAPE_RECT: f32 = 0.0;
    pub const SHAPE_CIRCLE: f32 = 1.0;

    fn new(rect: PixelRect, shape: f32, color: Rgba) -> Self {
        let channel = |c: u8| c as f32 / 255.0;
        Self {
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
            shape,
            r: channel(color.r()),
            g: channel(color.g()),
            b: channel(color.b()),
            a: channel(color.a()),
        }
    }

    pub fn is_circle(&self) -> bool {
        self.shape == Self::SHAPE_CIRCLE
    }
}

/// A line of HUD text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

/// Recording renderer. Holds the last presented frame.
pub struct DrawList {
    instances: Vec<DrawInstance>,
    texts: Vec<TextCommand>,
    clear_color: Rgba,
    frames_presented: u64,
}

impl DrawList {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            texts: Vec::new(),
            clear_color: Rgba::BLACK,
            frames_presented: 0,
        }
    }

    pub fn instances(&self) -> &[DrawInstance] {
        &self.instances
    }

    pub fn texts(&self) -> &[TextCommand] {
        &self.texts
    }

    pub fn clear_color(&self) -> Rgba {
        self.clear_color
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for reads from WASM memory.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// Instance data as one flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for DrawList {
    fn clear(&mut self, color: Rgba) {
        self.instances.clear();
        self.texts.clear();
        self.clear_color = color;
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgba) {
        self.instances
            .push(DrawInstance::new(rect, DrawInstance::SHAPE_RECT, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        let bounds = PixelRect::new(
            center.x - radius,
            center.y - radius,
            radius * 2.0,
            radius * 2.0,
        );
        self.instances
            .push(DrawInstance::new(bounds, DrawInstance::SHAPE_CIRCLE, color));
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str) {
        self.texts.push(TextCommand {
            x,
            y,
            text: text.to_owned(),
        });
    }

    fn present(&mut self) {
        self.frames_presented += 1;
    }
}
