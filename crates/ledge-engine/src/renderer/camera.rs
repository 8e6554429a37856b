use glam::Vec2;

use crate::api::types::PixelRect;
use crate::core::level::CameraBounds;

/// Screen offset that keeps the player centered until a level edge is near.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    viewport: Vec2,
    offset: Vec2,
}

impl Camera {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            offset: Vec2::ZERO,
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Recompute the offset from the player's pixel position (top-left of its
    /// rectangle, level coordinates). Near an edge the frame is held so that
    /// nothing outside the level scrolls into view.
    pub fn follow(&mut self, target: Vec2, level_size: Vec2, bounds: &CameraBounds) -> Vec2 {
        let mut offset = self.viewport / 2.0 - target;

        if target.x <= bounds.left {
            offset.x = 0.0;
        }
        // The far edge wins when a level is no wider than the viewport.
        if target.x >= bounds.right {
            offset.x = self.viewport.x - level_size.x;
        }
        if target.y <= bounds.bottom {
            offset.y = 0.0;
        }
        if target.y >= bounds.top {
            offset.y = self.viewport.y - level_size.y;
        }

        self.offset = offset;
        offset
    }

    /// Level-space rectangle → screen rectangle.
    pub fn to_screen(&self, rect: PixelRect) -> PixelRect {
        rect.offset_by(self.offset)
    }
}
