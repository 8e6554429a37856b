use glam::Vec2;
use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};
use serde::{Deserialize, Serialize};

use crate::api::types::{BodyIndex, PixelRect, Rgba};

/// What a level body is. Decides simulation type, shape, sensors and how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Static,
    Dynamic,
    Kinematic,
    Collectible,
}

impl BodyKind {
    /// Static and kinematic platforms carry ground/wall sensors.
    pub fn has_side_sensors(self) -> bool {
        matches!(self, BodyKind::Static | BodyKind::Kinematic)
    }

    pub fn is_round(self) -> bool {
        self == BodyKind::Collectible
    }
}

/// Back-and-forth schedule for a kinematic platform, in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicMotion {
    pub start: Vec2,
    pub end: Vec2,
    /// Full period in seconds (out and back).
    pub period: f32,
}

/// Authored description of one level body. Immutable after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub kind: BodyKind,
    pub rect: PixelRect,
    #[serde(default = "default_color")]
    pub color: Rgba,
    /// Only meaningful for `Kinematic` bodies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion: Option<KinematicMotion>,
}

fn default_color() -> Rgba {
    Rgba::WHITE
}

impl BodySpec {
    pub fn new(kind: BodyKind, rect: PixelRect, color: Rgba) -> Self {
        Self {
            kind,
            rect,
            color,
            motion: None,
        }
    }

    pub fn with_motion(mut self, motion: KinematicMotion) -> Self {
        self.motion = Some(motion);
        self
    }
}

/// Role carried by a sensor shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorRole {
    Ground,
    Wall,
    Collectible,
}

impl SensorRole {
    pub(crate) fn code(self) -> u8 {
        match self {
            SensorRole::Ground => 1,
            SensorRole::Wall => 2,
            SensorRole::Collectible => 3,
        }
    }

    pub(crate) fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(SensorRole::Ground),
            2 => Some(SensorRole::Wall),
            3 => Some(SensorRole::Collectible),
            _ => None,
        }
    }
}

/// Runtime body: simulation handles plus presentation state.
#[derive(Debug, Clone)]
pub struct Body {
    pub index: BodyIndex,
    pub kind: BodyKind,
    pub color: Rgba,
    pub handle: RigidBodyHandle,
    /// Solid box, or the collectible's circle sensor.
    pub primary: ColliderHandle,
    /// Auxiliary ground/wall sensors (static and kinematic bodies only).
    pub sensors: Vec<(ColliderHandle, SensorRole)>,
    /// Draw rectangle in screen pixels. Recomputed every frame.
    pub rect: PixelRect,
    /// Cleared once a collectible has been picked up.
    pub visible: bool,
    pub motion: Option<KinematicMotion>,
}

impl Body {
    pub fn size(&self) -> Vec2 {
        self.rect.size()
    }
}
