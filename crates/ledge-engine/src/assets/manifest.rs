use log::warn;

use crate::api::error::LevelError;
use crate::components::body::BodyKind;
use crate::core::level::LevelDesc;

impl LevelDesc {
    /// Parse a level from a JSON string and check that it is playable.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let desc: LevelDesc = serde_json::from_str(json)?;
        desc.validate()?;
        Ok(desc)
    }

    /// Check the invariants the body factory and frame loop rely on.
    pub fn validate(&self) -> Result<(), LevelError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(LevelError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let player = self.bodies.first().ok_or(LevelError::NoBodies)?;
        if player.kind != BodyKind::Dynamic {
            return Err(LevelError::PlayerNotDynamic { found: player.kind });
        }

        for (index, spec) in self.bodies.iter().enumerate() {
            if !(spec.rect.w > 0.0 && spec.rect.h > 0.0) {
                return Err(LevelError::InvalidBodySize {
                    index,
                    w: spec.rect.w,
                    h: spec.rect.h,
                });
            }
            match (spec.kind, spec.motion) {
                (BodyKind::Kinematic, None) => return Err(LevelError::MissingMotion { index }),
                (BodyKind::Kinematic, Some(motion)) => {
                    if !(motion.period.is_finite() && motion.period > 0.0) {
                        return Err(LevelError::InvalidPeriod {
                            index,
                            period: motion.period,
                        });
                    }
                }
                (kind, Some(_)) => {
                    warn!("level '{}': body {} is {:?}; its motion is ignored", self.name, index, kind);
                }
                (_, None) => {}
            }
        }

        let collectibles = self
            .bodies
            .iter()
            .filter(|b| b.kind == BodyKind::Collectible)
            .count();
        if (collectibles as i64) < self.collectibles_needed as i64 {
            warn!(
                "level '{}' needs {} collectibles but only places {}",
                self.name, self.collectibles_needed, collectibles
            );
        }
        Ok(())
    }
}
