use crate::api::error::GameError;
use crate::core::level::LevelDesc;

/// The built-in level sequence, embedded at compile time.
pub const BUILTIN_LEVELS: [&str; 3] = [
    include_str!("../../levels/level1.json"),
    include_str!("../../levels/level2.json"),
    include_str!("../../levels/level3.json"),
];

/// Parse and validate the built-in levels in play order.
pub fn builtin() -> Result<Vec<LevelDesc>, GameError> {
    BUILTIN_LEVELS
        .iter()
        .enumerate()
        .map(|(index, json)| {
            LevelDesc::from_json(json).map_err(|source| GameError::Level { index, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::GameConfig;
    use crate::api::world::World;
    use crate::components::body::BodyKind;

    #[test]
    fn builtin_levels_parse() {
        let levels = builtin().unwrap();
        let shape: Vec<_> = levels
            .iter()
            .map(|l| (l.width, l.height, l.bodies.len(), l.collectibles_needed))
            .collect();
        assert_eq!(
            shape,
            vec![
                (1000.0, 500.0, 17, 8),
                (2000.0, 500.0, 24, 9),
                (3000.0, 1000.0, 38, 17),
            ]
        );
    }

    #[test]
    fn every_level_places_enough_collectibles() {
        for level in builtin().unwrap() {
            let placed = level
                .bodies
                .iter()
                .filter(|b| b.kind == BodyKind::Collectible)
                .count() as i32;
            assert!(placed >= level.collectibles_needed, "level '{}'", level.name);
            assert_eq!(
                level.bodies.iter().filter(|b| b.kind == BodyKind::Kinematic).count(),
                1
            );
        }
    }

    #[test]
    fn builtin_levels_load() {
        let config = GameConfig::default();
        for level in builtin().unwrap() {
            let world = World::load(&config, &level, 0.0).unwrap();
            assert_eq!(world.scene().len(), level.bodies.len());
        }
    }
}
