use log::info;

use crate::api::config::GameConfig;
use crate::api::error::GameError;
use crate::api::world::World;
use crate::assets::levels;
use crate::core::level::{LevelDesc, LevelStatus};
use crate::core::time::{Clock, FramePacer};
use crate::input::keys::{InputSource, KeyState};
use crate::renderer::traits::Renderer;

/// Where the level sequence stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// The last level was won.
    Finished,
    /// A close request ended the game.
    Quit,
}

/// Plays a fixed list of levels in order. Owns the live [`World`] and
/// replaces it wholesale when a level is won.
pub struct Game {
    config: GameConfig,
    levels: Vec<LevelDesc>,
    current: usize,
    world: World,
    last_frame_ms: f64,
    status: GameStatus,
}

impl Game {
    pub fn new(config: GameConfig, levels: Vec<LevelDesc>, now_ms: f64) -> Result<Self, GameError> {
        config.validate()?;
        let first = levels.first().ok_or(GameError::NoLevels)?;
        let world = World::load(&config, first, now_ms)
            .map_err(|source| GameError::Level { index: 0, source })?;

        Ok(Self {
            config,
            levels,
            current: 0,
            world,
            last_frame_ms: now_ms,
            status: GameStatus::Running,
        })
    }

    /// A game over the levels compiled into the engine.
    pub fn with_builtin_levels(config: GameConfig, now_ms: f64) -> Result<Self, GameError> {
        Self::new(config, levels::builtin()?, now_ms)
    }

    /// Run one frame at clock time `now_ms`. A quitting frame is not drawn.
    /// Winning a level loads the next one before returning.
    pub fn frame(
        &mut self,
        now_ms: f64,
        keys: KeyState,
        renderer: &mut dyn Renderer,
    ) -> Result<GameStatus, GameError> {
        if self.status != GameStatus::Running {
            return Ok(self.status);
        }

        let elapsed = now_ms - self.last_frame_ms;
        self.last_frame_ms = now_ms;

        match self.world.frame(elapsed, keys) {
            LevelStatus::Continue => self.world.render(renderer),
            LevelStatus::Quit => {
                info!("quit requested during level {}", self.current + 1);
                self.status = GameStatus::Quit;
            }
            LevelStatus::Won => {
                self.world.render(renderer);
                let level = self.world.level();
                info!(
                    "level {} '{}' complete in {:.2}s",
                    self.current + 1,
                    level.name,
                    (now_ms - level.start_ms) / 1000.0
                );
                self.advance(now_ms)?;
            }
        }
        Ok(self.status)
    }

    fn advance(&mut self, now_ms: f64) -> Result<(), GameError> {
        let next = self.current + 1;
        match self.levels.get(next) {
            Some(desc) => match World::load(&self.config, desc, now_ms) {
                Ok(world) => {
                    self.world = world;
                    self.current = next;
                }
                Err(source) => {
                    // Settle before reporting; the won world stays for inspection.
                    self.status = GameStatus::Quit;
                    return Err(GameError::Level { index: next, source });
                }
            },
            None => {
                info!("all {} levels complete", self.levels.len());
                self.status = GameStatus::Finished;
            }
        }
        Ok(())
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Zero-based index of the level being played.
    pub fn level_index(&self) -> usize {
        self.current
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

/// Blocking frame loop: poll input, run a frame, hold to the frame budget.
/// Returns when the game is finished or quit.
pub fn run(
    game: &mut Game,
    input: &mut dyn InputSource,
    renderer: &mut dyn Renderer,
    clock: &mut dyn Clock,
) -> Result<GameStatus, GameError> {
    let pacer = FramePacer::new(game.config().frame_budget_ms);
    loop {
        let frame_start = clock.now_ms();
        let keys = input.poll();
        let status = game.frame(frame_start, keys, renderer)?;
        if status != GameStatus::Running {
            return Ok(status);
        }
        pacer.pace(clock, frame_start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::LevelError;
    use crate::api::types::{PixelRect, Rgba};
    use crate::components::body::{BodyKind, BodySpec};
    use crate::core::time::ManualClock;
    use crate::input::keys::Key;
    use crate::renderer::instance::DrawList;

    /// Player dropping through `coins` collectibles onto a floor.
    fn drop_level(name: &str, coins: usize) -> LevelDesc {
        let mut bodies = vec![
            BodySpec::new(BodyKind::Dynamic, PixelRect::new(100.0, 100.0, 50.0, 50.0), Rgba::WHITE),
            BodySpec::new(BodyKind::Static, PixelRect::new(0.0, 480.0, 1000.0, 20.0), Rgba::WHITE),
        ];
        for i in 0..coins {
            bodies.push(BodySpec::new(
                BodyKind::Collectible,
                PixelRect::new(100.0, 250.0 + 100.0 * i as f32, 50.0, 50.0),
                Rgba::WHITE,
            ));
        }
        LevelDesc {
            name: name.into(),
            width: 1000.0,
            height: 500.0,
            collectibles_needed: coins as i32,
            player: None,
            bodies,
        }
    }

    #[test]
    fn empty_level_list_is_an_error() {
        let err = Game::new(GameConfig::default(), Vec::new(), 0.0).err();
        assert!(matches!(err, Some(GameError::NoLevels)));
    }

    #[test]
    fn broken_level_reports_its_index() {
        let mut broken = drop_level("broken", 0);
        broken.bodies.clear();
        let err = Game::new(GameConfig::default(), vec![broken], 0.0).err();
        assert!(matches!(
            err,
            Some(GameError::Level { index: 0, source: LevelError::NoBodies })
        ));
    }

    #[test]
    fn plays_through_the_sequence() {
        let levels = vec![drop_level("one", 1), drop_level("two", 2)];
        let mut game = Game::new(GameConfig::default(), levels, 0.0).unwrap();
        let mut input = KeyState::NONE;
        let mut renderer = DrawList::new();
        let mut clock = ManualClock::new();

        let status = run(&mut game, &mut input, &mut renderer, &mut clock).unwrap();
        assert_eq!(status, GameStatus::Finished);
        assert_eq!(game.level_index(), 1);
        assert_eq!(game.world().level().name, "two");
        assert!(renderer.frames_presented() > 60);
        // Paced at the frame budget on the manual clock.
        let frames = renderer.frames_presented() as f64;
        assert!(clock.now_ms() >= (frames - 1.0) * (1000.0 / 60.0) - 1e-6);
    }

    #[test]
    fn quit_stops_without_drawing() {
        let mut game = Game::new(GameConfig::default(), vec![drop_level("one", 1)], 0.0).unwrap();
        let mut renderer = DrawList::new();

        let status = game
            .frame(16.0, KeyState::NONE.with(Key::Quit), &mut renderer)
            .unwrap();
        assert_eq!(status, GameStatus::Quit);
        assert_eq!(renderer.frames_presented(), 0);

        // Terminal: later frames do nothing.
        let status = game.frame(32.0, KeyState::NONE, &mut renderer).unwrap();
        assert_eq!(status, GameStatus::Quit);
        assert_eq!(renderer.frames_presented(), 0);
    }

    #[test]
    fn failed_level_load_ends_the_game() {
        let mut broken = drop_level("broken", 0);
        broken.bodies.truncate(1);
        broken.bodies[0].kind = BodyKind::Static;
        let levels = vec![drop_level("one", 1), broken];
        let mut game = Game::new(GameConfig::default(), levels, 0.0).unwrap();
        let mut renderer = DrawList::new();

        let mut now = 0.0;
        let err = loop {
            now += 1000.0 / 60.0;
            match game.frame(now, KeyState::NONE, &mut renderer) {
                Ok(GameStatus::Running) => assert!(now < 10_000.0, "level one never won"),
                Ok(status) => panic!("unexpected status {:?}", status),
                Err(err) => break err,
            }
        };
        assert!(matches!(err, GameError::Level { index: 1, .. }));
        assert_eq!(game.status(), GameStatus::Quit);
        assert_eq!(game.level_index(), 0);

        // Settled: no retry on later frames.
        let presented = renderer.frames_presented();
        assert_eq!(game.frame(now + 16.0, KeyState::NONE, &mut renderer).unwrap(), GameStatus::Quit);
        assert_eq!(renderer.frames_presented(), presented);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GameConfig {
            fixed_dt: 0.0,
            ..GameConfig::default()
        };
        let err = Game::new(config, vec![drop_level("one", 1)], 0.0).err();
        assert!(matches!(err, Some(GameError::Config(_))));
    }
}
