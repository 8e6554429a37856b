//! Headless runner for the Ledge platformer.
//!
//! Plays the built-in level sequence with a scripted input pattern and a
//! renderer that writes draw commands to the log.
//!
//! ```bash
//! # Paced at 60 fps on the wall clock, quitting after 10 seconds
//! ledge --frames 600
//!
//! # As fast as possible, with per-draw tracing
//! ledge --unpaced --frames 5000 --log-level trace
//! ```

use std::process::ExitCode;

use clap::Parser;
use glam::Vec2;
use ledge_engine::{
    run, Clock, Game, GameConfig, GameStatus, InputSource, Key, KeyState, ManualClock, PixelRect,
    Renderer, Rgba, SystemClock,
};
use log::{debug, error, info, trace};

/// Ledge headless runner
#[derive(Parser, Debug)]
#[command(name = "ledge")]
#[command(version, about = "Run the Ledge level sequence without a window", long_about = None)]
struct Cli {
    /// JSON config file overriding the defaults
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Send a quit request after this many frames
    #[arg(short, long, default_value = "3600")]
    frames: u64,

    /// Skip frame pacing and step on a manual clock
    #[arg(long)]
    unpaced: bool,

    /// Logging verbosity level (overridden by RUST_LOG)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Scripted keys: runs right, hops, runs back left, hops, and so on.
/// Requests quit once the frame limit is reached.
struct Autopilot {
    frame: u64,
    limit: u64,
}

impl Autopilot {
    const LEG_FRAMES: u64 = 180;
    const HOP_EVERY: u64 = 45;
    const HOP_FRAMES: u64 = 12;

    fn new(limit: u64) -> Self {
        Self { frame: 0, limit }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self) -> KeyState {
        let frame = self.frame;
        self.frame += 1;
        if frame >= self.limit {
            return KeyState::NONE.with(Key::Quit);
        }

        let mut keys = KeyState::NONE;
        if (frame / Self::LEG_FRAMES) % 2 == 0 {
            keys.press(Key::Right);
        } else {
            keys.press(Key::Left);
        }
        if frame % Self::HOP_EVERY < Self::HOP_FRAMES {
            keys.press(Key::Up);
        }
        keys
    }
}

/// Writes each frame's draw commands to the log.
#[derive(Default)]
struct LogRenderer {
    frame: u64,
    shapes: usize,
    hud: String,
}

impl Renderer for LogRenderer {
    fn clear(&mut self, color: Rgba) {
        self.shapes = 0;
        trace!("frame {}: clear {:?}", self.frame, color);
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgba) {
        self.shapes += 1;
        trace!("  rect ({:.1}, {:.1}) {}x{} {:?}", rect.x, rect.y, rect.w, rect.h, color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.shapes += 1;
        trace!("  circle ({:.1}, {:.1}) r={} {:?}", center.x, center.y, radius, color);
    }

    fn draw_text(&mut self, _x: f32, _y: f32, text: &str) {
        if self.hud != text {
            info!("{}", text);
            self.hud = text.to_owned();
        }
    }

    fn present(&mut self) {
        debug!("frame {} presented with {} shapes", self.frame, self.shapes);
        self.frame += 1;
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<GameConfig, String> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    GameConfig::from_json(&json).map_err(|e| format!("{}: {}", path.display(), e))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut clock: Box<dyn Clock> = if cli.unpaced {
        Box::new(ManualClock::new())
    } else {
        Box::new(SystemClock::new())
    };

    let mut game = match Game::with_builtin_levels(config, clock.now_ms()) {
        Ok(game) => game,
        Err(e) => {
            error!("failed to start: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("playing {} levels", game.level_count());

    let mut input = Autopilot::new(cli.frames);
    let mut renderer = LogRenderer::default();

    match run(&mut game, &mut input, &mut renderer, clock.as_mut()) {
        Ok(GameStatus::Finished) => {
            info!("all levels complete after {} frames", renderer.frame);
            ExitCode::SUCCESS
        }
        Ok(status) => {
            info!(
                "stopped ({:?}) on level {} after {} frames",
                status,
                game.level_index() + 1,
                renderer.frame
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
