use ledge_engine::{DrawList, Game, GameConfig, GameError, GameStatus, InputEvent, InputQueue};

/// Wires the engine loop to a browser host.
///
/// The host calls [`GameRunner::tick`] once per animation frame with its
/// clock, pushes keyboard events in between, and reads the draw list back
/// out of WASM memory after each tick.
pub struct GameRunner {
    game: Game,
    input: InputQueue,
    draw_list: DrawList,
    status: GameStatus,
}

impl GameRunner {
    pub fn new(config: GameConfig, now_ms: f64) -> Result<Self, GameError> {
        let game = Game::with_builtin_levels(config, now_ms)?;
        Ok(Self {
            game,
            input: InputQueue::new(),
            draw_list: DrawList::new(),
            status: GameStatus::Running,
        })
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    pub fn push_key_code(&mut self, key_code: u32, down: bool) {
        self.input.push_key_code(key_code, down);
    }

    /// Run one frame. A load failure mid-sequence ends the game.
    pub fn tick(&mut self, now_ms: f64) -> GameStatus {
        if self.status != GameStatus::Running {
            return self.status;
        }
        let keys = self.input.fold();
        self.status = match self.game.frame(now_ms, keys, &mut self.draw_list) {
            Ok(status) => status,
            Err(err) => {
                log::error!("{}", err);
                GameStatus::Quit
            }
        };
        self.status
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Status as a number for JavaScript: 0 running, 1 finished, -1 quit.
    pub fn status_code(&self) -> i32 {
        match self.status {
            GameStatus::Running => 0,
            GameStatus::Finished => 1,
            GameStatus::Quit => -1,
        }
    }

    // ---- Pointer accessors for reads from WASM memory ----

    pub fn draw_ptr(&self) -> *const f32 {
        self.draw_list.instances_ptr()
    }

    pub fn draw_count(&self) -> u32 {
        self.draw_list.instance_count()
    }

    /// HUD text of the last presented frame, one line per entry.
    pub fn hud_text(&self) -> String {
        self.draw_list
            .texts()
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn collectibles_remaining(&self) -> i32 {
        self.game.world().level().collectibles_remaining
    }

    pub fn level_index(&self) -> u32 {
        self.game.level_index() as u32
    }

    pub fn viewport_width(&self) -> f32 {
        self.game.config().viewport_width
    }

    pub fn viewport_height(&self) -> f32 {
        self.game.config().viewport_height
    }
}
