pub mod runner;

pub use runner::GameRunner;

use std::cell::RefCell;

use ledge_engine::{GameConfig, InputEvent};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the live runner. Before `game_init` succeeds every
/// export returns `default`.
fn with_runner<R>(default: R, f: impl FnOnce(&mut GameRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => default,
    })
}

/// Page clock in milliseconds, on the same timeline as the
/// `requestAnimationFrame` timestamps passed to [`game_tick`].
fn page_now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Build the game. `config_json` may be empty for the defaults.
/// Returns false and logs the reason if the game cannot start.
#[wasm_bindgen]
pub fn game_init(config_json: &str) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    let now_ms = page_now_ms();

    let config = if config_json.trim().is_empty() {
        Ok(GameConfig::default())
    } else {
        GameConfig::from_json(config_json)
    };
    let runner = config
        .map_err(ledge_engine::GameError::from)
        .and_then(|config| GameRunner::new(config, now_ms));

    match runner {
        Ok(runner) => {
            RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
            log::info!("ledge: initialized");
            true
        }
        Err(err) => {
            log::error!("ledge: failed to start: {}", err);
            false
        }
    }
}

/// Advance one frame. Returns 0 while running, 1 when finished, -1 on quit.
#[wasm_bindgen]
pub fn game_tick(now_ms: f64) -> i32 {
    with_runner(-1, |r| {
        r.tick(now_ms);
        r.status_code()
    })
}

#[wasm_bindgen]
pub fn game_key_down(key_code: u32) {
    with_runner((), |r| r.push_key_code(key_code, true));
}

#[wasm_bindgen]
pub fn game_key_up(key_code: u32) {
    with_runner((), |r| r.push_key_code(key_code, false));
}

/// The page is closing.
#[wasm_bindgen]
pub fn game_close() {
    with_runner((), |r| r.push_input(InputEvent::CloseRequested));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_draw_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.draw_ptr())
}

#[wasm_bindgen]
pub fn get_draw_count() -> u32 {
    with_runner(0, |r| r.draw_count())
}

#[wasm_bindgen]
pub fn get_draw_floats_per_instance() -> u32 {
    ledge_engine::DrawInstance::FLOATS as u32
}

#[wasm_bindgen]
pub fn get_hud_text() -> String {
    with_runner(String::new(), |r| r.hud_text())
}

#[wasm_bindgen]
pub fn get_collectibles_remaining() -> i32 {
    with_runner(0, |r| r.collectibles_remaining())
}

#[wasm_bindgen]
pub fn get_level_index() -> u32 {
    with_runner(0, |r| r.level_index())
}

#[wasm_bindgen]
pub fn get_status() -> i32 {
    with_runner(-1, |r| r.status_code())
}

#[wasm_bindgen]
pub fn get_viewport_width() -> f32 {
    with_runner(0.0, |r| r.viewport_width())
}

#[wasm_bindgen]
pub fn get_viewport_height() -> f32 {
    with_runner(0.0, |r| r.viewport_height())
}
