pub mod hint_bridge;
pub mod runner;
pub mod storage;

pub use hint_bridge::JsHintBridge;
pub use runner::GameRunner;
pub use storage::LocalStore;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wordcircle::{
    InputEvent, LevelBook, WordCircle, WordCircleConfig, CUSTOM_HINT, CUSTOM_NEXT_LEVEL,
    CUSTOM_SELECT_THEME, CUSTOM_SKIP, CUSTOM_UNDO, THEMES,
};

/// The game as the browser runs it.
pub type WebGame = WordCircle<JsHintBridge, LocalStore>;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner<WebGame>>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut GameRunner<WebGame>) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
        f(runner)
    })
}

fn push_custom(kind: u32, a: f32) {
    with_runner(|r| r.push_input(InputEvent::Custom { kind, a }));
}

#[wasm_bindgen]
pub fn game_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = WordCircleConfig {
        seed: js_sys::Date::now() as u64,
        ..WordCircleConfig::default()
    };
    let game = WordCircle::new(LevelBook::bundled(), LocalStore::open(), JsHintBridge::new(), config);
    let runner = GameRunner::new(game);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    with_runner(|r| r.init());
    log::info!("wordcircle: initialized");
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn game_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn game_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn game_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn game_custom_event(kind: u32, a: f32) {
    push_custom(kind, a);
}

// ---- Buttons ----

#[wasm_bindgen]
pub fn game_hint() {
    push_custom(CUSTOM_HINT, 0.0);
}

#[wasm_bindgen]
pub fn game_skip() {
    push_custom(CUSTOM_SKIP, 0.0);
}

#[wasm_bindgen]
pub fn game_undo() {
    push_custom(CUSTOM_UNDO, 0.0);
}

#[wasm_bindgen]
pub fn game_next_level() {
    push_custom(CUSTOM_NEXT_LEVEL, 0.0);
}

/// Select a theme by id. Unknown ids are logged and ignored.
#[wasm_bindgen]
pub fn game_select_theme(id: &str) {
    match THEMES.iter().position(|t| t.id == id) {
        Some(index) => push_custom(CUSTOM_SELECT_THEME, index as f32),
        None => log::warn!("unknown theme id {id}"),
    }
}

// ---- Hint bridge ----

/// The request parked by the last HINT_REQUESTED event, as JSON, or an empty
/// string when there is none.
#[wasm_bindgen]
pub fn get_hint_request_json() -> String {
    with_runner(|r| {
        match r.game_mut().hints_mut().take_request() {
            Some(request) => serde_json::to_string(&request).unwrap_or_else(|err| {
                log::warn!("could not encode hint request: {err}");
                String::new()
            }),
            None => String::new(),
        }
    })
}

/// Answer a hint request with `{ ticket, clue, word }` JSON, where `ticket`
/// is copied from the request JSON.
#[wasm_bindgen]
pub fn game_hint_resolved(json: &str) {
    with_runner(|r| {
        if let Some(reply) = r.game_mut().hints_mut().resolve_json(json) {
            r.push_input(InputEvent::HintReply(reply));
        }
    });
}

/// Report that the request whose `ticket` JSON is given could not be answered.
#[wasm_bindgen]
pub fn game_hint_failed(ticket_json: &str, reason: &str) {
    with_runner(|r| {
        if let Some(reply) = r.game_mut().hints_mut().fail_json(ticket_json, reason) {
            r.push_input(InputEvent::HintReply(reply));
        }
    });
}

// ---- Data accessors ----

/// Full UI state as JSON.
#[wasm_bindgen]
pub fn get_state_json() -> String {
    with_runner(|r| {
        serde_json::to_string(&r.game().snapshot()).unwrap_or_else(|err| {
            log::warn!("could not encode state: {err}");
            String::new()
        })
    })
}

#[wasm_bindgen]
pub fn get_sound_events_ptr() -> *const u8 {
    with_runner(|r| r.sound_events_ptr())
}

#[wasm_bindgen]
pub fn get_sound_events_len() -> u32 {
    with_runner(|r| r.sound_events_len())
}

#[wasm_bindgen]
pub fn get_game_events_ptr() -> *const f32 {
    with_runner(|r| r.game_events_ptr())
}

#[wasm_bindgen]
pub fn get_game_events_len() -> u32 {
    with_runner(|r| r.game_events_len())
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.world_width())
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.world_height())
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_sounds() -> u32 {
    with_runner(|r| r.max_sounds())
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events())
}
