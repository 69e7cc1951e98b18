use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod rules;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::{Difficulty, EngineConfig};
pub use error::{BoardError, MoveError};
pub use game::GameSession;
pub use types::{Cell, GameState, GameStatus, HistoryRecord, Move, Position, ScoredMove, Side};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Routes `log` output to the browser console. Unknown levels default to `info`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) {
    let level = level.parse().unwrap_or(log::Level::Info);
    _ = console_log::init_with_level(level);
}
