use wasm_bindgen::prelude::*;

use crate::ai;
use crate::board::Board;
use crate::config::{Difficulty, EngineConfig};
use crate::game::GameSession;
use crate::types::{Position, Side};

/// Browser-facing handle around one [`GameSession`].
#[wasm_bindgen]
pub struct CheckersGame {
    session: GameSession,
    config: EngineConfig,
}

#[wasm_bindgen]
impl CheckersGame {
    #[wasm_bindgen(constructor)]
    pub fn new(difficulty: &str) -> Self {
        Self {
            session: GameSession::new(),
            config: EngineConfig::default().with_difficulty(Difficulty::from_label(difficulty)),
        }
    }

    /// Accepts `{ difficulty, time_budget_ms }`; missing fields use defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<CheckersGame, JsValue> {
        let config: EngineConfig = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            session: GameSession::new(),
            config,
        })
    }

    /// Custom position from 64 cell codes.
    #[wasm_bindgen(js_name = fromBoard)]
    pub fn from_board(
        cells: Vec<u8>,
        first_to_move: bool,
        difficulty: &str,
    ) -> Result<CheckersGame, JsValue> {
        let board = Board::from_array(&cells).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let side = if first_to_move { Side::First } else { Side::Second };
        let session =
            GameSession::from_board(board, side).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            session,
            config: EngineConfig::default().with_difficulty(Difficulty::from_label(difficulty)),
        })
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.session.to_game_state())?)
    }

    #[wasm_bindgen(js_name = legalMovesFrom)]
    pub fn legal_moves_from(&self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        let moves = self.session.legal_moves_from(Position::new(row, col));
        Ok(serde_wasm_bindgen::to_value(&moves)?)
    }

    /// Returns `false` and leaves the game unchanged when the move is rejected.
    #[wasm_bindgen(js_name = attemptMove)]
    pub fn attempt_move(&mut self, from_row: u8, from_col: u8, to_row: u8, to_col: u8) -> bool {
        let from = Position::new(from_row, from_col);
        let to = Position::new(to_row, to_col);
        match self.session.attempt_move(from, to) {
            Ok(_) => true,
            Err(err) => {
                log::debug!("rejected move {from} -> {to}: {err}");
                false
            }
        }
    }

    /// Plays the computer's move and returns its history record.
    #[wasm_bindgen(js_name = aiMove)]
    pub fn ai_move(&mut self) -> Result<JsValue, JsValue> {
        let record = ai::play_ai_move(&mut self.session, &self.config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(serde_wasm_bindgen::to_value(&record)?)
    }

    /// `{ move, score }` searched at medium depth, or `undefined` when there is no move.
    pub fn hint(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&ai::get_hint(&self.session))?)
    }

    pub fn history(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(self.session.history())?)
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.session.is_finished()
    }

    #[wasm_bindgen(js_name = setDifficulty)]
    pub fn set_difficulty(&mut self, label: &str) {
        self.config.difficulty = Difficulty::from_label(label);
    }

    pub fn difficulty(&self) -> String {
        self.config.difficulty.label().to_string()
    }

    /// CRC-32 of the position, for comparing state with a remote peer.
    pub fn fingerprint(&self) -> u32 {
        self.session
            .board()
            .fingerprint(self.session.side_to_move())
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }
}
