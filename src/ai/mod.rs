//! Computer opponent: static evaluation and alpha-beta search.

pub mod eval;
pub mod search;

pub use eval::evaluate;
pub use search::{SearchOutcome, Searcher, get_best_move, minimax, order_moves};

use crate::config::{Difficulty, EngineConfig};
use crate::error::MoveError;
use crate::game::GameSession;
use crate::types::{HistoryRecord, ScoredMove};

/// Suggested move and its score at medium depth, whatever the configured difficulty.
pub fn get_hint(session: &GameSession) -> Option<ScoredMove> {
    Searcher::new(Difficulty::Medium.depth()).search(session).best
}

/// Runs a search configured by `config` on a copy of `session`.
pub fn search_with(session: &GameSession, config: &EngineConfig) -> SearchOutcome {
    let depth = config.difficulty.depth();
    let mut searcher = match config.time_budget() {
        Some(budget) => Searcher::with_time_budget(depth, budget),
        None => Searcher::new(depth),
    };
    searcher.search(session)
}

/// Lets the computer play one move for the side to move.
pub fn play_ai_move(
    session: &mut GameSession,
    config: &EngineConfig,
) -> Result<HistoryRecord, MoveError> {
    if session.is_finished() {
        return Err(MoveError::GameAlreadyFinished);
    }

    let best = search_with(session, config)
        .best
        .ok_or(MoveError::NoMovesAvailable)?;
    Ok(session.play(best.mv).clone())
}
