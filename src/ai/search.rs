use std::time::Duration;

use web_time::Instant;

use crate::ai::eval::evaluate;
use crate::game::GameSession;
use crate::types::{GameStatus, Move, ScoredMove, Side};

pub const WIN_SCORE: i32 = 10_000;
const MIN_SCORE: i32 = i32::MIN / 2;
const MAX_SCORE: i32 = i32::MAX / 2;

/// Result of one root search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// `None` when the side to move has no legal move.
    pub best: Option<ScoredMove>,
    pub depth: u8,
    pub nodes: u64,
    /// True if the time budget cut the root move list short.
    pub stopped: bool,
}

/// Minimax with alpha-beta pruning over cloned sessions.
pub struct Searcher {
    depth: u8,
    time_budget: Option<Duration>,
    start_time: Instant,
    nodes: u64,
    stopped: bool,
}

impl Searcher {
    pub fn new(depth: u8) -> Self {
        Self {
            depth,
            time_budget: None,
            start_time: Instant::now(),
            nodes: 0,
            stopped: false,
        }
    }

    /// The budget is only checked between root moves, so every returned score
    /// comes from a complete subtree. The first root move is always searched.
    pub fn with_time_budget(depth: u8, budget: Duration) -> Self {
        Self {
            time_budget: Some(budget),
            ..Self::new(depth)
        }
    }

    /// Scores every root move for the side to move and keeps the best one.
    /// Ties keep the earlier move in [`order_moves`] order.
    pub fn search(&mut self, session: &GameSession) -> SearchOutcome {
        self.start_time = Instant::now();
        self.nodes = 0;
        self.stopped = false;

        let depth = self.depth.max(1);
        let ai_side = session.side_to_move();
        let moves = order_moves(session.legal_moves());
        let mut best: Option<ScoredMove> = None;

        for (i, mv) in moves.into_iter().enumerate() {
            if i > 0 && self.out_of_time() {
                self.stopped = true;
                break;
            }

            let mut child = session.clone();
            child.play(mv.clone());
            self.nodes += 1;

            let score = self.minimax(&child, depth - 1, MIN_SCORE, MAX_SCORE, false, ai_side);
            if best.as_ref().is_none_or(|b| score > b.score) {
                best = Some(ScoredMove { mv, score });
            }
        }

        log::debug!(
            "search depth={depth} nodes={} elapsed={:?} stopped={} best={:?}",
            self.nodes,
            self.start_time.elapsed(),
            self.stopped,
            best.as_ref().map(|b| b.score),
        );

        SearchOutcome {
            best,
            depth,
            nodes: self.nodes,
            stopped: self.stopped,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    fn out_of_time(&self) -> bool {
        self.time_budget
            .is_some_and(|budget| self.start_time.elapsed() >= budget)
    }

    /// Score of `session` from `ai_side`'s point of view.
    pub fn minimax(
        &mut self,
        session: &GameSession,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        ai_side: Side,
    ) -> i32 {
        if let GameStatus::Finished(winner) = session.status() {
            return terminal_score(winner, ai_side, depth);
        }
        if depth == 0 {
            return evaluate(&session.board(), ai_side);
        }

        let moves = order_moves(session.legal_moves());
        if moves.is_empty() {
            let winner = session.side_to_move().opponent();
            return terminal_score(Some(winner), ai_side, depth);
        }

        let mut best = if maximizing { MIN_SCORE } else { MAX_SCORE };
        for mv in moves {
            let mut child = session.clone();
            child.play(mv);
            self.nodes += 1;

            let score = self.minimax(&child, depth - 1, alpha, beta, !maximizing, ai_side);
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
        }

        best
    }
}

/// Wins found with more depth left (sooner) score higher; losses found later score higher.
fn terminal_score(winner: Option<Side>, ai_side: Side, depth: u8) -> i32 {
    match winner {
        Some(side) if side == ai_side => WIN_SCORE + depth as i32,
        Some(_) => -(WIN_SCORE + depth as i32),
        None => 0,
    }
}

/// Captures first; relative order otherwise preserved.
pub fn order_moves(mut moves: Vec<Move>) -> Vec<Move> {
    moves.sort_by_key(|mv| !mv.is_capture);
    moves
}

/// Stateless entry point for a single minimax evaluation.
pub fn minimax(
    session: &GameSession,
    depth: u8,
    alpha: i32,
    beta: i32,
    maximizing: bool,
    ai_side: Side,
) -> i32 {
    Searcher::new(depth).minimax(session, depth, alpha, beta, maximizing, ai_side)
}

/// Best move for the side to move at `depth`, or `None` if it has no move.
pub fn get_best_move(session: &GameSession, depth: u8) -> Option<Move> {
    Searcher::new(depth).search(session).best.map(|b| b.mv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::types::{Cell, Position};

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    fn session_with(pieces: &[((u8, u8), Cell)], side_to_move: Side) -> GameSession {
        let mut board = Board::empty();
        for &((row, col), cell) in pieces {
            board.set(pos(row, col), cell);
        }
        GameSession::from_board(board, side_to_move).unwrap()
    }

    /// Plain minimax without pruning, for comparison.
    fn full_minimax(session: &GameSession, depth: u8, maximizing: bool, ai_side: Side) -> i32 {
        if let GameStatus::Finished(winner) = session.status() {
            return terminal_score(winner, ai_side, depth);
        }
        if depth == 0 {
            return evaluate(&session.board(), ai_side);
        }
        let scores = session.legal_moves().into_iter().map(|mv| {
            let mut child = session.clone();
            child.play(mv);
            full_minimax(&child, depth - 1, !maximizing, ai_side)
        });
        if maximizing {
            scores.max().unwrap_or(MIN_SCORE)
        } else {
            scores.min().unwrap_or(MAX_SCORE)
        }
    }

    #[test]
    fn no_move_when_side_to_move_is_stuck() {
        let session = session_with(&[((5, 4), Cell::FirstMan)], Side::Second);

        let outcome = Searcher::new(4).search(&session);

        assert_eq!(outcome.best, None);
        assert_eq!(get_best_move(&session, 4), None);
    }

    #[test]
    fn takes_the_winning_capture() {
        let session = session_with(
            &[
                ((5, 4), Cell::FirstMan),
                ((4, 3), Cell::SecondMan),
                ((7, 0), Cell::FirstMan),
            ],
            Side::First,
        );

        let best = Searcher::new(3).search(&session).best.unwrap();

        assert_eq!(best.mv.to, pos(3, 2));
        assert_eq!(best.score, WIN_SCORE + 2);
    }

    #[test]
    fn win_score_carries_remaining_depth() {
        let session = session_with(
            &[((4, 3), Cell::FirstKing), ((3, 4), Cell::SecondMan)],
            Side::First,
        );

        let best = Searcher::new(5).search(&session).best.unwrap();

        assert!(best.mv.is_capture);
        assert_eq!(best.score, WIN_SCORE + 4);
    }

    #[test]
    fn captures_are_ordered_first() {
        let moves = vec![
            Move::simple(pos(5, 0), pos(4, 1)),
            Move::capture(pos(5, 2), pos(3, 4), vec![pos(4, 3)]),
            Move::simple(pos(5, 6), pos(4, 7)),
        ];

        let ordered = order_moves(moves.clone());

        assert_eq!(ordered[0], moves[1]);
        assert_eq!(ordered[1], moves[0]);
        assert_eq!(ordered[2], moves[2]);
    }

    #[test]
    fn depth_zero_is_static_evaluation() {
        let session = GameSession::new();

        assert_eq!(minimax(&session, 0, MIN_SCORE, MAX_SCORE, true, Side::First), 0);
    }

    #[test]
    fn finished_without_winner_scores_zero() {
        let session = session_with(&[((5, 4), Cell::FirstMan)], Side::Second);

        assert_eq!(minimax(&session, 3, MIN_SCORE, MAX_SCORE, true, Side::First), 0);
    }

    #[test]
    fn pruning_matches_full_minimax_from_the_start() {
        let session = GameSession::new();
        let ai_side = session.side_to_move();

        for mv in order_moves(session.legal_moves()) {
            let mut child = session.clone();
            child.play(mv);
            let pruned = minimax(&child, 3, MIN_SCORE, MAX_SCORE, false, ai_side);
            let full = full_minimax(&child, 3, false, ai_side);
            assert_eq!(pruned, full);
        }
    }

    #[test]
    fn search_counts_nodes() {
        let mut searcher = Searcher::new(3);

        let outcome = searcher.search(&GameSession::new());

        assert!(outcome.best.is_some());
        assert!(outcome.nodes > 7);
        assert_eq!(outcome.nodes, searcher.nodes());
        assert!(!outcome.stopped);
    }

    #[test]
    fn zero_budget_still_returns_the_first_move() {
        let session = GameSession::new();
        let mut searcher = Searcher::with_time_budget(4, Duration::ZERO);

        let outcome = searcher.search(&session);

        assert!(outcome.stopped);
        assert_eq!(
            outcome.best.map(|b| b.mv),
            order_moves(session.legal_moves()).into_iter().next()
        );
    }

    #[test]
    fn session_is_not_mutated_by_search() {
        let session = GameSession::new();
        let before = session.clone();

        let _ = get_best_move(&session, 4);

        assert_eq!(session, before);
    }
}
