use crate::board::Board;
use crate::error::{BoardError, MoveError};
use crate::rules;
use crate::types::{GameState, GameStatus, HistoryRecord, Move, Position, Side};

/// One game in progress: board, turn, capture tally, and move history.
///
/// Moves are made through [`GameSession::attempt_move`] or
/// [`GameSession::play_move`]. Cloning gives a fully
/// independent copy, which is what the search uses to explore hypothetical lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    board: Board,
    side_to_move: Side,
    captures: [u32; 2],
    history: Vec<HistoryRecord>,
    status: GameStatus,
}

impl GameSession {
    /// Standard starting position, First to move.
    pub fn new() -> Self {
        Self::start(Board::new(), Side::First)
    }

    /// Starts from a custom position. Boards with pieces on light squares or
    /// more than 12 pieces a side are rejected. If `side_to_move` has no legal
    /// move the session starts finished with no winner.
    pub fn from_board(board: Board, side_to_move: Side) -> Result<Self, BoardError> {
        board.validate()?;
        Ok(Self::start(board, side_to_move))
    }

    fn start(board: Board, side_to_move: Side) -> Self {
        let status = if rules::has_any_legal_move(&board, side_to_move) {
            GameStatus::Active
        } else {
            GameStatus::Finished(None)
        };

        Self {
            board,
            side_to_move,
            captures: [0; 2],
            history: Vec::new(),
            status,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
        log::info!("session reset to the starting position");
    }

    /// Copy of the current board.
    pub fn board(&self) -> Board {
        self.board
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn winner(&self) -> Option<Side> {
        match self.status {
            GameStatus::Finished(winner) => winner,
            GameStatus::Active => None,
        }
    }

    /// Pieces captured so far by `side`.
    pub fn captures(&self, side: Side) -> u32 {
        self.captures[side.index()]
    }

    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    /// Moves the piece at `pos` may make this turn, honoring side-wide
    /// mandatory capture. Empty for opponent pieces or once the game is over.
    pub fn legal_moves_from(&self, pos: Position) -> Vec<Move> {
        if self.is_finished() || self.board.owner(pos) != Some(self.side_to_move) {
            return Vec::new();
        }
        rules::generate_all_moves(&self.board, self.side_to_move)
            .into_iter()
            .filter(|mv| mv.from == pos)
            .collect()
    }

    /// Every legal move for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_finished() {
            return Vec::new();
        }
        rules::generate_all_moves(&self.board, self.side_to_move)
    }

    /// Plays `from -> to` for the side to move.
    ///
    /// On rejection the session is left exactly as it was.
    pub fn attempt_move(
        &mut self,
        from: Position,
        to: Position,
    ) -> Result<&HistoryRecord, MoveError> {
        if self.is_finished() {
            return Err(MoveError::GameAlreadyFinished);
        }
        for pos in [from, to] {
            if !pos.in_bounds() {
                return Err(MoveError::OutOfBounds(pos));
            }
        }

        let side = self.side_to_move;
        match self.board.owner(from) {
            None => return Err(MoveError::NoPieceAtOrigin(from)),
            Some(owner) if owner != side => {
                return Err(MoveError::WrongSideOwnsPiece { origin: from, side });
            }
            Some(_) => {}
        }

        let illegal = MoveError::IllegalDestination {
            origin: from,
            destination: to,
        };
        if !rules::is_legal_move(&self.board, from, to, side) {
            return Err(illegal);
        }
        let mv = rules::find_move(&self.board, from, to, side).ok_or(illegal)?;

        Ok(self.play(mv))
    }

    /// Plays an exact move value, e.g. one received from a remote peer.
    ///
    /// Unlike [`attempt_move`](Self::attempt_move) this distinguishes capture
    /// paths that share both endpoints.
    pub fn play_move(&mut self, mv: &Move) -> Result<&HistoryRecord, MoveError> {
        if self.is_finished() {
            return Err(MoveError::GameAlreadyFinished);
        }
        if !self.legal_moves().contains(mv) {
            return Err(MoveError::IllegalDestination {
                origin: mv.from,
                destination: mv.to,
            });
        }
        Ok(self.play(mv.clone()))
    }

    /// Applies a move already known to be legal for the side to move.
    pub(crate) fn play(&mut self, mv: Move) -> &HistoryRecord {
        let mover = self.side_to_move;
        self.board = rules::apply_move(&self.board, &mv);
        self.captures[mover.index()] += mv.captured.len() as u32;

        log::trace!("{mover} played {} -> {}", mv.from, mv.to);
        self.history.push(HistoryRecord {
            from: mv.from,
            to: mv.to,
            mover,
            is_capture: mv.is_capture,
            captured: mv.captured,
            sequence: self.history.len() as u32 + 1,
        });

        self.side_to_move = mover.opponent();
        if !rules::has_any_legal_move(&self.board, self.side_to_move) {
            self.status = GameStatus::Finished(Some(mover));
            log::info!(
                "game over after {} moves, {mover} wins",
                self.history.len()
            );
        }

        let last = self.history.len() - 1;
        &self.history[last]
    }

    pub fn to_game_state(&self) -> GameState {
        let (first_count, second_count) = self.board.counts();
        GameState {
            board: self.board.to_array().to_vec(),
            side_to_move: self.side_to_move,
            first_count,
            second_count,
            first_captures: self.captures(Side::First),
            second_captures: self.captures(Side::Second),
            status: self.status,
            move_count: self.history.len() as u32,
            fingerprint: self.board.fingerprint(self.side_to_move),
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
