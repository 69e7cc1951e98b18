use thiserror::Error;

use crate::types::{Position, Side};

/// Reasons a move request is rejected. A rejected request never mutates the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("position {0} is off the board")]
    OutOfBounds(Position),

    #[error("no piece at {0}")]
    NoPieceAtOrigin(Position),

    #[error("piece at {origin} does not belong to {side}")]
    WrongSideOwnsPiece { origin: Position, side: Side },

    #[error("piece at {origin} cannot move to {destination}")]
    IllegalDestination {
        origin: Position,
        destination: Position,
    },

    #[error("game is already over")]
    GameAlreadyFinished,

    #[error("no legal moves available")]
    NoMovesAvailable,
}

/// Reasons a custom board is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("wrong board length: expected {expected} cells, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("position {0} is off the board")]
    OffBoard(Position),

    #[error("invalid cell code {code} at {position}")]
    InvalidCode { position: Position, code: u8 },

    #[error("piece on light square {0}")]
    PieceOnLightSquare(Position),

    #[error("{side} has {count} pieces, at most 12 allowed")]
    TooManyPieces { side: Side, count: u8 },
}
