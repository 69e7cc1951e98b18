use std::fmt;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 8;
pub const BOARD_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// One of the two players.
///
/// `First` starts on rows 5..=7 and moves toward row 0,
/// `Second` starts on rows 0..=2 and moves toward row 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Row on which a man of this side is promoted.
    pub fn promotion_row(self) -> u8 {
        match self {
            Side::First => 0,
            Side::Second => (BOARD_SIZE - 1) as u8,
        }
    }

    /// Row this side's men start closest to.
    pub fn back_row(self) -> u8 {
        self.opponent().promotion_row()
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => f.write_str("first"),
            Side::Second => f.write_str("second"),
        }
    }
}

const MAN_FIRST_DIRS: &[(i8, i8)] = &[(-1, -1), (-1, 1)];
const MAN_SECOND_DIRS: &[(i8, i8)] = &[(1, -1), (1, 1)];
const KING_DIRS: &[(i8, i8)] = &[(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Contents of one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    FirstMan,
    FirstKing,
    SecondMan,
    SecondKing,
}

impl Cell {
    pub fn owner(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::FirstMan | Cell::FirstKing => Some(Side::First),
            Cell::SecondMan | Cell::SecondKing => Some(Side::Second),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn is_king(self) -> bool {
        matches!(self, Cell::FirstKing | Cell::SecondKing)
    }

    pub fn is_man(self) -> bool {
        matches!(self, Cell::FirstMan | Cell::SecondMan)
    }

    /// Diagonal step directions as `(d_row, d_col)`.
    pub fn directions(self) -> &'static [(i8, i8)] {
        match self {
            Cell::Empty => &[],
            Cell::FirstMan => MAN_FIRST_DIRS,
            Cell::SecondMan => MAN_SECOND_DIRS,
            Cell::FirstKing | Cell::SecondKing => KING_DIRS,
        }
    }

    pub fn promoted(self) -> Self {
        match self {
            Cell::FirstMan => Cell::FirstKing,
            Cell::SecondMan => Cell::SecondKing,
            other => other,
        }
    }

    /// Renderer code: 0=empty, 1=first man, 2=first king, 3=second man, 4=second king.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::FirstMan => 1,
            Cell::FirstKing => 2,
            Cell::SecondMan => 3,
            Cell::SecondKing => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::FirstMan),
            2 => Some(Cell::FirstKing),
            3 => Some(Cell::SecondMan),
            4 => Some(Cell::SecondKing),
            _ => None,
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    /// Dark squares are the only playable ones.
    pub fn is_dark(self) -> bool {
        (self.row as u16 + self.col as u16) % 2 == 1
    }

    /// Steps `times` squares along `(d_row, d_col)`; `None` when it leaves the board.
    pub fn offset(self, (d_row, d_col): (i8, i8), times: i8) -> Option<Self> {
        let row = self.row as i16 + d_row as i16 * times as i16;
        let col = self.col as i16 + d_col as i16 * times as i16;
        let range = 0..BOARD_SIZE as i16;
        if range.contains(&row) && range.contains(&col) {
            Some(Self::new(row as u8, col as u8))
        } else {
            None
        }
    }

    pub(crate) fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A complete move, including every piece removed by a multi-jump.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub is_capture: bool,
    /// Captured squares in the order they were jumped. Empty for simple moves.
    pub captured: Vec<Position>,
}

impl Move {
    pub fn simple(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            is_capture: false,
            captured: Vec::new(),
        }
    }

    pub fn capture(from: Position, to: Position, captured: Vec<Position>) -> Self {
        debug_assert!(!captured.is_empty(), "capture move without captured squares");
        Self {
            from,
            to,
            is_capture: true,
            captured,
        }
    }
}

/// A move paired with its search score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredMove {
    #[serde(rename = "move")]
    pub mv: Move,
    pub score: i32,
}

/// Append-only history entry for one accepted move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub from: Position,
    pub to: Position,
    pub mover: Side,
    pub is_capture: bool,
    pub captured: Vec<Position>,
    /// 1-based.
    pub sequence: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "winner", rename_all = "lowercase")]
pub enum GameStatus {
    Active,
    /// `None` only for custom boards where the side to move starts without moves.
    Finished(Option<Side>),
}

impl GameStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, GameStatus::Finished(_))
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// 64 cell codes, row-major. See [`Cell::code`].
    pub board: Vec<u8>,
    pub side_to_move: Side,
    pub first_count: u8,
    pub second_count: u8,
    pub first_captures: u32,
    pub second_captures: u32,
    pub status: GameStatus,
    pub move_count: u32,
    pub fingerprint: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_rows_are_mirrored() {
        assert_eq!(Side::First.promotion_row(), 0);
        assert_eq!(Side::First.back_row(), 7);
        assert_eq!(Side::Second.promotion_row(), 7);
        assert_eq!(Side::Second.back_row(), 0);
        assert_eq!(Side::First.opponent(), Side::Second);
    }

    #[test]
    fn directions_follow_owner_and_rank() {
        assert_eq!(Cell::FirstMan.directions(), &[(-1, -1), (-1, 1)]);
        assert_eq!(Cell::SecondMan.directions(), &[(1, -1), (1, 1)]);
        assert_eq!(Cell::FirstKing.directions().len(), 4);
        assert_eq!(Cell::FirstKing.directions(), Cell::SecondKing.directions());
        assert!(Cell::Empty.directions().is_empty());
    }

    #[test]
    fn cell_codes_round_trip() {
        for code in 0..=4 {
            let cell = Cell::from_code(code).unwrap();
            assert_eq!(cell.code(), code);
        }
        assert_eq!(Cell::from_code(5), None);
    }

    #[test]
    fn offset_stops_at_board_edge() {
        let corner = Position::new(0, 1);
        assert_eq!(corner.offset((-1, 1), 1), None);
        assert_eq!(corner.offset((1, 1), 2), Some(Position::new(2, 3)));
        assert_eq!(Position::new(7, 6).offset((1, -1), 1), None);
    }
}
