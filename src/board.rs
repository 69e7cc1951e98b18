use once_cell::sync::Lazy;

use crate::error::BoardError;
use crate::types::{BOARD_CELLS, BOARD_SIZE, Cell, Position, Side};

pub const PIECES_PER_SIDE: u8 = 12;
const STARTING_ROWS: u8 = 3;

/// The 32 playable squares in row-major order.
pub static DARK_SQUARES: Lazy<Vec<Position>> = Lazy::new(|| {
    (0..BOARD_SIZE as u8)
        .flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Position::new(row, col)))
        .filter(|pos| pos.is_dark())
        .collect()
});

/// Checkers board: 8x8 cells, row-major, row 0 on Second's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// Creates the standard starting position:
    /// Second men on rows 0..=2, First men on rows 5..=7, dark squares only.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for &pos in DARK_SQUARES.iter() {
            if pos.row < STARTING_ROWS {
                board.set(pos, Cell::SecondMan);
            } else if pos.row >= BOARD_SIZE as u8 - STARTING_ROWS {
                board.set(pos, Cell::FirstMan);
            }
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_CELLS],
        }
    }

    /// Builds a board from a flat list of `(position, cell)` placements.
    pub fn with_pieces(pieces: &[(Position, Cell)]) -> Result<Self, BoardError> {
        let mut board = Self::empty();
        for &(pos, cell) in pieces {
            if !pos.in_bounds() {
                return Err(BoardError::OffBoard(pos));
            }
            board.set(pos, cell);
        }
        board.validate()?;
        Ok(board)
    }

    /// Parses 64 renderer codes (see [`Cell::code`]).
    pub fn from_array(codes: &[u8]) -> Result<Self, BoardError> {
        if codes.len() != BOARD_CELLS {
            return Err(BoardError::WrongLength {
                expected: BOARD_CELLS,
                actual: codes.len(),
            });
        }

        let mut board = Self::empty();
        for (idx, &code) in codes.iter().enumerate() {
            let position = index_to_pos(idx);
            let cell = Cell::from_code(code).ok_or(BoardError::InvalidCode { position, code })?;
            board.cells[idx] = cell;
        }
        board.validate()?;
        Ok(board)
    }

    /// Out-of-bounds squares read as empty.
    pub fn get(&self, pos: Position) -> Cell {
        if pos.in_bounds() {
            self.cells[pos.index()]
        } else {
            Cell::Empty
        }
    }

    /// Writes to out-of-bounds squares are ignored.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        if pos.in_bounds() {
            self.cells[pos.index()] = cell;
        }
    }

    pub fn owner(&self, pos: Position) -> Option<Side> {
        self.get(pos).owner()
    }

    /// Squares holding a piece of `side`, row-major.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, cell)| cell.owner() == Some(side))
            .map(|(idx, &cell)| (index_to_pos(idx), cell))
    }

    pub fn count(&self, side: Side) -> u8 {
        self.pieces(side).count() as u8
    }

    /// Returns `(first_count, second_count)`.
    pub fn counts(&self) -> (u8, u8) {
        (self.count(Side::First), self.count(Side::Second))
    }

    /// Converts board to `[u8; 64]` of renderer codes.
    pub fn to_array(&self) -> [u8; BOARD_CELLS] {
        let mut out = [0u8; BOARD_CELLS];
        for (code, cell) in out.iter_mut().zip(self.cells.iter()) {
            *code = cell.code();
        }
        out
    }

    /// CRC-32 over the cell codes and the side to move.
    /// Peers replaying the same moves must arrive at the same value.
    pub fn fingerprint(&self, side_to_move: Side) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&self.to_array());
        hasher.update(&[side_to_move.index() as u8]);
        hasher.finalize()
    }

    /// Checks that only dark squares hold pieces and neither side has more than 12.
    pub fn validate(&self) -> Result<(), BoardError> {
        for (idx, cell) in self.cells.iter().enumerate() {
            let pos = index_to_pos(idx);
            if !cell.is_empty() && !pos.is_dark() {
                return Err(BoardError::PieceOnLightSquare(pos));
            }
        }
        for side in [Side::First, Side::Second] {
            let count = self.count(side);
            if count > PIECES_PER_SIDE {
                return Err(BoardError::TooManyPieces { side, count });
            }
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn index_to_pos(idx: usize) -> Position {
    Position::new((idx / BOARD_SIZE) as u8, (idx % BOARD_SIZE) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_board_has_twelve_men_per_side_on_dark_squares() {
        let board = Board::new();

        assert_eq!(board.counts(), (12, 12));
        assert_eq!(DARK_SQUARES.len(), 32);
        for (idx, code) in board.to_array().iter().enumerate() {
            let pos = index_to_pos(idx);
            if !pos.is_dark() {
                assert_eq!(*code, 0, "light square {pos} must be empty");
            }
        }
        assert_eq!(board.get(Position::new(0, 1)), Cell::SecondMan);
        assert_eq!(board.get(Position::new(7, 0)), Cell::FirstMan);
        assert_eq!(board.get(Position::new(3, 2)), Cell::Empty);
        assert_eq!(board.get(Position::new(4, 1)), Cell::Empty);
    }

    #[test]
    fn out_of_bounds_reads_are_empty_and_writes_ignored() {
        let mut board = Board::empty();
        let off = Position::new(8, 3);

        board.set(off, Cell::FirstKing);

        assert_eq!(board.get(off), Cell::Empty);
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn from_array_rejects_light_square_pieces() {
        let mut codes = [0u8; BOARD_CELLS];
        codes[0] = Cell::FirstMan.code();

        let err = Board::from_array(&codes).unwrap_err();

        assert_eq!(err, BoardError::PieceOnLightSquare(Position::new(0, 0)));
    }

    #[test]
    fn from_array_rejects_bad_length_and_codes() {
        assert!(matches!(
            Board::from_array(&[0u8; 10]),
            Err(BoardError::WrongLength { actual: 10, .. })
        ));

        let mut codes = [0u8; BOARD_CELLS];
        codes[1] = 9;
        assert!(matches!(
            Board::from_array(&codes),
            Err(BoardError::InvalidCode { code: 9, .. })
        ));
    }

    #[test]
    fn with_pieces_validates_placements() {
        let board = Board::with_pieces(&[
            (Position::new(5, 4), Cell::FirstMan),
            (Position::new(2, 1), Cell::SecondKing),
        ])
        .unwrap();

        assert_eq!(board.counts(), (1, 1));
        assert_eq!(board.owner(Position::new(2, 1)), Some(Side::Second));
        assert_eq!(
            Board::with_pieces(&[(Position::new(8, 1), Cell::FirstMan)]),
            Err(BoardError::OffBoard(Position::new(8, 1)))
        );
        assert_eq!(
            Board::with_pieces(&[(Position::new(4, 4), Cell::FirstMan)]),
            Err(BoardError::PieceOnLightSquare(Position::new(4, 4)))
        );
    }

    #[test]
    fn to_array_and_from_array_agree() {
        let board = Board::new();

        assert_eq!(Board::from_array(&board.to_array()).unwrap(), board);
    }

    #[test]
    fn fingerprint_depends_on_side_to_move_and_cells() {
        let board = Board::new();
        let mut moved = board;
        moved.set(Position::new(5, 0), Cell::Empty);
        moved.set(Position::new(4, 1), Cell::FirstMan);

        assert_eq!(board.fingerprint(Side::First), Board::new().fingerprint(Side::First));
        assert_ne!(board.fingerprint(Side::First), board.fingerprint(Side::Second));
        assert_ne!(board.fingerprint(Side::First), moved.fingerprint(Side::First));
    }
}
