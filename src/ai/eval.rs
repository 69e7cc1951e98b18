use once_cell::sync::Lazy;

use crate::board::Board;
use crate::types::{BOARD_CELLS, BOARD_SIZE, Cell, Position, Side};

pub const MAN_VALUE: i32 = 100;
pub const KING_VALUE: i32 = 160;
const BACK_RANK_BONUS: i32 = 10;
const ADVANCE_BONUS: i32 = 4;
const CENTER_BONUS: i32 = 6;

/// Material plus positional value of each cell kind on each square,
/// indexed by [`Cell::code`] then square index.
static PIECE_SQUARE: Lazy<[[i32; BOARD_CELLS]; 5]> = Lazy::new(|| {
    let mut table = [[0i32; BOARD_CELLS]; 5];
    let kinds = [
        Cell::FirstMan,
        Cell::FirstKing,
        Cell::SecondMan,
        Cell::SecondKing,
    ];
    for cell in kinds {
        for (idx, value) in table[cell.code() as usize].iter_mut().enumerate() {
            let pos = Position::new((idx / BOARD_SIZE) as u8, (idx % BOARD_SIZE) as u8);
            *value = square_value(cell, pos);
        }
    }
    table
});

fn square_value(cell: Cell, pos: Position) -> i32 {
    let Some(side) = cell.owner() else {
        return 0;
    };

    let center = if is_center(pos) { CENTER_BONUS } else { 0 };
    if cell.is_king() {
        return KING_VALUE + center;
    }

    let back_rank = if pos.row == side.back_row() {
        BACK_RANK_BONUS
    } else {
        0
    };
    let advanced = (pos.row as i32 - side.back_row() as i32).abs();
    MAN_VALUE + back_rank + ADVANCE_BONUS * advanced + center
}

/// The 16 squares of rows 2..=5 and columns 2..=5.
fn is_center(pos: Position) -> bool {
    (2..=5).contains(&pos.row) && (2..=5).contains(&pos.col)
}

/// Static score of `board`, positive when `perspective` is ahead.
pub fn evaluate(board: &Board, perspective: Side) -> i32 {
    let side_total = |side: Side| -> i32 {
        board
            .pieces(side)
            .map(|(pos, cell)| PIECE_SQUARE[cell.code() as usize][pos.index()])
            .sum()
    };
    side_total(perspective) - side_total(perspective.opponent())
}
