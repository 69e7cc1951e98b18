//! Move generation and move application.
//!
//! Every function here is pure: boards are taken by reference and new boards
//! are returned by value. Out-of-bounds or empty origins produce empty results.

use crate::board::Board;
use crate::types::{Cell, Move, Position, Side};

/// Non-capturing single steps for the piece at `pos`.
pub fn generate_simple_moves(board: &Board, pos: Position) -> Vec<Move> {
    let piece = board.get(pos);
    piece
        .directions()
        .iter()
        .filter_map(|&dir| pos.offset(dir, 1))
        .filter(|&to| board.get(to).is_empty())
        .map(|to| Move::simple(pos, to))
        .collect()
}

/// Partial jump sequence carried down the recursion.
///
/// `board` already has the mover relocated to `square` and every piece in
/// `captured` removed, so sibling branches never observe each other's captures.
struct JumpPath {
    square: Position,
    captured: Vec<Position>,
    board: Board,
}

/// Every maximal capture sequence available to the piece at `pos`.
pub fn generate_jump_sequences(board: &Board, pos: Position) -> Vec<Move> {
    let Some(side) = board.owner(pos) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let root = JumpPath {
        square: pos,
        captured: Vec::new(),
        board: *board,
    };
    extend_jumps(pos, side, root, &mut out);
    out
}

fn extend_jumps(origin: Position, side: Side, path: JumpPath, out: &mut Vec<Move>) {
    let piece = path.board.get(path.square);
    let mut continued = false;

    for &dir in piece.directions() {
        let (Some(jumped), Some(landing)) = (path.square.offset(dir, 1), path.square.offset(dir, 2))
        else {
            continue;
        };
        if path.board.owner(jumped) != Some(side.opponent()) || !path.board.get(landing).is_empty()
        {
            continue;
        }

        let mut next_board = path.board;
        next_board.set(jumped, Cell::Empty);
        next_board.set(path.square, Cell::Empty);
        next_board.set(landing, piece);

        let mut captured = path.captured.clone();
        captured.push(jumped);

        continued = true;
        extend_jumps(
            origin,
            side,
            JumpPath {
                square: landing,
                captured,
                board: next_board,
            },
            out,
        );
    }

    if !continued && !path.captured.is_empty() {
        out.push(Move::capture(origin, path.square, path.captured));
    }
}

/// Legal moves for the piece at `pos`, ignoring the rest of the board's captures.
/// Jumps, when any exist for this piece, replace its simple moves.
pub fn generate_moves(board: &Board, pos: Position) -> Vec<Move> {
    if !pos.in_bounds() || board.get(pos).is_empty() {
        return Vec::new();
    }

    let jumps = generate_jump_sequences(board, pos);
    if !jumps.is_empty() {
        return jumps;
    }
    generate_simple_moves(board, pos)
}

/// Legal moves for `side`. If any piece can capture, only captures are returned.
pub fn generate_all_moves(board: &Board, side: Side) -> Vec<Move> {
    let mut jumps = Vec::new();
    let mut simple = Vec::new();

    for (pos, _) in board.pieces(side) {
        jumps.extend(generate_jump_sequences(board, pos));
        if jumps.is_empty() {
            simple.extend(generate_simple_moves(board, pos));
        }
    }

    if jumps.is_empty() { simple } else { jumps }
}

/// Per-piece legality: `side` owns `from` and `to` is a destination of
/// [`generate_moves`]. Captures available to other pieces are not considered;
/// use [`find_move`] for the side-wide check.
pub fn is_legal_move(board: &Board, from: Position, to: Position, side: Side) -> bool {
    board.owner(from) == Some(side) && generate_moves(board, from).iter().any(|mv| mv.to == to)
}

/// The move from `from` to `to` among [`generate_all_moves`] for `side`.
///
/// When several capture paths end on the same square the first one found is
/// returned.
pub fn find_move(board: &Board, from: Position, to: Position, side: Side) -> Option<Move> {
    if board.owner(from) != Some(side) {
        return None;
    }
    generate_all_moves(board, side)
        .into_iter()
        .find(|mv| mv.from == from && mv.to == to)
}

pub fn has_any_legal_move(board: &Board, side: Side) -> bool {
    !generate_all_moves(board, side).is_empty()
}

/// Returns a new board with `mv` played. `board` is left untouched.
pub fn apply_move(board: &Board, mv: &Move) -> Board {
    let mut next = *board;
    let mut piece = board.get(mv.from);

    next.set(mv.from, Cell::Empty);
    for &captured in &mv.captured {
        next.set(captured, Cell::Empty);
    }

    if let Some(side) = piece.owner()
        && piece.is_man()
        && mv.to.row == side.promotion_row()
    {
        piece = piece.promoted();
    }
    next.set(mv.to, piece);
    next
}
