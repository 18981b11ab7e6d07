/*
 * Move rules
 *
 * - is_legal_move: ownership and friendly-fire checks, then per-kind geometry
 * - is_path_obstructed: open interval between two squares on a shared line
 * - apply_move: produce the next Position, recording any captured piece
 *
 * King safety is not considered: a move that leaves the mover in check is
 * still legal here.
 */

use crate::board::{Color, Piece, PieceKind, Position, Square};

// exactly one axis moves
fn is_straight(d_row: i32, d_col: i32) -> bool {
    (d_row == 0) != (d_col == 0)
}

fn is_diagonal(d_row: i32, d_col: i32) -> bool {
    d_row != 0 && d_row.abs() == d_col.abs()
}

pub fn is_legal_move(position: &Position, from: Square, to: Square) -> bool {
    // a null move never matches any rule, the King's included
    if from == to {
        return false;
    }

    // 1. the origin must hold a piece of the side to move
    let piece = match position.piece_at(from) {
        Some(piece) => piece,
        None => return false,
    };
    if !piece.belong_to(position.turn()) {
        return false;
    }

    // 2. no capturing a friendly piece
    if position.is_own_piece(to, position.turn()) {
        return false;
    }

    // 3. geometry of the piece
    piece_allows(position, piece, from, to)
}

fn piece_allows(position: &Position, piece: Piece, from: Square, to: Square) -> bool {
    let (d_row, d_col) = from.delta(to);
    match piece.kind {
        PieceKind::Pawn => {
            if d_row != piece.color.pawn_direction() {
                return false;
            }
            // forward onto an empty square, diagonal only to capture
            match d_col.abs() {
                0 => position.is_empty(to),
                1 => !position.is_empty(to),
                _ => false,
            }
        }
        PieceKind::Knight => matches!((d_row.abs(), d_col.abs()), (2, 1) | (1, 2)),
        PieceKind::Bishop => is_diagonal(d_row, d_col) && !is_path_obstructed(position, from, to),
        PieceKind::Rook => is_straight(d_row, d_col) && !is_path_obstructed(position, from, to),
        PieceKind::Queen => {
            (is_straight(d_row, d_col) || is_diagonal(d_row, d_col))
                && !is_path_obstructed(position, from, to)
        }
        PieceKind::King => d_row.abs() <= 1 && d_col.abs() <= 1,
    }
}

/// Whether any square strictly between `from` and `to` is occupied.
///
/// The endpoints are never inspected. Squares that share no rank, file or
/// diagonal have no path between them and are reported as unobstructed.
pub fn is_path_obstructed(position: &Position, from: Square, to: Square) -> bool {
    let (d_row, d_col) = from.delta(to);
    if !is_straight(d_row, d_col) && !is_diagonal(d_row, d_col) {
        return false;
    }

    let (step_row, step_col) = (d_row.signum(), d_col.signum());
    let mut current = from;
    loop {
        current = match current.offset(step_row, step_col) {
            Some(sq) => sq,
            None => return false,
        };
        if current == to {
            return false;
        }
        if !position.is_empty(current) {
            return true;
        }
    }
}

/// Moves the piece on `from` to `to` and hands the turn over.
///
/// The move must already be known to be legal; use [`attempt_move`] when
/// it is not.
pub fn apply_move(position: &Position, from: Square, to: Square) -> Position {
    debug_assert!(
        is_legal_move(position, from, to),
        "apply_move called with illegal move {from}{to}"
    );
    let mut next = position.clone();
    next.relocate(from, to);
    next
}

/// Checked move: the next Position, or None when the move is illegal.
pub fn attempt_move(position: &Position, from: Square, to: Square) -> Option<Position> {
    if is_legal_move(position, from, to) {
        Some(apply_move(position, from, to))
    } else {
        None
    }
}

pub fn is_own_piece(position: &Position, square: Square, side: Color) -> bool {
    position.is_own_piece(square, side)
}

pub fn legal_targets(position: &Position, from: Square) -> Vec<Square> {
    Square::all()
        .filter(|&to| is_legal_move(position, from, to))
        .collect()
}

pub fn legal_moves(position: &Position) -> Vec<(Square, Square)> {
    Square::all()
        .filter(|&from| position.is_own_piece(from, position.turn()))
        .flat_map(|from| {
            legal_targets(position, from)
                .into_iter()
                .map(move |to| (from, to))
        })
        .collect()
}

impl Position {
    pub fn is_legal_move(&self, from: Square, to: Square) -> bool {
        is_legal_move(self, from, to)
    }

    pub fn is_path_obstructed(&self, from: Square, to: Square) -> bool {
        is_path_obstructed(self, from, to)
    }

    pub fn apply_move(&self, from: Square, to: Square) -> Position {
        apply_move(self, from, to)
    }

    pub fn attempt_move(&self, from: Square, to: Square) -> Option<Position> {
        attempt_move(self, from, to)
    }

    pub fn legal_targets(&self, from: Square) -> Vec<Square> {
        legal_targets(self, from)
    }

    pub fn legal_moves(&self) -> Vec<(Square, Square)> {
        legal_moves(self)
    }
}
