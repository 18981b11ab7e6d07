use crate::board::{Color, Piece, PieceKind};
use std::{collections::HashMap, sync::LazyLock};

pub const BOARD_SIZE: u8 = 8;
pub const SQUARE_COUNT: usize = 64;

/// Total material on the board at game start.
pub const PIECE_TOTAL: usize = 32;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";

pub static FEN_MAP: LazyLock<HashMap<char, Piece>> = LazyLock::new(|| {
    HashMap::from([
        ('k', Piece::new(PieceKind::King, Color::Black)),
        ('q', Piece::new(PieceKind::Queen, Color::Black)),
        ('r', Piece::new(PieceKind::Rook, Color::Black)),
        ('b', Piece::new(PieceKind::Bishop, Color::Black)),
        ('n', Piece::new(PieceKind::Knight, Color::Black)),
        ('p', Piece::new(PieceKind::Pawn, Color::Black)),
        ('K', Piece::new(PieceKind::King, Color::White)),
        ('Q', Piece::new(PieceKind::Queen, Color::White)),
        ('R', Piece::new(PieceKind::Rook, Color::White)),
        ('B', Piece::new(PieceKind::Bishop, Color::White)),
        ('N', Piece::new(PieceKind::Knight, Color::White)),
        ('P', Piece::new(PieceKind::Pawn, Color::White)),
    ])
});
