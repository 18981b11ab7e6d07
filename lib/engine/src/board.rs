/*
 * Board model
 *
 * - 8 x 8 board stored row-major in 64 cells, index = row * 8 + col
 * - row 0 is the black back rank (rank 8), row 7 the white back rank (rank 1)
 * - Piece is an explicit {kind, color} pair; None marks an empty cell
 * - Position is a snapshot: cells, side to move and captured material.
 *   Moves never mutate a Position in place, they produce the next one.
 */

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context};

use crate::constant::{BOARD_SIZE, FEN_MAP, SQUARE_COUNT};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Row step of a pawn of this color. White advances toward row 0.
    pub fn pawn_direction(&self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    fn letter(&self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color }
    }

    pub fn belong_to(&self, side: Color) -> bool {
        self.color == side
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    pub fn fen_char(&self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        }
    }

    pub fn from_fen_char(c: char) -> Option<Piece> {
        FEN_MAP.get(&c).copied()
    }

    /// Display glyph, one distinct symbol per (kind, color).
    pub fn symbol(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        }
    }
}

/// A board square, index = row * 8 + col.
///
/// Constructors panic on out-of-range input: squares come from the
/// caller's own enumeration, so a bad one is a contract violation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Square(u8);

impl Square {
    pub fn new(row: u8, col: u8) -> Self {
        assert!(
            row < BOARD_SIZE && col < BOARD_SIZE,
            "square ({row}, {col}) is off the board"
        );
        Square(row * BOARD_SIZE + col)
    }

    pub fn from_index(index: usize) -> Self {
        match Square::try_from_index(index) {
            Some(sq) => sq,
            None => panic!("square index {index} is off the board"),
        }
    }

    pub fn try_from_index(index: usize) -> Option<Self> {
        if index < SQUARE_COUNT {
            Some(Square(index as u8))
        } else {
            None
        }
    }

    pub fn row(&self) -> u8 {
        self.0 / BOARD_SIZE
    }

    pub fn col(&self) -> u8 {
        self.0 % BOARD_SIZE
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// All 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..SQUARE_COUNT as u8).map(Square)
    }

    /// Signed (row, col) displacement from `self` to `to`.
    pub fn delta(&self, to: Square) -> (i32, i32) {
        (
            to.row() as i32 - self.row() as i32,
            to.col() as i32 - self.col() as i32,
        )
    }

    pub(crate) fn offset(&self, d_row: i32, d_col: i32) -> Option<Square> {
        let row = self.row() as i32 + d_row;
        let col = self.col() as i32 + d_col;
        let size = BOARD_SIZE as i32;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col()) as char;
        let rank = (b'0' + BOARD_SIZE - self.row()) as char;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let bytes = s.trim().as_bytes();
        if bytes.len() != 2 {
            bail!("expected a square like e2, got {s:?}");
        }
        let (file, rank) = (bytes[0].to_ascii_lowercase(), bytes[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            bail!("square {s:?} is off the board");
        }
        Ok(Square::new(BOARD_SIZE - (rank - b'0'), file - b'a'))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Position {
    cells: [Option<Piece>; SQUARE_COUNT],
    turn: Color,
    // indexed by Color::index(), pieces of that color taken so far
    captured: [Vec<Piece>; 2],
}

impl Position {
    /// Standard starting layout, White to move, nothing captured.
    pub fn initial() -> Self {
        let mut position = Position::empty(Color::White);
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (col, kind) in back_rank.into_iter().enumerate() {
            let col = col as u8;
            position.cells[Square::new(0, col).index()] = Some(Piece::new(kind, Color::Black));
            position.cells[Square::new(1, col).index()] =
                Some(Piece::new(PieceKind::Pawn, Color::Black));
            position.cells[Square::new(6, col).index()] =
                Some(Piece::new(PieceKind::Pawn, Color::White));
            position.cells[Square::new(7, col).index()] = Some(Piece::new(kind, Color::White));
        }
        position
    }

    pub fn empty(turn: Color) -> Self {
        Position {
            cells: [None; SQUARE_COUNT],
            turn,
            captured: [Vec::new(), Vec::new()],
        }
    }

    /// Reads the placement and side-to-move fields of a FEN string.
    /// Castling, en passant and clock fields are accepted and ignored.
    pub fn from_fen(fen: &str) -> anyhow::Result<Self> {
        let mut parts = fen.split_whitespace();
        let placement = parts.next().context("empty FEN string")?;
        let turn = match parts.next() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => bail!("unknown side to move {other:?}"),
        };

        let mut position = Position::empty(turn);
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != BOARD_SIZE as usize {
            bail!("expected 8 ranks, found {}", ranks.len());
        }
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0u32;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    col += skip;
                    continue;
                }
                let piece = Piece::from_fen_char(c)
                    .with_context(|| format!("unknown piece letter {c:?} in rank {}", row + 1))?;
                if col >= BOARD_SIZE as u32 {
                    bail!("rank {:?} overflows the board", rank);
                }
                position.cells[Square::new(row as u8, col as u8).index()] = Some(piece);
                col += 1;
            }
            if col != BOARD_SIZE as u32 {
                bail!("rank {:?} covers {} files, expected 8", rank, col);
            }
        }
        Ok(position)
    }

    /// Placement and side to move, the inverse of `from_fen`.
    pub fn fen(&self) -> String {
        let mut out = String::new();
        for row in 0..BOARD_SIZE {
            if row > 0 {
                out.push('/');
            }
            let mut empty = 0;
            for col in 0..BOARD_SIZE {
                match self.piece_at(Square::new(row, col)) {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
        }
        out.push(' ');
        out.push(match self.turn {
            Color::White => 'w',
            Color::Black => 'b',
        });
        out
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square.index()]
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn cells(&self) -> &[Option<Piece>; SQUARE_COUNT] {
        &self.cells
    }

    /// Pieces of `color` that have been captured, oldest first.
    pub fn captured(&self, color: Color) -> &[Piece] {
        &self.captured[color.index()]
    }

    pub fn is_own_piece(&self, square: Square, side: Color) -> bool {
        self.piece_at(square)
            .is_some_and(|piece| piece.belong_to(side))
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Returns a copy with `square` set to `piece`.
    pub fn with_piece(mut self, square: Square, piece: Option<Piece>) -> Self {
        self.cells[square.index()] = piece;
        self
    }

    pub fn with_turn(mut self, turn: Color) -> Self {
        self.turn = turn;
        self
    }

    // Used by rules::apply_move only; the caller has checked legality.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) {
        let moving = self.cells[from.index()].take();
        // the captured piece is recorded before its square is overwritten
        if let Some(taken) = self.cells[to.index()] {
            self.captured[taken.color.index()].push(taken);
        }
        self.cells[to.index()] = moving;
        self.turn = self.turn.opponent();
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::initial()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            write!(f, "{} ", BOARD_SIZE - row)?;
            for col in 0..BOARD_SIZE {
                let c = self
                    .piece_at(Square::new(row, col))
                    .map_or('.', |piece| piece.symbol());
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {}", (b'a' + col) as char)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::board::*;
    use crate::constant::{PIECE_TOTAL, START_FEN};
    use std::collections::HashSet;

    #[test]
    fn test_initial_layout() {
        let board = Position::initial();
        assert_eq!(board.turn(), Color::White);
        assert_eq!(board.piece_count(), PIECE_TOTAL);
        assert!(board.captured(Color::White).is_empty());
        assert!(board.captured(Color::Black).is_empty());
        assert_eq!(
            board.piece_at(Square::new(0, 4)),
            Some(Piece::new(PieceKind::King, Color::Black))
        );
        assert_eq!(
            board.piece_at(Square::new(7, 3)),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
        for col in 0..8 {
            assert_eq!(
                board.piece_at(Square::new(6, col)),
                Some(Piece::new(PieceKind::Pawn, Color::White))
            );
            for row in 2..6 {
                assert!(board.is_empty(Square::new(row, col)));
            }
        }
    }

    #[test]
    fn test_initial_matches_start_fen() {
        assert_eq!(Position::initial().fen(), START_FEN);
        assert_eq!(Position::from_fen(START_FEN).unwrap(), Position::initial());
    }

    #[test]
    fn test_from_fen() {
        let board = Position::from_fen("4k3/8/8/3Q4/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(board.turn(), Color::Black);
        assert_eq!(board.piece_count(), 3);
        assert_eq!(
            board.piece_at("d5".parse().unwrap()),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
        assert_eq!(board.fen(), "4k3/8/8/3Q4/8/8/8/4K3 b");
    }

    #[test]
    fn test_from_fen_rejects_bad_input() {
        assert!(Position::from_fen("").is_err());
        assert!(Position::from_fen("8/8/8/8/8/8/8 w").is_err());
        assert!(Position::from_fen("9/8/8/8/8/8/8/8 w").is_err());
        assert!(Position::from_fen("7x/8/8/8/8/8/8/8 w").is_err());
        assert!(Position::from_fen("8/8/8/8/8/8/8/7 w").is_err());
        assert!(Position::from_fen("8/8/8/8/8/8/8/8 x").is_err());
    }

    #[test]
    fn test_square_names() {
        assert_eq!(Square::new(6, 4).to_string(), "e2");
        assert_eq!(Square::new(0, 0).to_string(), "a8");
        assert_eq!(Square::new(7, 7).to_string(), "h1");
        assert_eq!("e4".parse::<Square>().unwrap(), Square::new(4, 4));
        assert_eq!("A1".parse::<Square>().unwrap(), Square::new(7, 0));
        assert!("i1".parse::<Square>().is_err());
        assert!("e9".parse::<Square>().is_err());
        assert!("e".parse::<Square>().is_err());
        for sq in Square::all() {
            assert_eq!(sq.to_string().parse::<Square>().unwrap(), sq);
            assert_eq!(Square::from_index(sq.index()), sq);
            assert_eq!(sq.index(), sq.row() as usize * 8 + sq.col() as usize);
        }
    }

    #[test]
    #[should_panic]
    fn test_square_index_out_of_range() {
        Square::from_index(64);
    }

    #[test]
    #[should_panic]
    fn test_square_row_out_of_range() {
        Square::new(8, 0);
    }

    #[test]
    fn test_symbols_are_distinct() {
        let mut symbols = HashSet::new();
        let mut letters = HashSet::new();
        for color in [Color::White, Color::Black] {
            for kind in PieceKind::ALL {
                let piece = Piece::new(kind, color);
                symbols.insert(piece.symbol());
                letters.insert(piece.fen_char());
                assert_eq!(Piece::from_fen_char(piece.fen_char()), Some(piece));
            }
        }
        assert_eq!(symbols.len(), 12);
        assert_eq!(letters.len(), 12);
    }

    #[test]
    fn test_is_own_piece() {
        let board = Position::initial();
        assert!(board.is_own_piece(Square::new(6, 0), Color::White));
        assert!(!board.is_own_piece(Square::new(6, 0), Color::Black));
        assert!(!board.is_own_piece(Square::new(4, 0), Color::White));
        assert!(board.is_own_piece(Square::new(0, 0), Color::Black));
    }

    #[test]
    fn test_display() {
        let text = Position::initial().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8  ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜");
        assert_eq!(lines[4], "4  . . . . . . . .");
        assert_eq!(lines[8], "   a b c d e f g h");
    }
}
