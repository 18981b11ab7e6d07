/*
 * Chess legality engine
 *
 * - board: squares, pieces and the Position snapshot
 * - constant: letter table and the starting placement
 * - rules: move legality, path obstruction and move application
 *
 * Every operation takes a Position and returns a bool or a new Position;
 * the crate holds no global board.
 */
pub mod board;
pub mod constant;
pub mod rules;

pub use board::{Color, Piece, PieceKind, Position, Square};
