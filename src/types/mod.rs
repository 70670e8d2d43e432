//! Core value types shared across the engine: squares, bitboards, pieces,
//! castling rights and moves.

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::CastlingRights;
pub use moves::Move;
pub use piece::{Color, PieceKind, ALL_KINDS, PROMOTION_KINDS};
pub use square::Square;
