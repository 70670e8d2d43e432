//! `CastlingRights`: per-colour bitboard of original rook squares still eligible to castle.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::bitboard::Bitboard;
use super::piece::Color;
use super::square::Square;

/// Original rook home squares, one bit set per eligible side: the set of
/// original rook squares that remain eligible to castle (a1/h1 for white,
/// a8/h8 for black).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(pub Bitboard);

pub const WHITE_KINGSIDE_ROOK: Square = Square::from_rank_file(0, 7); // h1
pub const WHITE_QUEENSIDE_ROOK: Square = Square::from_rank_file(0, 0); // a1
pub const BLACK_KINGSIDE_ROOK: Square = Square::from_rank_file(7, 7); // h8
pub const BLACK_QUEENSIDE_ROOK: Square = Square::from_rank_file(7, 0); // a8

impl CastlingRights {
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(Bitboard::EMPTY)
    }

    #[must_use]
    pub fn all() -> Self {
        CastlingRights(
            Bitboard::from_square(WHITE_KINGSIDE_ROOK)
                | Bitboard::from_square(WHITE_QUEENSIDE_ROOK)
                | Bitboard::from_square(BLACK_KINGSIDE_ROOK)
                | Bitboard::from_square(BLACK_QUEENSIDE_ROOK),
        )
    }

    #[must_use]
    pub fn rook_square(color: Color, kingside: bool) -> Square {
        match (color, kingside) {
            (Color::White, true) => WHITE_KINGSIDE_ROOK,
            (Color::White, false) => WHITE_QUEENSIDE_ROOK,
            (Color::Black, true) => BLACK_KINGSIDE_ROOK,
            (Color::Black, false) => BLACK_QUEENSIDE_ROOK,
        }
    }

    #[must_use]
    pub fn has(self, color: Color, kingside: bool) -> bool {
        self.0.contains(Self::rook_square(color, kingside))
    }

    pub fn set(&mut self, color: Color, kingside: bool) {
        self.0 = self.0.with(Self::rook_square(color, kingside));
    }

    pub fn clear(&mut self, color: Color, kingside: bool) {
        self.0 = self.0.without(Self::rook_square(color, kingside));
    }

    /// Drop both rights for `color`, used when its king leaves its home square.
    pub fn clear_color(&mut self, color: Color) {
        self.clear(color, true);
        self.clear(color, false);
    }

    /// Rook-square bitboard for `color` only (used for invariant checking).
    #[must_use]
    pub fn color_mask(self, color: Color) -> Bitboard {
        let home = match color {
            Color::White => Bitboard::from_square(WHITE_KINGSIDE_ROOK)
                | Bitboard::from_square(WHITE_QUEENSIDE_ROOK),
            Color::Black => Bitboard::from_square(BLACK_KINGSIDE_ROOK)
                | Bitboard::from_square(BLACK_QUEENSIDE_ROOK),
        };
        self.0 & home
    }

    /// Rights present for `color` as an iterator of rook squares.
    pub fn rook_squares(self, color: Color) -> impl Iterator<Item = Square> {
        self.color_mask(color).iter()
    }
}
