//! Position evaluation: a raw material count and a
//! piece-square-table-weighted material count with a late-game king table
//! switch. Both return a score in centipawns, positive favouring White.

use crate::position::Position;
use crate::types::{Color, PieceKind, Square, ALL_KINDS};

/// Piece-square tables, indexed `[kind][square]` from Black's perspective
/// (White looks up the vertically mirrored square). Values are classic
/// hand-tuned bonuses, not derived from search.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_MIDGAME_TABLE: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

#[rustfmt::skip]
const KING_ENDGAME_TABLE: [i32; 64] = [
    -50,-40,-30,-20,-20,-30,-40,-50,
    -30,-20,-10,  0,  0,-10,-20,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-30,  0,  0,  0,  0,-30,-30,
    -50,-30,-30,-30,-30,-30,-30,-50,
];

fn pst_table(kind: PieceKind) -> &'static [i32; 64] {
    match kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King => &KING_MIDGAME_TABLE,
    }
}

fn pst_lookup(kind: PieceKind, color: Color, sq: Square, endgame: bool) -> i32 {
    let table = if kind == PieceKind::King && endgame {
        &KING_ENDGAME_TABLE
    } else {
        pst_table(kind)
    };
    let index = if color == Color::White { sq.mirror() } else { sq };
    table[index.index()]
}

/// Raw material count: `sum(+-base[kind] * popcount(pieces[colour][kind]))`,
/// signed by colour.
#[must_use]
pub fn value(pos: &Position) -> i32 {
    let mut total = 0;
    for color in [Color::White, Color::Black] {
        let sign = if color == Color::White { 1 } else { -1 };
        for kind in ALL_KINDS {
            total += sign * kind.base_value() * pos.pieces(color, kind).popcount() as i32;
        }
    }
    total
}

/// Material count plus a piece-square table bonus per piece, with the king
/// table switched to its endgame variant in the late game.
#[must_use]
pub fn weighted_value(pos: &Position) -> i32 {
    let endgame = is_endgame(pos);
    let mut total = 0;
    for color in [Color::White, Color::Black] {
        let sign = if color == Color::White { 1 } else { -1 };
        for kind in ALL_KINDS {
            for sq in pos.pieces(color, kind).iter() {
                total += sign * (kind.base_value() + pst_lookup(kind, color, sq, endgame));
            }
        }
    }
    total
}

/// The late-game flag: set when neither side has a queen, or when total
/// non-pawn, non-king material on the board is <= 4 pieces.
#[must_use]
pub fn is_endgame(pos: &Position) -> bool {
    let no_queens = pos.pieces(Color::White, PieceKind::Queen).is_empty()
        && pos.pieces(Color::Black, PieceKind::Queen).is_empty();
    if no_queens {
        return true;
    }
    let non_pawn_non_king: u32 = [PieceKind::Knight, PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen]
        .into_iter()
        .map(|kind| {
            (pos.pieces(Color::White, kind) | pos.pieces(Color::Black, kind)).popcount()
        })
        .sum();
    non_pawn_non_king <= 4
}

/// `value` oriented so that the side to move is always maximising, letting
/// negamax treat both colours uniformly.
#[must_use]
pub fn relative_value(pos: &Position) -> i32 {
    let v = value(pos);
    if pos.turn() == Color::White {
        v
    } else {
        -v
    }
}

/// `weighted_value` oriented the same way as `relative_value`.
#[must_use]
pub fn relative_weighted_value(pos: &Position) -> i32 {
    let v = weighted_value(pos);
    if pos.turn() == Color::White {
        v
    } else {
        -v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_material_is_balanced() {
        assert_eq!(value(&Position::startpos()), 0);
        assert_eq!(weighted_value(&Position::startpos()), 0);
    }

    #[test]
    fn extra_queen_favours_white() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        assert!(value(&pos) > 0);
    }

    #[test]
    fn value_is_antisymmetric_under_colour_mirror() {
        // value(position) == -value(mirror_position) under a colour mirror.
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        let mirrored = Position::from_fen("3qk3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(value(&pos), -value(&mirrored));
    }

    #[test]
    fn endgame_flag_set_without_queens() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4KR2 w - - 0 1").unwrap();
        assert!(is_endgame(&pos));
    }
}
