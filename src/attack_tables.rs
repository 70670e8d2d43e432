//! Compile-time-computed geometry tables: per-square attack bitboards for
//! leapers, pawns, and the eight ray directions used by sliding pieces.
//!
//! Built once behind `std::sync::LazyLock` and read-only thereafter; the
//! geometry tables are the only process-wide state, immutable after the
//! first access.

use std::sync::LazyLock;

use crate::types::{Bitboard, Color, Square};

/// One of the eight ray directions radiating from a square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

pub const DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];

impl Direction {
    const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (1, 0),
            Direction::NorthEast => (1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (-1, 1),
            Direction::South => (-1, 0),
            Direction::SouthWest => (-1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (1, -1),
        }
    }

    /// Positive-index directions scan least-significant-bit first when
    /// looking for the nearest blocker; negative-index directions scan
    /// most-significant-bit first.
    const fn is_positive(self) -> bool {
        matches!(
            self,
            Direction::North
                | Direction::NorthEast
                | Direction::East
                | Direction::NorthWest
        )
    }

    const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast
                | Direction::SouthEast
                | Direction::SouthWest
                | Direction::NorthWest
        )
    }
}

fn step_table(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    for sq in Square::all() {
        let r = sq.rank() as i8;
        let f = sq.file() as i8;
        let mut bb = Bitboard::EMPTY;
        for &(dr, df) in deltas {
            let nr = r + dr;
            let nf = f + df;
            if (0..8).contains(&nr) && (0..8).contains(&nf) {
                bb = bb.with(Square::from_rank_file(nr as u8, nf as u8));
            }
        }
        table[sq.index()] = bb;
    }
    table
}

pub static KNIGHT_MOVES: LazyLock<[Bitboard; 64]> = LazyLock::new(|| {
    step_table(&[
        (2, 1),
        (2, -1),
        (-2, 1),
        (-2, -1),
        (1, 2),
        (1, -2),
        (-1, 2),
        (-1, -2),
    ])
});

pub static KING_MOVES: LazyLock<[Bitboard; 64]> = LazyLock::new(|| {
    step_table(&[
        (1, 0),
        (-1, 0),
        (0, 1),
        (0, -1),
        (1, 1),
        (1, -1),
        (-1, 1),
        (-1, -1),
    ])
});

/// `pawn_single_push[color][sq]`: the one-rank advance, empty off the board's
/// far edge (a pawn never sits there — promotion is immediate).
pub static PAWN_SINGLE_PUSH: LazyLock<[[Bitboard; 64]; 2]> = LazyLock::new(|| {
    let mut table = [[Bitboard::EMPTY; 64]; 2];
    for sq in Square::all() {
        if let Some(fwd) = forward_square(sq, Color::White) {
            table[Color::White.index()][sq.index()] = Bitboard::from_square(fwd);
        }
        if let Some(fwd) = forward_square(sq, Color::Black) {
            table[Color::Black.index()][sq.index()] = Bitboard::from_square(fwd);
        }
    }
    table
});

/// `pawn_double_push[color][sq]`: the two-rank advance, populated only for
/// pawns on their starting rank.
pub static PAWN_DOUBLE_PUSH: LazyLock<[[Bitboard; 64]; 2]> = LazyLock::new(|| {
    let mut table = [[Bitboard::EMPTY; 64]; 2];
    for sq in Square::all() {
        if sq.rank() == 1 {
            table[Color::White.index()][sq.index()] =
                Bitboard::from_square(Square::from_rank_file(3, sq.file()));
        }
        if sq.rank() == 6 {
            table[Color::Black.index()][sq.index()] =
                Bitboard::from_square(Square::from_rank_file(4, sq.file()));
        }
    }
    table
});

pub static PAWN_ATTACKS: LazyLock<[[Bitboard; 64]; 2]> = LazyLock::new(|| {
    let mut table = [[Bitboard::EMPTY; 64]; 2];
    for sq in Square::all() {
        table[Color::White.index()][sq.index()] = pawn_attack_mask(sq, Color::White);
        table[Color::Black.index()][sq.index()] = pawn_attack_mask(sq, Color::Black);
    }
    table
});

fn pawn_attack_mask(sq: Square, color: Color) -> Bitboard {
    let r = sq.rank() as i8;
    let f = sq.file() as i8;
    let dr: i8 = if color == Color::White { 1 } else { -1 };
    let mut bb = Bitboard::EMPTY;
    for df in [-1i8, 1] {
        let nr = r + dr;
        let nf = f + df;
        if (0..8).contains(&nr) && (0..8).contains(&nf) {
            bb = bb.with(Square::from_rank_file(nr as u8, nf as u8));
        }
    }
    bb
}

fn forward_square(sq: Square, color: Color) -> Option<Square> {
    let r = sq.rank() as i8;
    let dr: i8 = if color == Color::White { 1 } else { -1 };
    let nr = r + dr;
    if (0..8).contains(&nr) {
        Some(Square::from_rank_file(nr as u8, sq.file()))
    } else {
        None
    }
}

/// `ray[dir][sq]`: all squares from `sq` in direction `dir`, up to the edge,
/// exclusive of `sq` itself.
pub static RAYS: LazyLock<[[Bitboard; 64]; 8]> = LazyLock::new(|| {
    let mut table = [[Bitboard::EMPTY; 64]; 8];
    for (dir_idx, dir) in DIRECTIONS.iter().enumerate() {
        let (dr, df) = dir.delta();
        for sq in Square::all() {
            let mut bb = Bitboard::EMPTY;
            let mut r = sq.rank() as i8;
            let mut f = sq.file() as i8;
            loop {
                r += dr;
                f += df;
                if !(0..8).contains(&r) || !(0..8).contains(&f) {
                    break;
                }
                bb = bb.with(Square::from_rank_file(r as u8, f as u8));
            }
            table[dir_idx][sq.index()] = bb;
        }
    }
    table
});

pub static CARDINAL_MASK: LazyLock<[Bitboard; 64]> = LazyLock::new(|| {
    let mut table = [Bitboard::EMPTY; 64];
    for sq in Square::all() {
        let mut bb = Bitboard::EMPTY;
        for (dir_idx, dir) in DIRECTIONS.iter().enumerate() {
            if !dir.is_diagonal() {
                bb |= RAYS[dir_idx][sq.index()];
            }
        }
        table[sq.index()] = bb;
    }
    table
});

pub static DIAGONAL_MASK: LazyLock<[Bitboard; 64]> = LazyLock::new(|| {
    let mut table = [Bitboard::EMPTY; 64];
    for sq in Square::all() {
        let mut bb = Bitboard::EMPTY;
        for (dir_idx, dir) in DIRECTIONS.iter().enumerate() {
            if dir.is_diagonal() {
                bb |= RAYS[dir_idx][sq.index()];
            }
        }
        table[sq.index()] = bb;
    }
    table
});

/// `between[a][b]`: squares strictly between `a` and `b` if they share a
/// rank, file or diagonal; empty otherwise.
pub static BETWEEN: LazyLock<[[Bitboard; 64]; 64]> = LazyLock::new(|| {
    let mut table = [[Bitboard::EMPTY; 64]; 64];
    for a in Square::all() {
        for (dir_idx, _dir) in DIRECTIONS.iter().enumerate() {
            let ray = RAYS[dir_idx][a.index()];
            for b in ray.iter() {
                // Squares between a and b along this ray: the ray from a,
                // minus b itself, minus the ray continuing past b.
                let beyond = RAYS[dir_idx][b.index()];
                table[a.index()][b.index()] = ray & !beyond & !Bitboard::from_square(b);
            }
        }
    }
    table
});

/// Index of `dir` into the direction tables.
pub const fn direction_index(dir: Direction) -> usize {
    match dir {
        Direction::North => 0,
        Direction::NorthEast => 1,
        Direction::East => 2,
        Direction::SouthEast => 3,
        Direction::South => 4,
        Direction::SouthWest => 5,
        Direction::West => 6,
        Direction::NorthWest => 7,
    }
}

/// Sliding attack set from `sq` in direction `dir` given occupancy `occ`.
/// `occ` should already have any `ignore` squares removed.
fn ray_attack(sq: Square, dir: Direction, occ: Bitboard) -> Bitboard {
    let idx = direction_index(dir);
    let ray = RAYS[idx][sq.index()];
    let blockers = ray & occ;
    if blockers.is_empty() {
        return ray;
    }
    let blocker = if dir.is_positive() {
        blockers.lsb()
    } else {
        blockers.msb()
    };
    let blocked_suffix = RAYS[idx][blocker.index()];
    ray & !blocked_suffix
}

/// Union of ray attacks over `dirs` from `sq`, with `ignore` treated as empty.
fn sliding_attacks(sq: Square, dirs: &[Direction], occupied_all: Bitboard, ignore: Bitboard) -> Bitboard {
    let occ = occupied_all & !ignore;
    let mut bb = Bitboard::EMPTY;
    for &dir in dirs {
        bb |= ray_attack(sq, dir, occ);
    }
    bb
}

const ROOK_DIRS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];
const BISHOP_DIRS: [Direction; 4] = [
    Direction::NorthEast,
    Direction::SouthEast,
    Direction::SouthWest,
    Direction::NorthWest,
];

#[must_use]
pub fn rook_attacks(sq: Square, occupied_all: Bitboard, ignore: Bitboard) -> Bitboard {
    sliding_attacks(sq, &ROOK_DIRS, occupied_all, ignore)
}

#[must_use]
pub fn bishop_attacks(sq: Square, occupied_all: Bitboard, ignore: Bitboard) -> Bitboard {
    sliding_attacks(sq, &BISHOP_DIRS, occupied_all, ignore)
}

#[must_use]
pub fn queen_attacks(sq: Square, occupied_all: Bitboard, ignore: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied_all, ignore) | bishop_attacks(sq, occupied_all, ignore)
}

#[must_use]
pub fn between(a: Square, b: Square) -> Bitboard {
    BETWEEN[a.index()][b.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_corner_has_two_moves() {
        let a1 = Square::from_rank_file(0, 0);
        assert_eq!(KNIGHT_MOVES[a1.index()].popcount(), 2);
    }

    #[test]
    fn king_center_has_eight_moves() {
        let e4 = Square::from_rank_file(3, 4);
        assert_eq!(KING_MOVES[e4.index()].popcount(), 8);
    }

    #[test]
    fn pawn_double_push_only_from_start_rank() {
        let e2 = Square::from_rank_file(1, 4);
        let e3 = Square::from_rank_file(2, 4);
        assert!(!PAWN_DOUBLE_PUSH[Color::White.index()][e2.index()].is_empty());
        assert!(PAWN_DOUBLE_PUSH[Color::White.index()][e3.index()].is_empty());
    }

    #[test]
    fn between_shares_a_ray() {
        let a1 = Square::from_rank_file(0, 0);
        let a8 = Square::from_rank_file(7, 0);
        let mid = between(a1, a8);
        assert_eq!(mid.popcount(), 6);
        assert!(between(a1, Square::from_rank_file(1, 1)).is_empty());
    }

    #[test]
    fn rook_attacks_stop_at_blocker() {
        let a1 = Square::from_rank_file(0, 0);
        let occ = Bitboard::from_square(Square::from_rank_file(3, 0));
        let attacks = rook_attacks(a1, occ, Bitboard::EMPTY);
        assert!(attacks.contains(Square::from_rank_file(3, 0)));
        assert!(!attacks.contains(Square::from_rank_file(4, 0)));
    }

    #[test]
    fn ignore_mask_sees_through() {
        let a1 = Square::from_rank_file(0, 0);
        let blocker = Square::from_rank_file(3, 0);
        let occ = Bitboard::from_square(blocker);
        let attacks = rook_attacks(a1, occ, Bitboard::from_square(blocker));
        assert!(attacks.contains(Square::from_rank_file(7, 0)));
    }
}
