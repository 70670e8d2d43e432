//! End-of-game predicates and the `raise_if_game_over` probe.

use crate::error::GameOverKind;
use crate::types::{Bitboard, Color, PieceKind};

use super::Position;

impl Position {
    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.in_check(self.turn) && self.legal_moves().is_empty()
    }

    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.in_check(self.turn) && self.legal_moves().is_empty()
    }

    #[must_use]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Insufficient-material draw, following the classical rule set:
    /// - any pawn/rook/queen on the board -> sufficient
    /// - king vs king -> insufficient
    /// - total pieces >= 5 -> sufficient
    /// - king + knight vs king -> insufficient
    /// - only bishops + kings, all bishops same-coloured square -> insufficient
    #[must_use]
    pub fn has_insufficient_material(&self) -> bool {
        let pawns = self.pieces(Color::White, PieceKind::Pawn) | self.pieces(Color::Black, PieceKind::Pawn);
        let rooks = self.pieces(Color::White, PieceKind::Rook) | self.pieces(Color::Black, PieceKind::Rook);
        let queens = self.pieces(Color::White, PieceKind::Queen) | self.pieces(Color::Black, PieceKind::Queen);
        if !pawns.is_empty() || !rooks.is_empty() || !queens.is_empty() {
            return false;
        }

        let total_pieces = self.occupied_all.popcount();
        if total_pieces == 2 {
            return true; // king vs king
        }
        if total_pieces >= 5 {
            return false;
        }

        let knights = self.pieces(Color::White, PieceKind::Knight) | self.pieces(Color::Black, PieceKind::Knight);
        let bishops = self.pieces(Color::White, PieceKind::Bishop) | self.pieces(Color::Black, PieceKind::Bishop);

        if knights.is_empty() {
            // Only kings and (0 or more) bishops remain: insufficient iff
            // every bishop sits on the same-coloured squares (vacuously
            // true for zero or one bishop).
            return bishops_same_colour(bishops);
        }
        if knights.popcount() == 1 && bishops.is_empty() && total_pieces == 3 {
            return true; // king + knight vs king
        }
        false
    }

    /// True once the current position's short-FEN fingerprint has appeared
    /// three or more times in `repetitions`. `repetitions` already includes
    /// the current position's own fingerprint (appended by the move that
    /// produced it), so no extra `+ 1` is needed here. Always `false` unless
    /// the position was constructed with repetition tracking enabled.
    #[must_use]
    pub fn has_threefold_repetition(&self) -> bool {
        let Some(reps) = self.repetitions.as_ref() else {
            return false;
        };
        if !self.track_repetitions {
            return false;
        }
        let current = self.short_fen();
        reps.iter().filter(|fp| **fp == current).count() >= 3
    }

    /// Raise the first applicable game-over signal, or `Ok(())` if play may
    /// continue. Used by untrusted front-ends to end a game cleanly.
    pub fn raise_if_game_over(&self) -> Result<(), GameOverKind> {
        if self.is_checkmate() {
            return Err(GameOverKind::Checkmate);
        }
        if self.is_stalemate() {
            return Err(GameOverKind::Stalemate);
        }
        if self.is_fifty_move_draw() {
            return Err(GameOverKind::FiftyMoveDraw);
        }
        if self.has_threefold_repetition() {
            return Err(GameOverKind::ThreefoldRepetition);
        }
        if self.has_insufficient_material() {
            return Err(GameOverKind::InsufficientMaterial);
        }
        Ok(())
    }
}

fn bishops_same_colour(bishops: Bitboard) -> bool {
    (bishops & Bitboard::LIGHT_SQUARES).is_empty() || (bishops & Bitboard::DARK_SQUARES).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Move;

    #[test]
    fn detects_back_rank_checkmate() {
        let pos = Position::from_fen("3q1bRk/5p2/5N1p/8/8/8/2r2PPP/6K1 b - - 0 1").unwrap();
        assert!(pos.is_checkmate());
        assert!(!pos.is_stalemate());
    }

    #[test]
    fn detects_king_and_pawn_stalemate() {
        let pos = Position::from_fen("5k2/5P2/5K2/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(pos.is_stalemate());
        assert!(!pos.is_checkmate());
    }

    #[test]
    fn insufficient_material_king_vs_king() {
        let pos = Position::from_fen("8/8/3K4/8/1k6/8/8/8 w - - 0 1").unwrap();
        assert!(pos.has_insufficient_material());
    }

    #[test]
    fn opposite_colour_bishops_are_sufficient() {
        let pos = Position::from_fen("8/8/3bb3/8/1k6/8/3K4/8 b - - 0 1").unwrap();
        assert!(!pos.has_insufficient_material());
    }

    #[test]
    fn detects_threefold_repetition_and_clears_on_alternative() {
        let mut pos = Position::startpos_tracked();
        let moves = [
            "b2b3", "c7c6", "b3b4", "c6c5", "b4c5", "b8c6", "c2c4", "a8b8", "d1b3", "b8a8",
            "b3d3", "a8b8", "d3b3", "b8a8", "b3d3", "a8b8", "d3b3",
        ];
        for uci in moves {
            let m: Move = uci.parse().unwrap();
            pos.make_safe_move(m).unwrap();
        }
        assert!(pos.has_threefold_repetition());
        pos.unmake_move();
        let alt: Move = "a2a3".parse().unwrap();
        pos.make_safe_move(alt).unwrap();
        assert!(!pos.has_threefold_repetition());
    }
}
