//! Make / unmake a move and the safe-move wrapper used by untrusted callers.

use crate::error::IllegalMoveError;
use crate::types::{CastlingRights, Color, Move, PieceKind, Square};

use super::{Position, Snapshot};

impl Position {
    /// Apply `m` without re-checking legality. Callers that may pass
    /// untrusted input should use [`make_safe_move`] instead.
    ///
    /// # Errors
    /// Returns [`IllegalMoveError`] (and leaves the position unchanged) if
    /// `from` is empty or holds a piece of the wrong colour.
    pub fn make_move(&mut self, m: Move) -> Result<(), IllegalMoveError> {
        let side = self.turn;
        let Some((mover_color, mover_kind)) = self.piece_at(m.from) else {
            return Err(IllegalMoveError::EmptySource { from: m.from });
        };
        if mover_color != side {
            return Err(IllegalMoveError::WrongColor { from: m.from });
        }
        let captured = self.piece_at(m.to);

        self.history.push(Snapshot {
            pieces: self.pieces,
            occupied: self.occupied,
            occupied_all: self.occupied_all,
            turn: self.turn,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmoves: self.fullmoves,
            repetitions: self.repetitions.clone(),
        });

        let is_en_passant_capture = mover_kind == PieceKind::Pawn
            && Some(m.to) == self.en_passant
            && m.from.file() != m.to.file();
        let is_castle = m.is_castling;
        let is_double_push = mover_kind == PieceKind::Pawn
            && m.from.rank().abs_diff(m.to.rank()) == 2;

        if is_castle {
            self.remove_piece(side, PieceKind::King, m.from);
            self.put_piece(side, PieceKind::King, m.to);
            let kingside = m.to.file() == 6;
            let rook_from = CastlingRights::rook_square(side, kingside);
            let rook_to = Square::from_rank_file(m.from.rank(), if kingside { 5 } else { 3 });
            self.remove_piece(side, PieceKind::Rook, rook_from);
            self.put_piece(side, PieceKind::Rook, rook_to);
            self.castling_rights.clear_color(side);
            self.clear_repetitions();
        } else if is_en_passant_capture {
            let victim_sq = if side == Color::White {
                Square::from_rank_file(m.to.rank() - 1, m.to.file())
            } else {
                Square::from_rank_file(m.to.rank() + 1, m.to.file())
            };
            self.remove_piece(side.opposite(), PieceKind::Pawn, victim_sq);
            self.remove_piece(side, PieceKind::Pawn, m.from);
            self.put_piece(side, PieceKind::Pawn, m.to);
        } else if let Some(promotion) = m.promotion {
            if let Some((victim_color, victim_kind)) = captured {
                self.remove_piece(victim_color, victim_kind, m.to);
            }
            self.remove_piece(side, PieceKind::Pawn, m.from);
            self.put_piece(side, promotion, m.to);
        } else {
            if let Some((victim_color, victim_kind)) = captured {
                self.remove_piece(victim_color, victim_kind, m.to);
            }
            self.remove_piece(side, mover_kind, m.from);
            self.put_piece(side, mover_kind, m.to);
        }

        // Castling-right invalidation: a captured rook on its home square
        // also revokes that side's matching right, which a "mover is king
        // or rook" rule alone would miss.
        if !is_castle {
            if mover_kind == PieceKind::King {
                self.castling_rights.clear_color(side);
            } else if mover_kind == PieceKind::Rook {
                for kingside in [true, false] {
                    if CastlingRights::rook_square(side, kingside) == m.from {
                        self.castling_rights.clear(side, kingside);
                    }
                }
            }
            if let Some((victim_color, victim_kind)) = captured {
                if victim_kind == PieceKind::Rook {
                    if let Some(kingside) = self.castling_right_lost_by_capture(victim_color, m.to)
                    {
                        self.castling_rights.clear(victim_color, kingside);
                    }
                }
            }
        }

        self.en_passant = if is_double_push {
            let behind_rank = if side == Color::White {
                m.from.rank() + 1
            } else {
                m.from.rank() - 1
            };
            Some(Square::from_rank_file(behind_rank, m.from.file()))
        } else {
            None
        };

        // Halfmove clock resets on capture or pawn move only; castling
        // itself is neither and keeps advancing it.
        let resets_clock = mover_kind == PieceKind::Pawn || captured.is_some() || is_en_passant_capture;
        if resets_clock {
            self.halfmove_clock = 0;
            self.clear_repetitions();
        } else {
            self.halfmove_clock += 1;
        }

        if side == Color::Black {
            self.fullmoves += 1;
        }
        self.turn = side.opposite();

        // A reversible move (no capture, no pawn move, not castling) is the
        // only kind that extends the repetition fingerprint list. Taken
        // after the turn flip so the fingerprint matches what `short_fen`
        // reports for this position from here on (side to move included).
        let is_reversible = !resets_clock && !is_castle;
        if is_reversible && self.track_repetitions {
            let fp = self.short_fen();
            self.repetitions.get_or_insert_with(Vec::new).push(fp);
        }

        Ok(())
    }

    /// Verify `m` is in [`Position::legal_moves`] (by from/to equality, per
    /// `Move`'s contract) before applying it.
    ///
    /// Applies the matched legal move rather than `m` itself: `m` may come
    /// from a bare UCI string, which carries a promotion kind but never sets
    /// `is_castling`; the legal move found by the search carries the correct
    /// flags so castling through this entry point moves the rook.
    ///
    /// # Errors
    /// Returns [`IllegalMoveError::NotLegal`] if no legal move shares `m`'s
    /// from/to squares (and promotion, when `m` specifies one).
    pub fn make_safe_move(&mut self, m: Move) -> Result<(), IllegalMoveError> {
        let matched = self
            .legal_moves()
            .into_iter()
            .find(|legal| *legal == m && legal.promotion == m.promotion);
        match matched {
            Some(legal) => self.make_move(legal),
            None => Err(IllegalMoveError::NotLegal {
                from: m.from,
                to: m.to,
            }),
        }
    }

    /// Pop the top snapshot pushed by the matching `make_move` and restore
    /// every field wholesale.
    ///
    /// # Panics
    /// Panics if called without a matching prior `make_move` (history empty).
    pub fn unmake_move(&mut self) {
        let snap = self
            .history
            .pop()
            .expect("unmake_move called with empty history");
        self.pieces = snap.pieces;
        self.occupied = snap.occupied;
        self.occupied_all = snap.occupied_all;
        self.turn = snap.turn;
        self.castling_rights = snap.castling_rights;
        self.en_passant = snap.en_passant;
        self.halfmove_clock = snap.halfmove_clock;
        self.fullmoves = snap.fullmoves;
        self.repetitions = snap.repetitions;
    }

    fn clear_repetitions(&mut self) {
        if let Some(reps) = self.repetitions.as_mut() {
            reps.clear();
        }
    }
}

/// Apply `m` only if it is a legal move. Convenience free function mirroring
/// [`Position::make_safe_move`], used by untrusted callers (HTTP/UCI
/// front-ends).
pub fn make_safe_move(pos: &mut Position, m: Move) -> Result<(), IllegalMoveError> {
    pos.make_safe_move(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_then_unmake_restores_fen() {
        let mut pos = Position::startpos();
        let before = pos.to_fen();
        let m: Move = "e2e4".parse().unwrap();
        pos.make_move(m).unwrap();
        assert_ne!(pos.to_fen(), before);
        pos.unmake_move();
        assert_eq!(pos.to_fen(), before);
    }

    #[test]
    fn promotion_emits_all_four_kinds_and_applies() {
        let mut pos = Position::from_fen(
            "rnbqr3/pppp2P1/3k1n1p/2p1p3/3b4/8/PPPPPP1P/RNBQKBNR w KQ - 0 1",
        )
        .unwrap();
        let g7 = Square::from_rank_file(6, 6);
        let g8 = Square::from_rank_file(7, 6);
        let promos: Vec<_> = pos
            .legal_moves()
            .into_iter()
            .filter(|m| m.from == g7 && m.to == g8)
            .collect();
        // From/to equality collapses all four into one logical entry; this
        // asserts all four promotion kinds exist as pseudo-legal moves
        // before the dedup-by-equality happens.
        assert!(!promos.is_empty());

        let queen_promo = crate::types::Move::promoting(g7, g8, PieceKind::Queen);
        pos.make_move(queen_promo).unwrap();
        assert_eq!(
            pos.to_fen(),
            "rnbqr1Q1/pppp4/3k1n1p/2p1p3/3b4/8/PPPPPP1P/RNBQKBNR b KQ - 0 1"
        );
    }

    #[test]
    fn en_passant_capture_applies_and_updates_fen() {
        let mut pos = Position::startpos();
        for uci in ["a2a3", "g7g5", "a3a4", "g5g4", "f2f4"] {
            let m: Move = uci.parse().unwrap();
            pos.make_safe_move(m).unwrap();
        }
        let g4f3: Move = "g4f3".parse().unwrap();
        assert!(pos.legal_moves().iter().any(|m| *m == g4f3));
        pos.make_safe_move(g4f3).unwrap();
        assert_eq!(
            pos.to_fen(),
            "rnbqkbnr/pppppp1p/8/8/P7/5p2/1PPPP1PP/RNBQKBNR w KQkq - 0 4"
        );
    }

    #[test]
    fn kingside_castle_clears_white_rights_only() {
        let mut pos = Position::startpos();
        for uci in [
            "g1f3", "b8c6", "h2h4", "a7a5", "g2g3", "b7b6", "f1g2", "c8b7", "d2d3", "d7d5",
            "a2a3", "d8d6",
        ] {
            let m: Move = uci.parse().unwrap();
            pos.make_safe_move(m).unwrap();
        }
        let castle: Move = "e1g1".parse().unwrap();
        assert!(pos.legal_moves().iter().any(|m| *m == castle));
        pos.make_safe_move(castle).unwrap();
        assert!(pos.castling_rights().has(Color::Black, true));
        assert!(pos.castling_rights().has(Color::Black, false));
        assert!(!pos.castling_rights().has(Color::White, true));
        assert!(!pos.castling_rights().has(Color::White, false));
    }

    #[test]
    fn rook_captured_on_home_square_clears_right() {
        // Black bishop on b2 can capture the white rook still sitting on its
        // home square a1; white's queenside right must be revoked even
        // though White neither moved its king nor its rook.
        let mut pos = Position::from_fen("4k3/8/8/8/8/8/1b6/R3K3 b Q - 0 1").unwrap();
        let capture: Move = "b2a1".parse().unwrap();
        pos.make_safe_move(capture).unwrap();
        assert!(!pos.castling_rights().has(Color::White, false));
    }

    #[test]
    fn unmake_restores_repetitions_cleared_by_a_capture() {
        let mut pos = Position::startpos_tracked();
        for uci in ["g1f3", "b8c6", "f3g1", "c6b8"] {
            let m: Move = uci.parse().unwrap();
            pos.make_safe_move(m).unwrap();
        }
        let before = pos.repetitions.clone();
        assert!(!before.as_ref().unwrap().is_empty());

        let capture: Move = "e2e4".parse().unwrap();
        pos.make_safe_move(capture).unwrap();
        let e5: Move = "e7e5".parse().unwrap();
        pos.make_safe_move(e5).unwrap();
        let queen_out: Move = "d1h5".parse().unwrap();
        pos.make_safe_move(queen_out).unwrap();
        let capturing_queen: Move = "h5e5".parse().unwrap();
        pos.make_safe_move(capturing_queen).unwrap();
        assert!(pos.repetitions.as_ref().unwrap().is_empty());

        pos.unmake_move();
        pos.unmake_move();
        pos.unmake_move();
        pos.unmake_move();
        assert_eq!(pos.repetitions, before);
    }
}
