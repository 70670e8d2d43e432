//! Pseudo-legal move generation: obeys piece geometry and occupancy but may
//! leave the mover's king in check.

use crate::attack_tables::{self, KING_MOVES, KNIGHT_MOVES, PAWN_ATTACKS, PAWN_DOUBLE_PUSH, PAWN_SINGLE_PUSH};
use crate::types::{Bitboard, CastlingRights, Color, Move, PieceKind, Square, PROMOTION_KINDS};

use super::Position;

impl Position {
    /// All pseudo-legal moves for the side to move. Collected eagerly into a
    /// `Vec` here rather than streamed lazily; `legal_moves` filters this
    /// list and is what search actually drives.
    #[must_use]
    pub fn pseudo_legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        let side = self.turn;
        let own = self.occupied(side);

        self.gen_pawn_moves(side, &mut moves);

        for sq in self.pieces(side, PieceKind::Knight).iter() {
            push_targets(sq, KNIGHT_MOVES[sq.index()] & !own, &mut moves);
        }
        for sq in self.pieces(side, PieceKind::Bishop).iter() {
            let attacks = attack_tables::bishop_attacks(sq, self.occupied_all, Bitboard::EMPTY);
            push_targets(sq, attacks & !own, &mut moves);
        }
        for sq in self.pieces(side, PieceKind::Rook).iter() {
            let attacks = attack_tables::rook_attacks(sq, self.occupied_all, Bitboard::EMPTY);
            push_targets(sq, attacks & !own, &mut moves);
        }
        for sq in self.pieces(side, PieceKind::Queen).iter() {
            let attacks = attack_tables::queen_attacks(sq, self.occupied_all, Bitboard::EMPTY);
            push_targets(sq, attacks & !own, &mut moves);
        }
        let king_sq = self.king_square(side);
        push_targets(king_sq, KING_MOVES[king_sq.index()] & !own, &mut moves);
        self.gen_castling(side, king_sq, &mut moves);

        moves
    }

    fn gen_pawn_moves(&self, side: Color, moves: &mut Vec<Move>) {
        let enemy = self.occupied(side.opposite());
        let ep_bit = self
            .en_passant
            .map(Bitboard::from_square)
            .unwrap_or(Bitboard::EMPTY);
        let back_rank = if side == Color::White { 7 } else { 0 };

        for from in self.pieces(side, PieceKind::Pawn).iter() {
            let single = PAWN_SINGLE_PUSH[side.index()][from.index()] & !self.occupied_all;
            if !single.is_empty() {
                emit_pawn_move(from, single.lsb(), back_rank, moves);
                let double = PAWN_DOUBLE_PUSH[side.index()][from.index()] & !self.occupied_all;
                if !double.is_empty() {
                    moves.push(Move::new(from, double.lsb()));
                }
            }
            let captures = PAWN_ATTACKS[side.index()][from.index()] & (enemy | ep_bit);
            for to in captures.iter() {
                emit_pawn_move(from, to, back_rank, moves);
            }
        }
    }

    fn gen_castling(&self, side: Color, king_sq: Square, moves: &mut Vec<Move>) {
        for kingside in [true, false] {
            if !self.castling_rights.has(side, kingside) {
                continue;
            }
            let rook_sq = CastlingRights::rook_square(side, kingside);
            if !(attack_tables::between(king_sq, rook_sq) & self.occupied_all).is_empty() {
                continue;
            }
            let dest_file = if kingside { 6 } else { 2 };
            let dest = Square::from_rank_file(king_sq.rank(), dest_file);
            moves.push(Move::castling(king_sq, dest));
        }
    }
}

fn emit_pawn_move(from: Square, to: Square, back_rank: u8, moves: &mut Vec<Move>) {
    if to.rank() == back_rank {
        for &kind in &PROMOTION_KINDS {
            moves.push(Move::promoting(from, to, kind));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

fn push_targets(from: Square, targets: Bitboard, moves: &mut Vec<Move>) {
    for to in targets.iter() {
        moves.push(Move::new(from, to));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_has_twenty_pseudo_legal_moves() {
        let pos = Position::startpos();
        assert_eq!(pos.pseudo_legal_moves().len(), 20);
    }

    #[test]
    fn promotion_rank_expands_to_four_moves() {
        let pos = Position::from_fen(
            "rnbqr3/pppp2P1/3k1n1p/2p1p3/3b4/8/PPPPPP1P/RNBQKBNR w KQ - 0 1",
        )
        .unwrap();
        let g7 = Square::from_rank_file(6, 6);
        let promos: Vec<_> = pos
            .pseudo_legal_moves()
            .into_iter()
            .filter(|m| m.from == g7)
            .collect();
        assert_eq!(promos.len(), 4);
    }
}
