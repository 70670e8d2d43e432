//! FEN parsing and formatting.

use std::fmt::Write as _;

use crate::error::FenError;
use crate::types::{Color, PieceKind, Square, ALL_KINDS};

use super::Position;

impl Position {
    /// Parse a FEN string. Missing trailing fields default as follows:
    /// side-to-move -> white, castling -> none, en passant -> none,
    /// halfmove -> 0, fullmove -> 1.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut pos = Position::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.is_empty() {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() > 8 {
            return Err(FenError::TooManyRanks);
        }
        for (rank_from_top, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_from_top as u8;
            let mut file = 0u8;
            for ch in rank_str.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    file += skip as u8;
                } else {
                    let color = if ch.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind =
                        PieceKind::from_char(ch).ok_or(FenError::InvalidPiece { ch })?;
                    if file >= 8 {
                        return Err(FenError::InvalidRank {
                            rank: rank_from_top,
                            files: (file + 1) as usize,
                        });
                    }
                    pos.put_piece(color, kind, Square::from_rank_file(rank, file));
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::InvalidRank {
                    rank: rank_from_top,
                    files: file as usize,
                });
            }
        }

        let white_kings = pos.pieces(Color::White, PieceKind::King).popcount();
        let black_kings = pos.pieces(Color::Black, PieceKind::King).popcount();
        if white_kings != 1 || black_kings != 1 {
            return Err(FenError::WrongKingCount {
                white: white_kings,
                black: black_kings,
            });
        }

        pos.turn = match parts.get(1).copied().unwrap_or("w") {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        if let Some(castling) = parts.get(2).copied().filter(|s| *s != "-") {
            for ch in castling.chars() {
                match ch {
                    'K' => pos.castling_rights.set(Color::White, true),
                    'Q' => pos.castling_rights.set(Color::White, false),
                    'k' => pos.castling_rights.set(Color::Black, true),
                    'q' => pos.castling_rights.set(Color::Black, false),
                    _ => return Err(FenError::InvalidCastling { ch }),
                }
            }
        }

        pos.en_passant = match parts.get(3).copied().unwrap_or("-") {
            "-" => None,
            s => Some(s.parse().map_err(|_| FenError::InvalidEnPassant {
                found: s.to_string(),
            })?),
        };

        pos.halfmove_clock = parts.get(4).and_then(|s| s.parse().ok()).unwrap_or(0);
        pos.fullmoves = parts.get(5).and_then(|s| s.parse().ok()).unwrap_or(1);

        Ok(pos)
    }

    /// Render the position as a full six-field FEN string.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut s = String::new();
        write_placement(self, &mut s);
        s.push(' ');
        s.push(if self.turn == Color::White { 'w' } else { 'b' });
        s.push(' ');
        write_castling(self, &mut s);
        s.push(' ');
        match self.en_passant {
            Some(sq) => write!(s, "{sq}").unwrap(),
            None => s.push('-'),
        }
        write!(s, " {} {}", self.halfmove_clock, self.fullmoves).unwrap();
        s
    }
}

fn write_placement(pos: &Position, out: &mut String) {
    for rank_from_top in 0..8u8 {
        let rank = 7 - rank_from_top;
        let mut empty = 0u32;
        for file in 0..8u8 {
            let sq = Square::from_rank_file(rank, file);
            match pos.piece_at(sq) {
                Some((color, kind)) => {
                    if empty > 0 {
                        write!(out, "{empty}").unwrap();
                        empty = 0;
                    }
                    out.push(kind.to_fen_char(color));
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            write!(out, "{empty}").unwrap();
        }
        if rank_from_top != 7 {
            out.push('/');
        }
    }
}

fn write_castling(pos: &Position, out: &mut String) {
    let start_len = out.len();
    if pos.castling_rights.has(Color::White, true) {
        out.push('K');
    }
    if pos.castling_rights.has(Color::White, false) {
        out.push('Q');
    }
    if pos.castling_rights.has(Color::Black, true) {
        out.push('k');
    }
    if pos.castling_rights.has(Color::Black, false) {
        out.push('q');
    }
    if out.len() == start_len {
        out.push('-');
    }
}

/// The first four FEN fields, used as the repetition fingerprint.
pub(super) fn short_fen(pos: &Position) -> String {
    let mut s = String::new();
    write_placement(pos, &mut s);
    s.push(' ');
    s.push(if pos.turn == Color::White { 'w' } else { 'b' });
    s.push(' ');
    write_castling(pos, &mut s);
    s.push(' ');
    match pos.en_passant {
        Some(sq) => write!(s, "{sq}").unwrap(),
        None => s.push('-'),
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_roundtrip() {
        let pos = Position::startpos();
        assert_eq!(pos.to_fen(), super::super::STARTPOS_FEN);
    }

    #[test]
    fn missing_trailing_fields_default() {
        let pos = Position::from_fen("8/8/8/8/8/8/8/K6k").unwrap();
        assert_eq!(pos.turn(), Color::White);
        assert_eq!(pos.castling_rights().has(Color::White, true), false);
        assert_eq!(pos.en_passant(), None);
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.fullmoves(), 1);
    }

    #[test]
    fn rejects_wrong_king_count() {
        assert!(Position::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(Position::from_fen("kk6/8/8/8/8/8/8/K7 w - - 0 1").is_err());
    }

    #[test]
    fn rejects_invalid_piece_char() {
        assert!(Position::from_fen("8/8/8/8/8/8/8/KQ5x w - - 0 1").is_err());
    }
}
