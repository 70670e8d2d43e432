//! The `Move` type.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::MoveParseError;

use super::piece::PieceKind;
use super::square::Square;

/// A single move: source, destination, optional promotion, and a castling flag.
///
/// Equality is deliberately from/to only: two moves with the same squares
/// compare equal even if one carries a promotion and the other doesn't.
/// Internally, promotion and `is_castling` still participate in make/unmake
/// and must be read via the accessors, not inferred from `==`.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub is_castling: bool,
}

impl Move {
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
            is_castling: false,
        }
    }

    #[must_use]
    pub const fn promoting(from: Square, to: Square, promotion: PieceKind) -> Self {
        Move {
            from,
            to,
            promotion: Some(promotion),
            is_castling: false,
        }
    }

    #[must_use]
    pub const fn castling(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
            is_castling: true,
        }
    }

    /// Equality including promotion, for contexts that must distinguish
    /// `e7e8q` from `e7e8n` (e.g. de-duplicating a move list for display).
    #[must_use]
    pub fn exact_eq(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to && self.promotion == other.promotion
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}
impl Eq for Move {}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 && s.len() != 5 {
            return Err(MoveParseError::InvalidLength { len: s.len() });
        }
        let from: Square = s[0..2].parse()?;
        let to: Square = s[2..4].parse()?;
        let promotion = if s.len() == 5 {
            let ch = s.as_bytes()[4] as char;
            Some(PieceKind::from_char(ch).ok_or(MoveParseError::InvalidPromotion { ch })?)
        } else {
            None
        };
        Ok(Move {
            from,
            to,
            promotion,
            is_castling: false,
        })
    }
}
