//! Error types surfaced at the core API boundary.

use std::fmt;

use crate::types::Square;

/// FEN parsing failures. Fatal to [`crate::Position::from_fen`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Fewer than the minimum four space-separated fields were present.
    TooFewParts { found: usize },
    /// A rank string in the piece-placement field did not sum to 8 files.
    InvalidRank { rank: usize, files: usize },
    /// More than 8 rank groups were given.
    TooManyRanks,
    /// A character in the piece-placement field was neither a piece letter nor a digit 1-8.
    InvalidPiece { ch: char },
    /// Side-to-move was not `w` or `b`.
    InvalidSideToMove { found: String },
    /// A character in the castling field was not one of `KQkq-`.
    InvalidCastling { ch: char },
    /// The en-passant field was not `-` or a valid square name.
    InvalidEnPassant { found: String },
    /// Placement did not contain exactly one king per side.
    WrongKingCount { white: u32, black: u32 },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN must have at least 4 fields, found {found}")
            }
            FenError::InvalidRank { rank, files } => {
                write!(f, "rank {rank} has {files} files, expected 8")
            }
            FenError::TooManyRanks => write!(f, "FEN piece placement has more than 8 ranks"),
            FenError::InvalidPiece { ch } => write!(f, "invalid piece character '{ch}' in FEN"),
            FenError::InvalidSideToMove { found } => {
                write!(f, "invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { ch } => {
                write!(f, "invalid castling character '{ch}' in FEN")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant square '{found}'")
            }
            FenError::WrongKingCount { white, black } => write!(
                f,
                "expected exactly one king per side, found {white} white and {black} black"
            ),
        }
    }
}

impl std::error::Error for FenError {}

/// Square name parsing failures (e.g. within a UCI move string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::InvalidNotation { notation } => {
                write!(f, "invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// UCI move-string parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    InvalidLength { len: usize },
    InvalidSquare(SquareError),
    InvalidPromotion { ch: char },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "move string must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare(e) => write!(f, "{e}"),
            MoveParseError::InvalidPromotion { ch } => {
                write!(f, "invalid promotion character '{ch}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

impl From<SquareError> for MoveParseError {
    fn from(e: SquareError) -> Self {
        MoveParseError::InvalidSquare(e)
    }
}

/// A move rejected by the legal-move filter, or one referring to an empty
/// or wrong-coloured source square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IllegalMoveError {
    /// `from` held no piece.
    EmptySource { from: Square },
    /// `from` held a piece of the side *not* to move.
    WrongColor { from: Square },
    /// The move (by UCI-equality, from/to only) is not in `legal_moves()`.
    NotLegal { from: Square, to: Square },
}

impl fmt::Display for IllegalMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMoveError::EmptySource { from } => {
                write!(f, "no piece on {from}")
            }
            IllegalMoveError::WrongColor { from } => {
                write!(f, "piece on {from} does not belong to the side to move")
            }
            IllegalMoveError::NotLegal { from, to } => {
                write!(f, "{from}{to} is not a legal move")
            }
        }
    }
}

impl std::error::Error for IllegalMoveError {}

/// Signals a caller uses to end a game cleanly. Raised only by
/// [`crate::Position::raise_if_game_over`]; not a bug condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverKind {
    Checkmate,
    Stalemate,
    FiftyMoveDraw,
    InsufficientMaterial,
    ThreefoldRepetition,
}

impl GameOverKind {
    /// A fixed explanatory string for the signal.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            GameOverKind::Checkmate => "checkmate",
            GameOverKind::Stalemate => "stalemate",
            GameOverKind::FiftyMoveDraw => "draw by the fifty-move rule",
            GameOverKind::InsufficientMaterial => "draw by insufficient material",
            GameOverKind::ThreefoldRepetition => "draw by threefold repetition",
        }
    }
}

impl fmt::Display for GameOverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for GameOverKind {}
