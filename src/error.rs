//! Error types for the rules core.
//!
//! Nothing in the core aborts on bad input: malformed placement strings,
//! malformed snapshots, off-board coordinates and rejected moves all come back
//! as values the caller can absorb.

use thiserror::Error;

use crate::types::Square;

/// Errors raised while importing a placement string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("placement string is empty")]
    Empty,

    #[error("invalid character '{ch}' at index {index} in placement string")]
    InvalidCharacter { ch: char, index: usize },

    /// `rank` counts from 0 for the first rank listed in the string.
    #[error("rank {rank} covers {squares} squares (must be 8)")]
    RankLength { rank: usize, squares: usize },

    #[error("placement string has {0} ranks (must be 8)")]
    RankCount(usize),
}

/// Errors raised while decoding a 64-character state snapshot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("snapshot has {0} characters (must be 64)")]
    Length(usize),

    #[error("invalid character '{ch}' at index {index} in snapshot")]
    InvalidCharacter { ch: char, index: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("coordinates ({row}, {col}) are off the board")]
    OutOfBounds { row: i32, col: i32 },

    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("{from}{to} is not an available move")]
    IllegalMove { from: Square, to: Square },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

pub type ChessResult<T> = Result<T, ChessError>;
