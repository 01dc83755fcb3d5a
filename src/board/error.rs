//! Error types for chess board operations.

use std::fmt;

/// Error type for FEN parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few whitespace-separated fields (needs at least 4).
    TooFewParts { found: usize },
    /// Invalid piece character in the board-placement field.
    InvalidPiece { char: char },
    /// Invalid castling-rights character.
    InvalidCastling { char: char },
    /// Side-to-move field was not `w` or `b`.
    InvalidSideToMove { found: String },
    /// En-passant target field was not `-` or a valid algebraic square.
    InvalidEnPassant { found: String },
    /// Board-placement field did not have exactly 8 ranks.
    InvalidRankCount { found: usize },
    /// A rank in the board-placement field did not sum to exactly 8 files.
    InvalidFileCount { rank: usize, files: usize },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN must have at least 4 fields, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "invalid piece character '{char}' in FEN")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "invalid castling character '{char}' in FEN")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant square '{found}'")
            }
            FenError::InvalidRankCount { found } => {
                write!(f, "board field must have 8 ranks, found {found}")
            }
            FenError::InvalidFileCount { rank, files } => {
                write!(f, "rank {rank} covers {files} files, expected 8")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for UCI move-string parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string had a length other than 4 or 5 characters.
    InvalidLength { len: usize },
    /// One of the two square fields was not valid algebraic notation.
    InvalidSquare { notation: String },
    /// The trailing promotion letter was not one of `n`, `b`, `r`, `q`.
    InvalidPromotion { char: char },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "UCI move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "invalid square in move '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "invalid promotion piece '{char}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Error type for algebraic square parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Rank index was outside 0-7.
    RankOutOfBounds { rank: usize },
    /// File index was outside 0-7.
    FileOutOfBounds { file: usize },
    /// Input was not two characters of the form `[a-h][1-8]`.
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "file {file} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}
