//! Chess board representation and game logic.
//!
//! Uses bitboards for efficient move generation and position evaluation.
//! Supports full chess rules including castling, en passant, and promotions.
//!
//! # Example
//! ```
//! use chess_engine::board::{Board, Color, Piece};
//!
//! let board = Board::new();
//! let moves = board.generate_legal_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! ```

mod attack_tables;
mod builder;
mod error;
mod eval;
mod fen;
mod history;
mod make_unmake;
mod movegen;
pub mod prelude;
mod see;
mod state;
mod types;
mod zobrist;

// Public API - types users need
pub use builder::BoardBuilder;
pub use error::{FenError, MoveParseError, SquareError};
pub use history::PositionHistory;
pub use make_unmake::UndoInfo;
pub use state::Board;
pub use types::{Bitboard, CastlingRights, Color, Move, MoveList, MoveListIntoIter, Piece, Square};

pub(crate) use types::{
    bit_for_square, castle_bit, file_to_index, rank_to_index,
    CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K,
    CASTLE_WHITE_Q, EMPTY_MOVE, MAX_PLY, PROMOTION_PIECES, ScoredMoveList,
};
