//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! # Example
//! ```
//! use chess_engine::board::prelude::*;
//! ```

pub use super::{
    Board, BoardBuilder, CastlingRights, Color, FenError, Move, MoveList, MoveParseError, Piece,
    PositionHistory, Square, SquareError, UndoInfo,
};
pub use crate::engine::{Engine, SearchResult};
pub use crate::personality::PersonalityParams;
