//! A bitboard chess engine: move generation, search, evaluation, and a
//! human-like move-selection layer, exposed through [`engine::Engine`].

pub mod board;
pub mod engine;
pub mod ordering;
pub mod personality;
pub mod rng;
pub mod root_select;
pub mod search;
pub mod time_manager;
pub mod tt;
