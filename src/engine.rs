//! The engine's external surface: a single `Engine` value that owns the
//! transposition table, game history, and personality configuration, and
//! exposes the handful of entry points callers (UCI loop, tests, embedders)
//! need.
//!
//! Not internally threaded: `search()` runs to completion on the caller's
//! thread. The mutable state still sits behind a `parking_lot::Mutex` so a
//! second thread holding a shared reference can call `stop()` while a
//! search is in flight, matching the teacher's `EngineController` shape
//! without its thread/ponder/SMP machinery (out of scope here).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::board::{Board, PositionHistory};
use crate::personality::PersonalityParams;
use crate::rng::Rng;
use crate::root_select;
use crate::tt::TranspositionTable;

pub use crate::search::SearchResult;

const DEFAULT_TT_MB: usize = 64;
const DEFAULT_DEPTH_LIMIT: u32 = 64;

struct EngineState {
    tt: TranspositionTable,
    history: PositionHistory,
    personality: PersonalityParams,
    depth_limit: u32,
    rng: Rng,
}

/// The engine. Cheap to construct, expensive to discard (the transposition
/// table is the bulk of its memory); callers typically keep one instance
/// alive for an entire game.
pub struct Engine {
    state: Mutex<EngineState>,
    stop: Arc<AtomicBool>,
}

impl Engine {
    /// Creates a new engine with `tt_mb` megabytes of transposition table
    /// and default personality parameters (pure best-move play).
    #[must_use]
    pub fn new(tt_mb: usize) -> Self {
        Engine {
            state: Mutex::new(EngineState {
                tt: TranspositionTable::new(tt_mb),
                history: PositionHistory::new(),
                personality: PersonalityParams::default(),
                depth_limit: DEFAULT_DEPTH_LIMIT,
                rng: Rng::new(PersonalityParams::default().random_seed),
            }),
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates a new engine with the default transposition table size.
    #[must_use]
    pub fn initialize() -> Self {
        Self::new(DEFAULT_TT_MB)
    }

    /// Searches `start_fen` for up to `max_time_ms` milliseconds or
    /// `max_depth` plies, whichever comes first. A malformed FEN, or a
    /// position with no legal moves, returns a result with `best_move:
    /// None` rather than erroring, per spec.md §7.
    pub fn search(&self, start_fen: &str, max_time_ms: u64, max_depth: u32) -> SearchResult {
        self.stop.store(false, Ordering::Relaxed);

        let Ok(board) = Board::try_from_fen(start_fen) else {
            return SearchResult {
                best_move: None,
                score: 0,
                depth: 0,
                nodes: 0,
                elapsed_ms: 0,
                pv: Vec::new(),
            };
        };

        let mut state = self.state.lock();
        let EngineState {
            ref mut tt,
            ref history,
            ref personality,
            ref mut rng,
            depth_limit,
            ..
        } = *state;
        let depth = max_depth.min(depth_limit).max(1);
        let mut result = crate::search::iterative_deepening(
            &board,
            history,
            tt,
            Arc::clone(&self.stop),
            max_time_ms,
            depth,
        );

        if personality.human_select {
            if let Some(mv) = root_select::select_root_move(&board, &result, personality, rng) {
                result.best_move = Some(mv);
            }
        }

        result
    }

    /// Applies a single UCI move string to `fen` and returns the resulting
    /// FEN. An illegal move or malformed input returns `fen` unchanged.
    #[must_use]
    pub fn apply_uci_move(&self, fen: &str, uci: &str) -> String {
        let Ok(mut board) = Board::try_from_fen(fen) else {
            return fen.to_string();
        };
        match board.parse_uci_move(uci) {
            Ok(mv) => {
                board.make_move(mv);
                board.to_fen()
            }
            Err(_) => fen.to_string(),
        }
    }

    /// Signals an in-flight `search()` call (on another thread) to return
    /// its best completed-depth result as soon as possible.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Resizes the transposition table, discarding its current contents.
    pub fn set_hash_size(&self, mb: usize) {
        self.state.lock().tt = TranspositionTable::new(mb);
    }

    /// No-op: this engine is single-threaded by design (see module docs).
    /// Accepted for UCI-option compatibility with multi-threaded engines.
    pub fn set_threads(&self, _threads: usize) {}

    /// Caps the depth `search()` will reach, independent of whatever depth
    /// a given call requests.
    pub fn set_depth_limit(&self, depth: u32) {
        self.state.lock().depth_limit = depth.max(1);
    }

    /// Replaces the personality configuration used by human-like move
    /// selection. Out-of-range fields are clamped into bounds first.
    pub fn set_personality(&self, params: PersonalityParams) {
        let mut state = self.state.lock();
        state.rng = Rng::new(params.random_seed);
        state.personality = params.clamp();
    }

    /// Records a position as having occurred earlier in the game, so the
    /// next `search()` call's repetition detection accounts for it.
    pub fn push_game_history(&self, hash: u64) {
        self.state.lock().history.push(hash);
    }

    /// Clears the recorded game history (e.g. on `ucinewgame`).
    pub fn reset_game_history(&self) {
        self.state.lock().history = PositionHistory::new();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::initialize()
    }
}
