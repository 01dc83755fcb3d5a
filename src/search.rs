//! Iterative-deepening alpha-beta search with quiescence, transposition
//! table, null-move pruning, check extension, and mate-distance pruning.
//!
//! The search owns a [`SearchContext`] for the lifetime of one `search()`
//! call: the transposition table persists across calls (passed in by
//! reference), but the killer/history tables and the position-history
//! stack are fresh per call, per spec.md §5.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::board::{Board, Move, PositionHistory};
use crate::ordering::{OrderingContext, MAX_PLY};
use crate::tt::{BoundType, TranspositionTable};

/// A score at or above this magnitude denotes "mate is forced"; the exact
/// distance is `MATE_SCORE - score.abs()` plies.
pub const MATE_SCORE: i32 = 30_000;
/// Threshold used by callers to distinguish mate scores from ordinary
/// evaluations (`MATE_SCORE` minus the deepest ply quiescence can reach).
pub const MATE_THRESHOLD: i32 = MATE_SCORE - MAX_PLY as i32;

/// Null-move reduction.
const NULL_MOVE_REDUCTION: u32 = 2;
const NULL_MOVE_MIN_DEPTH: u32 = 3;
/// Roughly a rook's worth of non-pawn material, below which null-move
/// pruning is skipped to avoid zugzwang blunders.
const NULL_MOVE_MATERIAL_THRESHOLD: i32 = 500;

const QUEEN_VALUE: i32 = 900;
const DELTA_PRUNE_MARGIN: i32 = 200;
const SEE_PRUNE_THRESHOLD: i32 = -100;

/// Stops iterative deepening after this many completed plies even while the
/// clock would otherwise allow more, unless the opening-phase minimum (see
/// [`iterative_deepening`]) requires continuing.
const OPENING_MIN_DEPTH: u32 = 3;

/// The engine's chosen move plus the bookkeeping a caller needs to report
/// it: score, reached depth, node count, elapsed time, and principal
/// variation.
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub depth: u32,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub pv: Vec<Move>,
}

struct SearchContext<'a> {
    tt: &'a mut TranspositionTable,
    ordering: OrderingContext,
    repetition: PositionHistory,
    stop: Arc<AtomicBool>,
    deadline: Instant,
    nodes: u64,
    aborted: bool,
}

impl<'a> SearchContext<'a> {
    fn tt(&mut self) -> &mut TranspositionTable {
        self.tt
    }

    /// Advances the node counter and, periodically, checks the stop flag
    /// and deadline. Returns the (possibly newly set) aborted state.
    fn poll(&mut self) -> bool {
        self.nodes += 1;
        if !self.aborted && self.nodes & 0x7FF == 0 {
            if self.stop.load(Ordering::Relaxed) || Instant::now() >= self.deadline {
                self.aborted = true;
            }
        }
        self.aborted
    }
}

/// Converts a ply-relative mate score (as produced by `alpha_beta` at the
/// current node) into the root/ply-independent form the TT stores, so the
/// same entry means the same mate distance when probed from a different
/// ply later. Non-mate scores pass through unchanged.
fn score_to_tt(score: i32, ply: usize) -> i32 {
    if score > MATE_THRESHOLD {
        score + ply as i32
    } else if score < -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

/// Inverse of [`score_to_tt`]: rebases a stored mate score onto the ply of
/// the probing node.
fn score_from_tt(score: i32, ply: usize) -> i32 {
    if score > MATE_THRESHOLD {
        score - ply as i32
    } else if score < -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

fn non_pawn_material(board: &Board, color: crate::board::Color) -> i32 {
    use crate::board::Piece;
    [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]
        .iter()
        .map(|&p| board.pieces_of(color, p).popcount() as i32 * p.value())
        .sum()
}

/// Negamax alpha-beta search. `ply` is distance from the search root, used
/// for mate-distance pruning and killer-table indexing.
fn alpha_beta(
    board: &mut Board,
    ctx: &mut SearchContext,
    depth: u32,
    ply: usize,
    mut alpha: i32,
    mut beta: i32,
    allow_null: bool,
) -> i32 {
    if ctx.poll() {
        return 0;
    }

    let mate_alpha = -MATE_SCORE + ply as i32;
    let mate_beta = MATE_SCORE - ply as i32;
    alpha = alpha.max(mate_alpha);
    beta = beta.min(mate_beta);
    if alpha >= beta {
        return alpha;
    }

    if board.is_fifty_move_draw() || board.is_insufficient_material() {
        return 0;
    }
    if ctx.repetition.is_threefold(board.hash()) {
        return 0;
    }

    let hash = board.hash();
    let mut tt_move: Option<Move> = None;
    if let Some(entry) = ctx.tt().probe(hash) {
        tt_move = entry.best_move();
        if entry.depth() >= depth {
            let tt_score = score_from_tt(entry.score(), ply);
            match entry.bound_type() {
                BoundType::Exact => return tt_score,
                BoundType::LowerBound => alpha = alpha.max(tt_score),
                BoundType::UpperBound => beta = beta.min(tt_score),
            }
            if alpha >= beta {
                return tt_score;
            }
        }
    }

    if depth == 0 {
        return quiescence(board, ctx, ply, alpha, beta);
    }

    let side = board.side_to_move();
    let in_check = board.is_in_check(side);

    if allow_null
        && !in_check
        && depth >= NULL_MOVE_MIN_DEPTH
        && non_pawn_material(board, side) >= NULL_MOVE_MATERIAL_THRESHOLD
    {
        let prev_ep = board.make_null_move();
        let null_score = -alpha_beta(
            board,
            ctx,
            depth - 1 - NULL_MOVE_REDUCTION,
            ply + 1,
            -beta,
            -beta + 1,
            false,
        );
        board.unmake_null_move(prev_ep);
        if ctx.aborted {
            return 0;
        }
        if null_score >= beta {
            return beta;
        }
    }

    let legal_moves = board.generate_legal_moves();
    if legal_moves.is_empty() {
        return if in_check {
            -MATE_SCORE + ply as i32
        } else {
            0
        };
    }

    let search_depth = if in_check { depth + 1 } else { depth };
    let mut scored = ctx.ordering.score_moves(board, &legal_moves, ply, tt_move);

    let original_alpha = alpha;
    let mut best_score = -MATE_SCORE - 1;
    let mut best_move: Option<Move> = None;

    for i in 0..scored.len() {
        let mv = scored.pick_best(i).expect("i < len").mv;
        let is_quiet = mv.is_quiet();

        let undo = board.make_move(mv);
        ctx.repetition.push(board.hash());
        let score = -alpha_beta(
            board,
            ctx,
            search_depth - 1,
            ply + 1,
            -beta,
            -alpha,
            true,
        );
        ctx.repetition.pop();
        board.unmake_move(mv, undo);

        if ctx.aborted {
            return 0;
        }

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
        if best_score > alpha {
            alpha = best_score;
        }
        if alpha >= beta {
            if is_quiet {
                ctx.ordering.record_killer(ply, mv);
                ctx.ordering.record_history(mv, (depth * depth) as i32);
            }
            break;
        }
    }

    let bound = if best_score <= original_alpha {
        BoundType::UpperBound
    } else if best_score >= beta {
        BoundType::LowerBound
    } else {
        BoundType::Exact
    };
    ctx.tt()
        .store(hash, depth, score_to_tt(best_score, ply), bound, best_move);
    best_score
}

/// Resolves captures/promotions (and, if in check, all evasions) until the
/// position is quiet, per spec.md §4.5.
fn quiescence(board: &mut Board, ctx: &mut SearchContext, ply: usize, mut alpha: i32, beta: i32) -> i32 {
    if ctx.poll() {
        return 0;
    }
    if board.is_fifty_move_draw() || board.is_insufficient_material() {
        return 0;
    }
    if ctx.repetition.is_threefold(board.hash()) {
        return 0;
    }

    let side = board.side_to_move();
    if board.is_in_check(side) {
        let evasions = board.generate_legal_moves();
        if evasions.is_empty() {
            return -MATE_SCORE + ply as i32;
        }
        let mut best = -MATE_SCORE - 1;
        for &mv in evasions.iter() {
            let undo = board.make_move(mv);
            ctx.repetition.push(board.hash());
            let score = -quiescence(board, ctx, ply + 1, -beta, -alpha);
            ctx.repetition.pop();
            board.unmake_move(mv, undo);
            if ctx.aborted {
                return 0;
            }
            if score > best {
                best = score;
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                break;
            }
        }
        return best;
    }

    let stand_pat = board.evaluate();
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }
    if stand_pat + QUEEN_VALUE + DELTA_PRUNE_MARGIN < alpha {
        return alpha;
    }

    let tactical = board.generate_legal_tactical_moves();
    let mut candidates: Vec<(Move, i32)> = Vec::with_capacity(tactical.len());
    for &mv in tactical.iter() {
        let see = if mv.is_capture() {
            board.see(mv.from(), mv.to())
        } else {
            0
        };
        if mv.is_capture() && see < SEE_PRUNE_THRESHOLD {
            continue;
        }
        let promo_bonus = if mv.is_promotion() { 10_000 } else { 0 };
        candidates.push((mv, promo_bonus + see));
    }
    candidates.sort_by_key(|&(_, score)| -score);

    let mut best = stand_pat;
    for (mv, _) in candidates {
        let undo = board.make_move(mv);
        ctx.repetition.push(board.hash());
        let score = -quiescence(board, ctx, ply + 1, -beta, -alpha);
        ctx.repetition.pop();
        board.unmake_move(mv, undo);
        if ctx.aborted {
            return 0;
        }
        if score > best {
            best = score;
        }
        if best > alpha {
            alpha = best;
        }
        if alpha >= beta {
            break;
        }
    }
    best
}

/// Follows best moves from the TT starting at `root`, re-validating
/// legality at each step and stopping on a position repeat so a corrupted
/// or cyclical TT chain cannot produce an unbounded line.
fn reconstruct_pv(root: &Board, tt: &mut TranspositionTable, max_len: usize) -> Vec<Move> {
    let mut pv = Vec::new();
    let mut board = root.clone();
    let mut seen = std::collections::HashSet::new();
    seen.insert(board.hash());

    while pv.len() < max_len {
        let Some(entry) = tt.probe(board.hash()) else {
            break;
        };
        let Some(mv) = entry.best_move() else {
            break;
        };
        if !board.generate_legal_moves().iter().any(|lm| *lm == mv) {
            break;
        }
        board.make_move(mv);
        pv.push(mv);
        if !seen.insert(board.hash()) {
            break;
        }
    }
    pv
}

fn elapsed_ms(start: Instant) -> u64 {
    Instant::now().saturating_duration_since(start).as_millis() as u64
}

/// Runs iterative deepening from `root` up to `max_depth` plies or
/// `max_time_ms` milliseconds, whichever comes first, honoring `stop` as a
/// cooperative abort signal. `persistent_history` seeds the repetition
/// stack with the game line reached before this search root.
#[must_use]
pub fn iterative_deepening(
    root: &Board,
    persistent_history: &PositionHistory,
    tt: &mut TranspositionTable,
    stop: Arc<AtomicBool>,
    max_time_ms: u64,
    max_depth: u32,
) -> SearchResult {
    let start = Instant::now();
    let hard_time = max_time_ms.max(1);
    let soft_time = (hard_time * 9) / 10;
    let hard_deadline = start + Duration::from_millis(hard_time);
    let soft_deadline = start + Duration::from_millis(soft_time);

    let mut working = root.clone();
    let root_legal = working.generate_legal_moves();

    if root_legal.is_empty() {
        let score = if working.is_in_check(working.side_to_move()) {
            -MATE_SCORE
        } else {
            0
        };
        return SearchResult {
            best_move: None,
            score,
            depth: 0,
            nodes: 0,
            elapsed_ms: elapsed_ms(start),
            pv: Vec::new(),
        };
    }

    let mut ctx = SearchContext {
        tt,
        ordering: OrderingContext::new(),
        repetition: persistent_history.clone(),
        stop,
        deadline: hard_deadline,
        nodes: 0,
        aborted: false,
    };

    let mut result = SearchResult {
        best_move: root_legal.first(),
        score: 0,
        depth: 0,
        nodes: 0,
        elapsed_ms: 0,
        pv: Vec::new(),
    };

    for depth in 1..=max_depth.max(1) {
        if depth > 1 && result.depth >= OPENING_MIN_DEPTH && Instant::now() >= soft_deadline {
            break;
        }

        let score = alpha_beta(&mut working, &mut ctx, depth, 0, -MATE_SCORE, MATE_SCORE, true);
        if ctx.aborted {
            break;
        }

        result.score = score;
        result.depth = depth;
        if let Some(entry) = ctx.tt().probe(working.hash()) {
            if let Some(mv) = entry.best_move() {
                result.best_move = Some(mv);
            }
        }

        #[cfg(feature = "logging")]
        log::debug!(
            "depth {depth} score {score} nodes {} elapsed_ms {}",
            ctx.nodes,
            elapsed_ms(start)
        );
    }

    result.nodes = ctx.nodes;
    result.elapsed_ms = elapsed_ms(start);
    result.pv = reconstruct_pv(&working, ctx.tt(), MAX_PLY);
    result
}
