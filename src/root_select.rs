//! Human-like move selection at the search root.
//!
//! Ordinary play always takes the search's own best move. When
//! [`PersonalityParams::human_select`] is set, the root move is instead
//! sampled from a pool of near-best candidates, weighted by eval and a
//! handful of style biases, so the engine can imitate the kind of
//! imperfect-but-plausible choices a human of a given style would make
//! without ever blundering outright (the hard floor and opening-sanity
//! guardrails exist specifically to prevent that).

use crate::board::{Board, Color, Move, Piece};
use crate::personality::PersonalityParams;
use crate::rng::Rng;
use crate::search::SearchResult;

/// Plies before move 12 (24 half-moves is deep into the middlegame; 12
/// plies is the opening proper) get extra scrutiny against rim-knight and
/// rook-pawn pushes that strong engines favor but humans rarely play.
const OPENING_PLY_LIMIT: u32 = 12;

struct Candidate {
    mv: Move,
    eval_cp: i32,
    is_capture: bool,
    is_losing_capture: bool,
}

fn ply_count(board: &Board) -> u32 {
    let base = (board.fullmove_number().saturating_sub(1)) * 2;
    base + u32::from(board.side_to_move() == Color::Black)
}

fn is_opening_suspicious(board: &Board, mv: Move) -> bool {
    match board.piece_at(mv.from()) {
        Some((_, Piece::Knight)) => mv.to().file() == 0 || mv.to().file() == 7,
        Some((_, Piece::Pawn)) => {
            !mv.is_double_pawn_push() && (mv.from().file() == 0 || mv.from().file() == 7)
        }
        _ => false,
    }
}

/// Builds one candidate per legal root move, evaluating the resulting
/// position with a real [`Board::apply_move`] rather than a partial board
/// edit, per spec.md's eval-must-use-real-apply-move requirement.
fn build_candidates(board: &Board) -> Vec<Candidate> {
    board
        .generate_legal_moves()
        .iter()
        .map(|&mv| {
            let after = board.apply_move(mv);
            let eval_cp = -after.evaluate();
            let is_capture = mv.is_capture();
            let is_losing_capture = is_capture && board.see(mv.from(), mv.to()) < 0;
            Candidate {
                mv,
                eval_cp,
                is_capture,
                is_losing_capture,
            }
        })
        .collect()
}

/// Chooses the root move to play. Falls back to `search_result.best_move`
/// (or, failing that, the first legal move) whenever human selection is
/// disabled, finds no eligible candidate, or would otherwise pick an
/// illegal move.
#[must_use]
pub fn select_root_move(
    board: &Board,
    search_result: &SearchResult,
    params: &PersonalityParams,
    rng: &mut Rng,
) -> Option<Move> {
    let legal = board.generate_legal_moves();
    let fallback = search_result.best_move.or_else(|| legal.first());
    let Some(fallback) = fallback else {
        return None;
    };
    if !params.human_select {
        return Some(fallback);
    }

    let mut candidates = build_candidates(board);
    if candidates.is_empty() {
        return Some(fallback);
    }
    candidates.sort_by(|a, b| b.eval_cp.cmp(&a.eval_cp));
    let best_eval = candidates[0].eval_cp;

    // Hard floor: never consider a move that loses more than this many
    // centipawns relative to the best, regardless of style biases.
    candidates.retain(|c| best_eval - c.eval_cp <= params.human_hard_floor_cp);
    if candidates.is_empty() {
        #[cfg(feature = "logging")]
        log::trace!("root_select: hard floor rejected all candidates, falling back to search best");
        return Some(fallback);
    }

    // Opening sanity: in the first dozen plies, penalize rim-knight and
    // rook-pawn moves (unless they're also the engine's own best move)
    // rather than eliminating them outright, then re-sort on the adjusted
    // evals.
    if ply_count(board) < OPENING_PLY_LIMIT && params.human_opening_sanity > 0 {
        let engine_best_move = candidates[0].mv;
        let penalty = 5 * params.human_opening_sanity as i32;
        let mut penalized = 0;
        for c in candidates.iter_mut() {
            if c.mv != engine_best_move && is_opening_suspicious(board, c.mv) {
                c.eval_cp -= penalty;
                penalized += 1;
            }
        }
        if penalized > 0 {
            candidates.sort_by(|a, b| b.eval_cp.cmp(&a.eval_cp));
            #[cfg(feature = "logging")]
            log::trace!("root_select: opening sanity penalized {penalized} candidate(s)");
        }
    }

    // Top-K: an explicit override takes precedence over the general cap.
    let cap = if params.human_topk_override > 0 {
        params.human_topk_override as usize
    } else {
        params.candidate_moves_max as usize
    };
    if candidates.len() > cap {
        let before = candidates.len();
        candidates.truncate(cap);
        #[cfg(feature = "logging")]
        log::trace!("root_select: top-K truncated {} candidate(s)", before - candidates.len());
    }

    // Margin filter: drop anything outside the configured eval window
    // (tighter than the hard floor; this is the "normal" cutoff).
    candidates.retain(|c| best_eval - c.eval_cp <= params.candidate_margin_cp);
    if candidates.is_empty() {
        return Some(fallback);
    }

    let chosen = weighted_sample(board, &candidates, best_eval, params, rng);
    if legal.iter().any(|lm| *lm == chosen) {
        Some(chosen)
    } else {
        Some(fallback)
    }
}

/// Temperature 0 means deterministic: always the top-weighted candidate.
/// Otherwise `candidate_weight` already bakes the temperature into its
/// softmax base, so the weights are used directly for a seeded cumulative
/// draw.
fn weighted_sample(
    board: &Board,
    candidates: &[Candidate],
    best_eval: i32,
    params: &PersonalityParams,
    rng: &mut Rng,
) -> Move {
    let weights: Vec<f64> = candidates
        .iter()
        .map(|c| candidate_weight(board, c, best_eval, params, rng))
        .collect();

    if params.human_temperature == 0 {
        return candidates[argmax(&weights)].mv;
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return candidates[argmax(&weights)].mv;
    }

    let draw = rng.next_f64() * total;
    let mut cumulative = 0.0;
    for (candidate, w) in candidates.iter().zip(weights.iter()) {
        cumulative += w;
        if draw <= cumulative {
            return candidate.mv;
        }
    }
    candidates.last().expect("candidates is non-empty").mv
}

fn argmax(weights: &[f64]) -> usize {
    weights
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Base weight is the softmax `exp((score - best) / 100 / (T + 0.01))`,
/// multiplied by `exp(n_i)` seeded noise and then by the style-bias factors
/// spec.md §4.7 pins: `RiskAppetite` (applied whenever the candidate trails
/// the best) and `SimplicityBias` (applied only once the candidate trails
/// by more than 50cp). `SacrificeBias`/`TradeBias` stay simple percentage
/// multipliers, per the Open Question in DESIGN.md.
fn candidate_weight(
    board: &Board,
    candidate: &Candidate,
    best_eval: i32,
    params: &PersonalityParams,
    rng: &mut Rng,
) -> f64 {
    let temperature = params.human_temperature as f64 / 100.0;
    let score_gap = (candidate.eval_cp - best_eval) as f64 / 100.0;
    let base = (score_gap / (temperature + 0.01)).exp();

    let noise_cp = rng.gen_range_i32(-params.human_noise_cp, params.human_noise_cp) as f64;
    let noise = (noise_cp / 100.0).exp();

    let mut weight = base * noise;

    if candidate.eval_cp < best_eval {
        let risk_appetite = params.risk_appetite as f64;
        weight *= if risk_appetite > 100.0 {
            1.0 + 0.3 * (risk_appetite - 100.0) / 100.0
        } else {
            1.0 - 0.5 * (100.0 - risk_appetite) / 100.0
        };
    }
    if candidate.eval_cp < best_eval - 50 {
        let simplicity_bias = params.simplicity_bias as f64;
        weight *= 1.0 - 0.3 * (simplicity_bias - 100.0) / 100.0;
    }
    if candidate.is_losing_capture {
        weight *= params.sacrifice_bias as f64 / 100.0;
    }
    if candidate.is_capture {
        weight *= params.trade_bias as f64 / 100.0;
    }

    let _ = board;
    weight.max(1e-9)
}
