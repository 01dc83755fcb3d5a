//! Converts a UCI clock (remaining time plus increment) into the single
//! `max_time_ms` budget that [`crate::engine::Engine::search`] expects.
//!
//! This is a pure calculation with no threads or timers of its own —
//! [`crate::search::iterative_deepening`] does its own deadline polling
//! once it has a millisecond budget to work with.

use std::time::Duration;

/// Plies before this point are treated as the opening phase and get a
/// larger time allowance, since early moves are cheap to get right but
/// costly to rush.
const OPENING_PLY_LIMIT: u32 = 20;
const OPENING_PHASE_MULTIPLIER: f64 = 1.3;

const MIN_BUDGET_MS: u64 = 50;
const MAX_BUDGET_MS: u64 = 30_000;

/// Computes a move-time budget in milliseconds from the remaining clock,
/// increment, and current ply, per spec.md §4.8:
/// `clock / 30 + 1.5 * increment`, bounded to
/// `[max(clock / 40, 50ms), min(clock / 8, 30s)]`, scaled up in the
/// opening phase.
#[must_use]
pub fn compute_budget_ms(clock: Duration, increment: Duration, ply: u32) -> u64 {
    let clock_ms = clock.as_millis() as f64;
    let inc_ms = increment.as_millis() as f64;

    let mut budget = clock_ms / 30.0 + 1.5 * inc_ms;
    if ply < OPENING_PLY_LIMIT {
        budget *= OPENING_PHASE_MULTIPLIER;
    }

    let lower = (clock_ms / 40.0).max(MIN_BUDGET_MS as f64);
    let upper = (clock_ms / 8.0).min(MAX_BUDGET_MS as f64).max(lower);
    budget.clamp(lower, upper) as u64
}
