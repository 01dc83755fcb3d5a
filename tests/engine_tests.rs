//! End-to-end tests against the `Engine` surface.

use chess_engine::engine::Engine;
use chess_engine::personality::PersonalityParams;

const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[test]
fn search_returns_legal_move_at_shallow_depth() {
    let engine = Engine::initialize();
    let result = engine.search(STARTPOS, 1000, 2);
    assert!(result.best_move.is_some());
    assert!(result.depth >= 1);
}

#[test]
fn search_within_time_budget_does_not_hang() {
    let engine = Engine::initialize();
    let start = std::time::Instant::now();
    let result = engine.search(STARTPOS, 200, 64);
    assert!(start.elapsed().as_millis() < 2000);
    assert!(result.best_move.is_some());
}

#[test]
fn malformed_fen_yields_no_move() {
    let engine = Engine::initialize();
    let result = engine.search("this is not a fen", 100, 2);
    assert_eq!(result.best_move, None);
}

#[test]
fn checkmate_position_yields_no_move_and_mate_score() {
    let engine = Engine::initialize();
    let result = engine.search(
        "rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 1",
        500,
        3,
    );
    assert_eq!(result.best_move, None);
    assert!(result.score <= -chess_engine::search::MATE_THRESHOLD);
}

#[test]
fn apply_uci_move_then_search_from_resulting_fen() {
    let engine = Engine::initialize();
    let after_e4 = engine.apply_uci_move(STARTPOS, "e2e4");
    assert_ne!(after_e4, STARTPOS);
    let result = engine.search(&after_e4, 500, 3);
    assert!(result.best_move.is_some());
}

#[test]
fn set_depth_limit_caps_search() {
    let engine = Engine::initialize();
    engine.set_depth_limit(1);
    let result = engine.search(STARTPOS, 5000, 10);
    assert!(result.depth <= 1);
}

#[test]
fn hash_resize_does_not_break_subsequent_search() {
    let engine = Engine::initialize();
    engine.set_hash_size(1);
    let result = engine.search(STARTPOS, 500, 3);
    assert!(result.best_move.is_some());
}

#[test]
fn human_select_with_zero_temperature_is_deterministic() {
    let engine = Engine::initialize();
    engine.set_personality(PersonalityParams {
        human_select: true,
        human_temperature: 0,
        human_hard_floor_cp: 200,
        random_seed: 42,
        ..PersonalityParams::default()
    });

    let first = engine.search(STARTPOS, 300, 4).best_move;
    engine.set_personality(PersonalityParams {
        human_select: true,
        human_temperature: 0,
        human_hard_floor_cp: 200,
        random_seed: 42,
        ..PersonalityParams::default()
    });
    let second = engine.search(STARTPOS, 300, 4).best_move;

    assert_eq!(first, second);
}

#[test]
fn stop_before_search_is_harmless() {
    let engine = Engine::initialize();
    engine.stop();
    let result = engine.search(STARTPOS, 300, 3);
    assert!(result.best_move.is_some());
}
