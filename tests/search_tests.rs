//! Tactical and positional sanity checks for the search itself, independent
//! of the mate-finding and perft coverage in the other integration tests.

use chess_engine::board::Board;
use chess_engine::engine::Engine;

#[test]
fn avoids_hanging_the_queen() {
    // White queen on d1 can capture a pawn on d7 but would be recaptured by
    // the bishop on c8 for nothing in return; the search should prefer a
    // quieter move instead of the losing capture.
    let fen = "rnb1kbnr/pppqpppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    let engine = Engine::initialize();
    let result = engine.search(fen, 1000, 5);
    let mv = result.best_move.expect("a move should be found");
    assert!(
        !(mv.from().to_string() == "d1" && mv.to().to_string() == "d7"),
        "search should not hang the queen with Qxd7??"
    );
}

#[test]
fn captures_a_free_piece() {
    // Black rook on a5 hangs to the white rook on a1 with nothing defending
    // it; the search should take it.
    let fen = "4k3/8/8/r7/8/8/8/R3K3 w - - 0 1";
    let engine = Engine::initialize();
    let result = engine.search(fen, 1000, 5);
    let mv = result.best_move.expect("a move should be found");
    assert_eq!(mv.from().to_string(), "a1");
    assert_eq!(mv.to().to_string(), "a5");
}

#[test]
fn single_legal_move_is_forced() {
    // Black king on h8 is checked along the h-file by the rook on h1; g7 and
    // h7 are covered (by the white king on f6 and the rook respectively), so
    // Kg8 is the only legal reply.
    let fen = "7k/8/8/8/8/5K2/8/7R b - - 0 1";
    let board = Board::from_fen(fen);
    let legal = board.generate_legal_moves();
    assert_eq!(legal.len(), 1, "test position should have exactly one legal move");

    let engine = Engine::initialize();
    let result = engine.search(fen, 500, 3);
    let mv = result.best_move.expect("the only legal move should be found");
    assert_eq!(mv, legal[0]);
}

#[test]
fn no_move_in_checkmate() {
    let fen = "rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 1";
    let engine = Engine::initialize();
    let result = engine.search(fen, 500, 3);
    assert_eq!(result.best_move, None);
}

#[test]
fn draw_by_repetition_is_recognized_mid_search() {
    // Shuffling knights back and forth from the startpos should be playable
    // without the search crashing, returning a legal move once it nears the
    // repeated position.
    let mut board = Board::new();
    let moves = ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6"];
    for uci in moves {
        let mv = board.parse_uci_move(uci).expect("shuffle move should be legal");
        board.make_move(mv);
    }
    let fen = board.to_fen();
    let engine = Engine::initialize();
    let result = engine.search(&fen, 500, 4);
    assert!(result.best_move.is_some());
}

#[test]
fn evaluation_is_symmetric_for_mirrored_material() {
    let balanced = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    assert_eq!(balanced.evaluate(), 0);
}

#[test]
fn material_advantage_is_reflected_in_evaluation() {
    // White is up a full rook with everything else equal.
    let up_a_rook = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
    let level = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    assert!(up_a_rook.evaluate() > level.evaluate());
}

#[test]
fn iterative_deepening_improves_or_holds_the_score_with_depth() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
    let engine = Engine::initialize();
    let shallow = engine.search(fen, 200, 2);
    let deeper = engine.search(fen, 2000, 6);
    assert!(deeper.depth >= shallow.depth);
    assert!(deeper.best_move.is_some());
}

#[test]
fn stalemate_position_returns_no_move_and_zero_score() {
    // Classic stalemate: black king a8 has no legal moves and is not in
    // check.
    let fen = "k7/2Q5/1K6/8/8/8/8/8 b - - 0 1";
    let board = Board::from_fen(fen);
    assert!(board.generate_legal_moves().is_empty());
    assert!(!board.is_in_check(board.side_to_move()));

    let engine = Engine::initialize();
    let result = engine.search(fen, 500, 3);
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, 0);
}

#[test]
fn fifty_move_rule_forces_a_draw_score() {
    let fen = "8/8/8/8/8/8/8/K1k5 w - - 100 1";
    let board = Board::from_fen(fen);
    assert!(board.is_fifty_move_draw());

    let engine = Engine::initialize();
    let result = engine.search(fen, 500, 3);
    assert_eq!(result.score, 0);
}

#[test]
fn finds_a_forced_mate() {
    // Two rooks ladder-mate a lone king; assert the search both finds a
    // move and reports a near-mate score rather than pinning down one exact
    // move order among the several that work.
    let fen = "7k/8/8/8/8/8/7R/R6K w - - 0 1";
    let engine = Engine::initialize();
    let result = engine.search(fen, 3000, 6);
    assert!(result.best_move.is_some());
    assert!(result.score >= chess_engine::search::MATE_THRESHOLD - 4);
}
