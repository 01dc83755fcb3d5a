//! Mate-in-one and short forced-mate scenarios, searched end to end.

use chess_engine::engine::Engine;
use chess_engine::search::MATE_THRESHOLD;

struct MateCase {
    name: &'static str,
    fen: &'static str,
    expected_uci: &'static str,
}

const MATE_IN_ONE_CASES: &[MateCase] = &[
    MateCase {
        name: "back rank mate",
        fen: "6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1",
        expected_uci: "e1e8",
    },
    MateCase {
        name: "scholar's mate finish",
        fen: "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 0 4",
        expected_uci: "h5f7",
    },
    MateCase {
        name: "back rank mate for black",
        fen: "k3q3/8/8/8/8/8/5PPP/7K b - - 0 1",
        expected_uci: "e8e1",
    },
];

#[test]
fn finds_mate_in_one() {
    let engine = Engine::initialize();
    for case in MATE_IN_ONE_CASES {
        let result = engine.search(case.fen, 2000, 4);
        let mv = result
            .best_move
            .unwrap_or_else(|| panic!("{}: should find a move", case.name));
        assert_eq!(
            mv.to_string(),
            case.expected_uci,
            "{}: expected {} got {}",
            case.name,
            case.expected_uci,
            mv
        );
        assert!(
            result.score >= MATE_THRESHOLD,
            "{}: mate score expected, got {}",
            case.name,
            result.score
        );
    }
}

#[test]
fn finds_mate_in_one_via_apply_uci_move_confirms_checkmate() {
    let engine = Engine::initialize();
    for case in MATE_IN_ONE_CASES {
        let result = engine.search(case.fen, 2000, 4);
        let mv = result.best_move.expect("mate move should be found");
        let after_fen = engine.apply_uci_move(case.fen, &mv.to_string());

        let board = chess_engine::board::Board::from_fen(&after_fen);
        assert!(
            board.generate_legal_moves().is_empty() && board.is_in_check(board.side_to_move()),
            "{}: resulting position should be checkmate",
            case.name
        );
    }
}
