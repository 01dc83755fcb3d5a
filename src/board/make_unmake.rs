//! Make/unmake move application.
//!
//! `make_move` mutates the board in place and returns an `UndoInfo` capturing
//! everything needed to reverse it; `unmake_move` consumes that `UndoInfo` to
//! restore the prior position exactly. `apply_move` is a functional
//! convenience wrapper (clone, make, return) for call sites — move
//! generation's legality filter, root candidate evaluation — that want an
//! immutable position rather than a mutation to undo.

use super::types::{CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K, CASTLE_WHITE_Q};
use super::zobrist::{castling_key, ZOBRIST};
use super::{Board, Color, Move, Piece, Square};

/// Everything `make_move` destroyed that `unmake_move` needs back.
#[derive(Clone, Copy, Debug)]
pub struct UndoInfo {
    captured: Option<(Color, Piece)>,
    castling_rights: u8,
    en_passant_target: Option<Square>,
    halfmove_clock: u32,
    hash: u64,
}

fn corner_rook_right(square: Square) -> Option<u8> {
    match (square.rank(), square.file()) {
        (0, 0) => Some(CASTLE_WHITE_Q),
        (0, 7) => Some(CASTLE_WHITE_K),
        (7, 0) => Some(CASTLE_BLACK_Q),
        (7, 7) => Some(CASTLE_BLACK_K),
        _ => None,
    }
}

impl Board {
    /// Apply `mv`, mutating `self` in place, and return the information
    /// needed to undo it.
    pub fn make_move(&mut self, mv: Move) -> UndoInfo {
        let mut undo = UndoInfo {
            captured: None,
            castling_rights: self.castling_rights,
            en_passant_target: self.en_passant_target,
            halfmove_clock: self.halfmove_clock,
            hash: self.hash,
        };

        let mover_color = self.side_to_move;
        let from = mv.from();
        let to = mv.to();
        let (_, moving_piece) = self.remove_piece(from).expect("make_move: empty `from` square");
        self.hash ^= ZOBRIST.piece_square[mover_color.index()][moving_piece.index()][from.as_index()];

        let is_pawn_move = moving_piece == Piece::Pawn;
        let mut is_capture = false;

        // XOR out the castling term once, before anything below mutates
        // `castling_rights`; it's XORed back in once, after every mutation
        // (capture of a corner rook, king move, rook move) has been applied.
        self.hash ^= castling_key(self.castling_rights);

        if mv.is_en_passant() {
            let captured_square = Square::new(from.rank(), to.file());
            let (cap_color, cap_piece) = self
                .remove_piece(captured_square)
                .expect("make_move: en passant target square is empty");
            self.hash ^=
                ZOBRIST.piece_square[cap_color.index()][cap_piece.index()][captured_square.as_index()];
            undo.captured = Some((cap_color, cap_piece));
            is_capture = true;
        } else if let Some((cap_color, cap_piece)) = self.remove_piece(to) {
            self.hash ^= ZOBRIST.piece_square[cap_color.index()][cap_piece.index()][to.as_index()];
            undo.captured = Some((cap_color, cap_piece));
            is_capture = true;
            if let Some(right) = corner_rook_right(to) {
                self.castling_rights &= !right;
            }
        }

        let placed_piece = mv.promotion().unwrap_or(moving_piece);
        self.set_piece(to, mover_color, placed_piece);
        self.hash ^= ZOBRIST.piece_square[mover_color.index()][placed_piece.index()][to.as_index()];

        if mv.is_castle_kingside() || mv.is_castle_queenside() {
            let rank = from.rank();
            let (rook_from, rook_to) = if mv.is_castle_kingside() {
                (Square::new(rank, 7), Square::new(rank, 5))
            } else {
                (Square::new(rank, 0), Square::new(rank, 3))
            };
            self.remove_piece(rook_from);
            self.set_piece(rook_to, mover_color, Piece::Rook);
            self.hash ^= ZOBRIST.piece_square[mover_color.index()][Piece::Rook.index()][rook_from.as_index()];
            self.hash ^= ZOBRIST.piece_square[mover_color.index()][Piece::Rook.index()][rook_to.as_index()];
        }

        if moving_piece == Piece::King {
            let king_rights = match mover_color {
                Color::White => CASTLE_WHITE_K | CASTLE_WHITE_Q,
                Color::Black => CASTLE_BLACK_K | CASTLE_BLACK_Q,
            };
            self.castling_rights &= !king_rights;
        }
        if let Some(right) = corner_rook_right(from) {
            self.castling_rights &= !right;
        }
        self.hash ^= castling_key(self.castling_rights);

        if let Some(ep) = self.en_passant_target {
            self.hash ^= ZOBRIST.en_passant_file[ep.file()];
        }
        self.en_passant_target = if mv.is_double_pawn_push() {
            Some(Square::new((from.rank() + to.rank()) / 2, from.file()))
        } else {
            None
        };
        if let Some(ep) = self.en_passant_target {
            self.hash ^= ZOBRIST.en_passant_file[ep.file()];
        }

        self.halfmove_clock = if is_pawn_move || is_capture || mv.is_castling() {
            0
        } else {
            self.halfmove_clock + 1
        };

        if mover_color == Color::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = mover_color.opponent();
        self.hash ^= ZOBRIST.side_to_move;

        undo
    }

    /// Reverse a `make_move` call, restoring the board to the position it
    /// held before `mv` was made.
    ///
    /// # Panics
    /// Panics if `mv` does not match the most recent `make_move` call.
    pub fn unmake_move(&mut self, mv: Move, undo: UndoInfo) {
        let mover_color = self.side_to_move.opponent();
        self.side_to_move = mover_color;

        let from = mv.from();
        let to = mv.to();
        let (_, placed_piece) = self.remove_piece(to).expect("unmake_move: `to` square is empty");
        let original_piece = if mv.is_promotion() { Piece::Pawn } else { placed_piece };
        self.set_piece(from, mover_color, original_piece);

        if mv.is_castle_kingside() || mv.is_castle_queenside() {
            let rank = from.rank();
            let (rook_from, rook_to) = if mv.is_castle_kingside() {
                (Square::new(rank, 7), Square::new(rank, 5))
            } else {
                (Square::new(rank, 0), Square::new(rank, 3))
            };
            self.remove_piece(rook_to);
            self.set_piece(rook_from, mover_color, Piece::Rook);
        }

        if mv.is_en_passant() {
            let captured_square = Square::new(from.rank(), to.file());
            if let Some((cap_color, cap_piece)) = undo.captured {
                self.set_piece(captured_square, cap_color, cap_piece);
            }
        } else if let Some((cap_color, cap_piece)) = undo.captured {
            self.set_piece(to, cap_color, cap_piece);
        }

        self.castling_rights = undo.castling_rights;
        self.en_passant_target = undo.en_passant_target;
        self.halfmove_clock = undo.halfmove_clock;
        if mover_color == Color::Black {
            self.fullmove_number -= 1;
        }
        self.hash = undo.hash;
    }

    /// A "null move": pass the turn without moving, used by null-move
    /// pruning. Toggles side to move and clears en passant; nothing else
    /// changes. Returns the previous en-passant target so it can be
    /// restored by `unmake_null_move`.
    pub fn make_null_move(&mut self) -> Option<Square> {
        let previous_ep = self.en_passant_target;
        if let Some(ep) = previous_ep {
            self.hash ^= ZOBRIST.en_passant_file[ep.file()];
        }
        self.en_passant_target = None;
        self.side_to_move = self.side_to_move.opponent();
        self.hash ^= ZOBRIST.side_to_move;
        previous_ep
    }

    pub fn unmake_null_move(&mut self, previous_ep: Option<Square>) {
        self.side_to_move = self.side_to_move.opponent();
        self.hash ^= ZOBRIST.side_to_move;
        if let Some(ep) = previous_ep {
            self.hash ^= ZOBRIST.en_passant_file[ep.file()];
        }
        self.en_passant_target = previous_ep;
    }

    /// Functional move application: clone, make, return. Convenient where
    /// callers want an immutable successor position rather than an
    /// in-place mutation paired with an explicit undo.
    #[must_use]
    pub fn apply_move(&self, mv: Move) -> Board {
        let mut next = self.clone();
        next.make_move(mv);
        next
    }
}
