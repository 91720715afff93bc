use std::ops::{Deref, DerefMut};

use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;

/// Single undo record for `Board::apply` / `Board::undo`.
///
/// Only the board that produced it can consume it, and only while it is the
/// most recent outstanding apply.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an UndoState must be handed back to Board::undo"]
pub struct UndoState {
    pub(crate) mv: Move,
    pub(crate) moved_piece: Piece,
    pub(crate) captured: Option<(Square, Piece)>,

    pub(crate) prev_castling_rights: CastlingRights,
    pub(crate) prev_en_passant_square: Option<Square>,
    pub(crate) prev_halfmove_clock: u16,
    pub(crate) prev_fullmove_number: u16,

    pub(crate) prev_zobrist_key: u64,

    // Board ply right after the apply that produced this token.
    pub(crate) ply: u32,
}

impl UndoState {
    #[inline]
    pub fn mv(&self) -> Move {
        self.mv
    }

    #[inline]
    pub fn moved_piece(&self) -> Piece {
        self.moved_piece
    }

    /// Captured piece and the square it stood on (differs from `mv.to` for
    /// en passant).
    #[inline]
    pub fn captured(&self) -> Option<(Square, Piece)> {
        self.captured
    }
}

/// A move applied to a board for the lifetime of the guard.
///
/// Dropping the guard undoes the move. The mutable borrow keeps the board
/// from being touched except through the guard, so nested guards unwind in
/// LIFO order.
pub struct ScopedMove<'a> {
    board: &'a mut Board,
    undo: Option<UndoState>,
}

impl<'a> ScopedMove<'a> {
    pub(crate) fn new(board: &'a mut Board, undo: UndoState) -> Self {
        Self {
            board,
            undo: Some(undo),
        }
    }

    pub fn applied_move(&self) -> Option<Move> {
        self.undo.as_ref().map(UndoState::mv)
    }
}

impl Deref for ScopedMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for ScopedMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for ScopedMove<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            if let Err(err) = self.board.undo(undo) {
                log::error!("scoped move could not be undone: {err}");
                debug_assert!(false, "scoped move could not be undone: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::game_state::chess_types::*;
    use crate::moves::move_descriptions::{Move, MoveFlag};

    fn sq(row: u8, col: u8) -> Square {
        Square::from_row_col(row, col).expect("test square on board")
    }

    #[test]
    fn scoped_move_undoes_on_drop() {
        let mut board = Board::new();
        let before = board.clone();
        {
            let guard = board
                .scoped(Move::with_flag(sq(6, 4), sq(4, 4), MoveFlag::DoublePawnPush))
                .expect("e2e4 applies");
            assert_eq!(guard.side_to_move(), Color::Black);
            assert_eq!(guard.en_passant_square(), Some(sq(5, 4)));
            assert_eq!(guard.applied_move().map(|mv| mv.to), Some(sq(4, 4)));
        }
        assert_eq!(board, before);
    }

    #[test]
    fn nested_scoped_moves_unwind_in_order() {
        let mut board = Board::new();
        let before = board.clone();
        {
            let mut outer = board
                .scoped(Move::new(sq(7, 6), sq(5, 5)))
                .expect("Ng1f3 applies");
            {
                let inner = outer
                    .scoped(Move::new(sq(0, 6), sq(2, 5)))
                    .expect("Ng8f6 applies");
                assert_eq!(inner.fullmove_number(), 2);
                assert_eq!(inner.halfmove_clock(), 2);
            }
            assert_eq!(outer.side_to_move(), Color::Black);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn undo_token_reports_capture_square() {
        let mut board = Board::from_fen("4k3/8/8/3Pp3/8/8/8/4K3 w - e6 0 1").expect("FEN");
        let undo = board
            .apply(Move::with_flag(sq(3, 3), sq(2, 4), MoveFlag::EnPassant))
            .expect("en passant applies");
        assert_eq!(
            undo.captured(),
            Some((sq(3, 4), Piece::new(Color::Black, PieceKind::Pawn)))
        );
        board.undo(undo).expect("undo succeeds");
    }
}
