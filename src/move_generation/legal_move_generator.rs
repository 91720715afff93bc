//! Full legal move generation pipeline.
//!
//! Orchestrates piece-wise pseudo-legal generation, then applies each
//! candidate in place and drops the ones that leave the mover's king
//! attacked. The board is restored before returning.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::moves::move_descriptions::Move;

/// Every move that follows piece movement rules, ignoring self-check.
pub fn generate_pseudo_legal_moves(board: &Board) -> Vec<Move> {
    let mut pseudo = Vec::<Move>::with_capacity(128);

    generate_pawn_moves(board, &mut pseudo);
    generate_knight_moves(board, &mut pseudo);
    generate_bishop_moves(board, &mut pseudo);
    generate_rook_moves(board, &mut pseudo);
    generate_queen_moves(board, &mut pseudo);
    generate_king_moves(board, &mut pseudo);

    pseudo
}

/// Legal moves for the side to move, in generation order.
pub fn generate_legal_moves(board: &mut Board) -> ChessResult<Vec<Move>> {
    let mover = board.side_to_move();
    let pseudo = generate_pseudo_legal_moves(board);

    let mut legal = Vec::<Move>::with_capacity(pseudo.len());
    for mv in pseudo {
        let undo = board.apply(mv)?;
        // Illegal if own king is in check after move.
        let leaves_king_attacked = is_king_in_check(board, mover);
        board.undo(undo)?;

        if !leaves_king_attacked {
            legal.push(mv);
        }
    }

    Ok(legal)
}
