use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::generate_piece_moves;
use crate::moves::move_descriptions::Move;
use crate::moves::rook_moves::rook_attacks;

pub fn generate_rook_moves(board: &Board, out: &mut Vec<Move>) {
    generate_piece_moves(board, PieceKind::Rook, rook_attacks, out);
}
