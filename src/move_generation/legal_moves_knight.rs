use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::generate_piece_moves;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::move_descriptions::Move;

pub fn generate_knight_moves(board: &Board, out: &mut Vec<Move>) {
    generate_piece_moves(board, PieceKind::Knight, |from, _| knight_attacks(from), out);
}
