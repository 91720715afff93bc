use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;

/// Push a plain move from `from` to every square in `targets`.
#[inline]
pub(crate) fn push_moves_to_targets(from: Square, targets: u64, out: &mut Vec<Move>) {
    out.extend(Square::iter_bits(targets).map(|to| Move::new(from, to)));
}

/// Squares a piece of the side to move may land on: empty or enemy-held.
#[inline]
pub(crate) fn non_friendly_squares(board: &Board) -> u64 {
    !board.occupancy(board.side_to_move())
}

/// Generate moves for every `kind` piece of the side to move using `attacks`.
pub(crate) fn generate_piece_moves<F>(board: &Board, kind: PieceKind, attacks: F, out: &mut Vec<Move>)
where
    F: Fn(Square, u64) -> u64,
{
    let side = board.side_to_move();
    let targets_mask = non_friendly_squares(board);
    let occupancy = board.occupancy_all();
    for from in Square::iter_bits(board.pieces(side, kind)) {
        push_moves_to_targets(from, attacks(from, occupancy) & targets_mask, out);
    }
}
