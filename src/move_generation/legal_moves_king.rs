use crate::game_state::chess_rules::{castling_lanes, CastlingLane};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{non_friendly_squares, push_moves_to_targets};
use crate::moves::king_moves::king_attacks;
use crate::moves::move_descriptions::{Move, MoveFlag};

pub fn generate_king_moves(board: &Board, out: &mut Vec<Move>) {
    let side = board.side_to_move();
    let Some(from) = board.king_square(side) else {
        return;
    };

    push_moves_to_targets(from, king_attacks(from) & non_friendly_squares(board), out);
    generate_castling_moves(board, from, out);
}

fn generate_castling_moves(board: &Board, king_from: Square, out: &mut Vec<Move>) {
    let side = board.side_to_move();
    let [kingside, queenside] = castling_lanes(side);

    for (lane, flag) in [
        (kingside, MoveFlag::CastleKingside),
        (queenside, MoveFlag::CastleQueenside),
    ] {
        if can_castle(board, king_from, &lane) {
            out.push(Move::with_flag(
                king_from,
                Square::from_index_unchecked(lane.king_to),
                flag,
            ));
        }
    }
}

/// Right held, king and rook at home, gap empty, and no square the king
/// stands on or crosses is attacked (covers "not out of check").
fn can_castle(board: &Board, king_from: Square, lane: &CastlingLane) -> bool {
    let side = board.side_to_move();
    let enemy = side.opposite();

    if !board.has_castling_right(lane.right) || king_from.index() != lane.king_from as usize {
        return false;
    }

    let rook_from = Square::from_index_unchecked(lane.rook_from);
    if board.piece_at(rook_from) != Some(Piece::new(side, PieceKind::Rook)) {
        return false;
    }

    let gap_blocked = lane
        .must_be_empty
        .iter()
        .any(|&index| board.occupancy_all() & Square::from_index_unchecked(index).bit() != 0);
    if gap_blocked {
        return false;
    }

    !lane
        .king_path
        .iter()
        .any(|&index| board.is_square_attacked(Square::from_index_unchecked(index), enemy))
}
