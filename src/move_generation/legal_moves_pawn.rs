use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::{Move, MoveFlag};
use crate::moves::pawn_moves::pawn_attacks;

pub fn generate_pawn_moves(board: &Board, out: &mut Vec<Move>) {
    let side = board.side_to_move();
    let enemy_occ = board.occupancy(side.opposite());
    let empty = !board.occupancy_all();
    let direction = side.pawn_direction();

    for from in Square::iter_bits(board.pieces(side, PieceKind::Pawn)) {
        if let Some(one_step) = from.offset(direction, 0) {
            if one_step.bit() & empty != 0 {
                push_pawn_move(side, from, one_step, out);

                if from.row() == side.pawn_start_row() {
                    if let Some(two_step) = one_step.offset(direction, 0) {
                        if two_step.bit() & empty != 0 {
                            out.push(Move::with_flag(from, two_step, MoveFlag::DoublePawnPush));
                        }
                    }
                }
            }
        }

        let attacks = pawn_attacks(side, from);
        for to in Square::iter_bits(attacks & enemy_occ) {
            push_pawn_move(side, from, to, out);
        }

        // The target square is always empty, so it never overlaps a capture above.
        if let Some(target) = board.en_passant_square() {
            if attacks & target.bit() != 0 {
                out.push(Move::with_flag(from, target, MoveFlag::EnPassant));
            }
        }
    }
}

/// Push a single-step or capturing pawn move, expanding promotions.
fn push_pawn_move(side: Color, from: Square, to: Square, out: &mut Vec<Move>) {
    if to.row() == side.promotion_row() {
        for kind in PROMOTION_KINDS {
            out.push(Move::promoting(from, to, kind));
        }
    } else {
        out.push(Move::new(from, to));
    }
}
