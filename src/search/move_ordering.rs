//! Capture-first move ordering for alpha-beta.
//!
//! Captures are tried most valuable victim first, cheapest attacker first
//! (MVV-LVA), then promotions, then quiet moves in generation order. Only
//! pruning efficiency depends on this.

use std::cmp::Reverse;

use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::{Move, MoveFlag};

#[inline]
const fn ordering_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight => 3,
        PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 100,
    }
}

/// Sort key for `mv` on `board`; larger is searched earlier.
pub fn move_order_score(board: &Board, mv: Move) -> i32 {
    let victim = if mv.flag == MoveFlag::EnPassant {
        Some(PieceKind::Pawn)
    } else {
        board.piece_at(mv.to).map(|piece| piece.kind)
    };

    let promotion_bonus = mv.promotion.map(ordering_value).unwrap_or(0);

    match victim {
        Some(victim) => {
            let attacker = board
                .piece_at(mv.from)
                .map(|piece| ordering_value(piece.kind))
                .unwrap_or(0);
            // Keep every capture ahead of every quiet promotion.
            1_000 + victim_value_scaled(victim) - attacker + promotion_bonus
        }
        None => promotion_bonus,
    }
}

#[inline]
const fn victim_value_scaled(victim: PieceKind) -> i32 {
    ordering_value(victim) * 10
}

/// Stable in-place reorder of `moves`.
pub fn order_moves(board: &Board, moves: &mut [Move]) {
    moves.sort_by_key(|&mv| Reverse(move_order_score(board, mv)));
}
