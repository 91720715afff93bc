//! Pawn capture masks.
//!
//! White pawns advance toward row 0, Black pawns toward row 7. These tables
//! hold the two diagonal squares a pawn attacks, never its push squares.

use crate::game_state::chess_types::{Color, Square};
use crate::moves::ray_tracing::build_leaper_table;

pub const WHITE_PAWN_ATTACKS: [u64; 64] = build_leaper_table(&[(-1, -1), (-1, 1)]);
pub const BLACK_PAWN_ATTACKS: [u64; 64] = build_leaper_table(&[(1, -1), (1, 1)]);

#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square.index()],
        Color::Black => BLACK_PAWN_ATTACKS[square.index()],
    }
}
