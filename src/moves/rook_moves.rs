use crate::game_state::chess_types::Square;
use crate::moves::ray_tracing::{build_ray_table, trace_ray};

pub const ORTHOGONAL_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const ROOK_RAYS: [u64; 64] = build_ray_table(&ORTHOGONAL_DIRECTIONS);

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    let from = square.index() as u8;
    ORTHOGONAL_DIRECTIONS
        .iter()
        .fold(0u64, |acc, &(d_row, d_col)| acc | trace_ray(from, d_row, d_col, occupancy))
}
