use crate::game_state::chess_types::Square;
use crate::moves::ray_tracing::{build_ray_table, trace_ray};

pub const DIAGONAL_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const BISHOP_RAYS: [u64; 64] = build_ray_table(&DIAGONAL_DIRECTIONS);

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    let from = square.index() as u8;
    DIAGONAL_DIRECTIONS
        .iter()
        .fold(0u64, |acc, &(d_row, d_col)| acc | trace_ray(from, d_row, d_col, occupancy))
}

#[cfg(test)]
mod tests {
    use super::{bishop_attacks, BISHOP_RAYS};
    use crate::game_state::chess_types::Square;

    #[test]
    fn bishop_rays_from_d4_have_thirteen_squares() {
        let d4 = Square::from_row_col(4, 3).expect("d4");
        assert_eq!(BISHOP_RAYS[d4.index()].count_ones(), 13);
    }

    #[test]
    fn blocker_is_included_and_stops_the_ray() {
        let a1 = Square::from_row_col(7, 0).expect("a1");
        let c3 = Square::from_row_col(5, 2).expect("c3");
        let d4 = Square::from_row_col(4, 3).expect("d4");
        let attacks = bishop_attacks(a1, c3.bit());
        assert_ne!(attacks & c3.bit(), 0);
        assert_eq!(attacks & d4.bit(), 0);
        assert_eq!(attacks.count_ones(), 2);
    }
}
