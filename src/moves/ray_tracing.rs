//! Shared table builders for the per-piece attack modules.
//!
//! Leaper tables are built at compile time from row/col offsets. Slider
//! attacks are traced along a direction until the first occupied square,
//! which is included so captures fall out of the same mask.

/// Build a 64-entry attack table for a piece that jumps by fixed offsets.
pub(crate) const fn build_leaper_table(offsets: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let row = (sq / 8) as i32;
        let col = (sq % 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0usize;

        while i < offsets.len() {
            attacks |= bit_if_on_board(row + offsets[i].0, col + offsets[i].1);
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

/// Build the empty-board ray masks for a set of slider directions.
pub(crate) const fn build_ray_table(directions: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let mut rays = 0u64;
        let mut i = 0usize;

        while i < directions.len() {
            rays |= trace_ray(sq as u8, directions[i].0, directions[i].1, 0);
            i += 1;
        }

        table[sq] = rays;
        sq += 1;
    }

    table
}

/// Squares reached from `square` stepping by `(row_step, col_step)`,
/// stopping on (and including) the first occupied square.
#[inline]
pub(crate) const fn trace_ray(square: u8, row_step: i32, col_step: i32, occupancy: u64) -> u64 {
    let mut row = (square / 8) as i32 + row_step;
    let mut col = (square % 8) as i32 + col_step;
    let mut attacks = 0u64;

    while row >= 0 && row < 8 && col >= 0 && col < 8 {
        let bit = 1u64 << (row * 8 + col);
        attacks |= bit;

        if (occupancy & bit) != 0 {
            break;
        }

        row += row_step;
        col += col_step;
    }

    attacks
}

#[inline]
pub(crate) const fn bit_if_on_board(row: i32, col: i32) -> u64 {
    if row < 0 || row > 7 || col < 0 || col > 7 {
        return 0;
    }
    1u64 << (row * 8 + col)
}
