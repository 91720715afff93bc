//! Square and bitboard conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and internal
//! square/bitboard representations reused by FEN/PGN/UCI components.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Square;

/// Convert algebraic notation (for example: "e4") to a square.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidNotation(format!(
            "invalid algebraic square: {square}"
        )));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessError::InvalidNotation(format!(
            "invalid algebraic file: {}",
            file as char
        )));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidNotation(format!(
            "invalid algebraic rank: {}",
            rank as char
        )));
    }

    // Row 0 is rank 8.
    let row = b'8' - rank;
    let col = file - b'a';
    Square::from_row_col(row, col)
        .ok_or_else(|| ChessError::InvalidNotation(format!("invalid algebraic square: {square}")))
}

/// Convert algebraic notation (for example: "e4") to a one-hot bitboard.
#[inline]
pub fn algebraic_to_bitboard(square: &str) -> ChessResult<u64> {
    Ok(algebraic_to_square(square)?.bit())
}

/// Convert a square to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    square.to_string()
}

/// Convert a one-hot bitboard to algebraic notation (for example: "e4").
pub fn bitboard_to_algebraic(bitboard: u64) -> ChessResult<String> {
    if bitboard.count_ones() != 1 {
        return Err(ChessError::InvalidNotation(format!(
            "bitboard must contain exactly one set bit, got {}",
            bitboard.count_ones()
        )));
    }

    let square = Square::iter_bits(bitboard)
        .next()
        .ok_or_else(|| ChessError::InvalidNotation("empty bitboard".to_owned()))?;
    Ok(square_to_algebraic(square))
}

#[cfg(test)]
mod tests {
    use super::{
        algebraic_to_bitboard, algebraic_to_square, bitboard_to_algebraic, square_to_algebraic,
    };

    #[test]
    fn square_conversions_follow_row_major_from_rank_eight() {
        assert_eq!(algebraic_to_square("a8").expect("a8 should parse").index(), 0);
        assert_eq!(algebraic_to_square("h1").expect("h1 should parse").index(), 63);
        assert_eq!(algebraic_to_square("e3").expect("e3 should parse").index(), 44);
        let e4 = algebraic_to_square("e4").expect("e4 should parse");
        assert_eq!(e4.index(), 36);
        assert_eq!(square_to_algebraic(e4), "e4");
    }

    #[test]
    fn rejects_malformed_squares() {
        assert!(algebraic_to_square("i1").is_err());
        assert!(algebraic_to_square("a9").is_err());
        assert!(algebraic_to_square("e").is_err());
    }

    #[test]
    fn bitboard_conversion() {
        let e4 = algebraic_to_bitboard("e4").expect("e4 should parse");
        assert_eq!(e4, 1u64 << 36);
        assert_eq!(
            bitboard_to_algebraic(e4).expect("one-hot bitboard should convert"),
            "e4"
        );
        assert!(bitboard_to_algebraic(0).is_err());
        assert!(bitboard_to_algebraic(0b11).is_err());
    }
}
