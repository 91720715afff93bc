//! Canonical chess-rule constants.
//!
//! Stores the standard starting position and the fixed squares and limits the
//! rules engine adjudicates against.

use crate::game_state::chess_types::{
    CastlingRights, Color, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE, CASTLE_WHITE_KINGSIDE,
    CASTLE_WHITE_QUEENSIDE,
};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-move clock value (plies) at which the fifty-move rule ends the game.
pub const FIFTY_MOVE_PLY_LIMIT: u16 = 100;

/// Occurrences of one position that end the game by repetition.
pub const REPETITION_LIMIT: u32 = 3;

/// Square indices of the pieces involved in castling for one side and wing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingLane {
    pub right: CastlingRights,
    pub king_from: u8,
    pub king_to: u8,
    pub rook_from: u8,
    pub rook_to: u8,
    /// Squares between king and rook that must be empty.
    pub must_be_empty: &'static [u8],
    /// Squares the king stands on, crosses, or lands on.
    pub king_path: &'static [u8],
}

pub const WHITE_KINGSIDE: CastlingLane = CastlingLane {
    right: CASTLE_WHITE_KINGSIDE,
    king_from: 60,
    king_to: 62,
    rook_from: 63,
    rook_to: 61,
    must_be_empty: &[61, 62],
    king_path: &[60, 61, 62],
};

pub const WHITE_QUEENSIDE: CastlingLane = CastlingLane {
    right: CASTLE_WHITE_QUEENSIDE,
    king_from: 60,
    king_to: 58,
    rook_from: 56,
    rook_to: 59,
    must_be_empty: &[57, 58, 59],
    king_path: &[60, 59, 58],
};

pub const BLACK_KINGSIDE: CastlingLane = CastlingLane {
    right: CASTLE_BLACK_KINGSIDE,
    king_from: 4,
    king_to: 6,
    rook_from: 7,
    rook_to: 5,
    must_be_empty: &[5, 6],
    king_path: &[4, 5, 6],
};

pub const BLACK_QUEENSIDE: CastlingLane = CastlingLane {
    right: CASTLE_BLACK_QUEENSIDE,
    king_from: 4,
    king_to: 2,
    rook_from: 0,
    rook_to: 3,
    must_be_empty: &[1, 2, 3],
    king_path: &[4, 3, 2],
};

/// Kingside and queenside lanes for `color`.
#[inline]
pub const fn castling_lanes(color: Color) -> [CastlingLane; 2] {
    match color {
        Color::White => [WHITE_KINGSIDE, WHITE_QUEENSIDE],
        Color::Black => [BLACK_KINGSIDE, BLACK_QUEENSIDE],
    }
}

/// Castling right lost when a rook leaves or is captured on `square`.
#[inline]
pub const fn rook_home_right(square: u8) -> CastlingRights {
    match square {
        63 => CASTLE_WHITE_KINGSIDE,
        56 => CASTLE_WHITE_QUEENSIDE,
        7 => CASTLE_BLACK_KINGSIDE,
        0 => CASTLE_BLACK_QUEENSIDE,
        _ => 0,
    }
}

/// Both castling rights of `color`.
#[inline]
pub const fn color_castling_rights(color: Color) -> CastlingRights {
    match color {
        Color::White => CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE,
        Color::Black => CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE,
    }
}
