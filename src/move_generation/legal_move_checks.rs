use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::rook_moves::rook_attacks;

/// A missing king is never in check.
#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = board.king_square(color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

/// Looks outward from `square` with each piece's attack pattern and checks
/// for a matching attacker of `attacker_color`.
pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    let occupancy = board.occupancy_all();
    let theirs = |kind| board.pieces(attacker_color, kind);

    // A pawn of `attacker_color` hits `square` iff a defender pawn on `square`
    // would hit it back.
    if pawn_attacks(attacker_color.opposite(), square) & theirs(PieceKind::Pawn) != 0 {
        return true;
    }

    if knight_attacks(square) & theirs(PieceKind::Knight) != 0 {
        return true;
    }

    if king_attacks(square) & theirs(PieceKind::King) != 0 {
        return true;
    }

    let bishops_queens = theirs(PieceKind::Bishop) | theirs(PieceKind::Queen);
    if bishop_attacks(square, occupancy) & bishops_queens != 0 {
        return true;
    }

    let rooks_queens = theirs(PieceKind::Rook) | theirs(PieceKind::Queen);
    rook_attacks(square, occupancy) & rooks_queens != 0
}
