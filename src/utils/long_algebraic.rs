//! UCI-style long algebraic move text (`e2e4`, `e7e8q`).
//!
//! Text carries only from/to/promotion; the flag is recovered by matching
//! against a position's legal moves.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::algebraic_to_square;

pub fn move_to_long_algebraic(mv: Move) -> String {
    mv.to_string()
}

/// Split long algebraic text into its from/to/promotion parts.
pub fn parse_long_algebraic(
    long_algebraic: &str,
) -> ChessResult<(Square, Square, Option<PieceKind>)> {
    let text = long_algebraic.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessError::InvalidNotation(format!(
            "invalid long algebraic move: {long_algebraic}"
        )));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = text[4..]
        .chars()
        .next()
        .map(char_to_promotion)
        .transpose()?;

    Ok((from, to, promotion))
}

/// Parse `long_algebraic` and resolve it against `legal_moves`.
pub fn long_algebraic_to_move(long_algebraic: &str, legal_moves: &[Move]) -> ChessResult<Move> {
    let (from, to, promotion) = parse_long_algebraic(long_algebraic)?;
    legal_moves
        .iter()
        .copied()
        .find(|mv| mv.matches(from, to, promotion))
        .ok_or_else(|| {
            ChessError::InvalidNotation(format!(
                "{long_algebraic} does not match any legal move"
            ))
        })
}

fn char_to_promotion(ch: char) -> ChessResult<PieceKind> {
    match PieceKind::from_letter(ch) {
        Some(kind) if PROMOTION_KINDS.contains(&kind) => Ok(kind),
        _ => Err(ChessError::InvalidNotation(format!(
            "invalid promotion piece character: {ch}"
        ))),
    }
}
