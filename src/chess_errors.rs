//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single error type across the crate. Callers should
//! treat the variants in three groups:
//! - `IllegalMove` is a rejected request (move not legal, or the game is
//!   already over). Game state is left exactly as it was before the call.
//! - Parsing and configuration variants (`InvalidFen`, `InvalidNotation`,
//!   `UnknownEvaluator`, `InvalidSearchDepth`, `NoLegalMoves`) are
//!   recoverable input problems.
//! - `InvariantViolation` means internal state is corrupt (missing king,
//!   undo applied out of order). It indicates a bug, not bad input.

use thiserror::Error;

use crate::game_state::game_result::GameResult;
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("illegal move: {0}")]
    IllegalMove(IllegalMove),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("the side to move has no legal moves")]
    NoLegalMoves,

    #[error("unknown evaluator '{0}'")]
    UnknownEvaluator(String),

    #[error("search depth must be at least 1, got {0}")]
    InvalidSearchDepth(u8),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid move notation: {0}")]
    InvalidNotation(String),
}

/// Why a move or resignation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("{0} is not in the current legal move set")]
    NotInLegalSet(Move),

    #[error("the game has already ended ({0})")]
    GameFinished(GameResult),
}

impl From<IllegalMove> for ChessError {
    fn from(value: IllegalMove) -> Self {
        ChessError::IllegalMove(value)
    }
}

pub type ChessResult<T> = Result<T, ChessError>;
