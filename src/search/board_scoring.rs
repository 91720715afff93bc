//! Pluggable position evaluation interfaces and the built-in evaluators.
//!
//! Search stays modular by delegating static position scoring to the
//! `Evaluator` trait, so alternate heuristics can be swapped without touching
//! search code. Scores are centipawns from White's point of view.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;

/// Magnitude of a checkmate score before the ply adjustment.
pub const MATE_SCORE: i32 = 30_000;

/// Static evaluation capability.
///
/// Implementations must be pure: read the game, never mutate it, and return
/// the same score for the same position.
pub trait Evaluator: Send + Sync {
    /// Short identifier used by the registry.
    fn name(&self) -> &str;

    /// Score in centipawns, positive when White is better.
    fn evaluate(&self, game: &GameState) -> i32;

    /// Centipawn value of a piece kind.
    fn piece_value(&self, kind: PieceKind) -> i32 {
        standard_piece_value(kind)
    }
}

#[inline]
pub const fn standard_piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20_000,
    }
}

/// White material minus Black material under `value`.
pub fn material_balance<F>(board: &Board, value: F) -> i32
where
    F: Fn(PieceKind) -> i32,
{
    ALL_PIECE_KINDS
        .iter()
        .map(|&kind| {
            let white_count = board.pieces(Color::White, kind).count_ones() as i32;
            let black_count = board.pieces(Color::Black, kind).count_ones() as i32;
            (white_count - black_count) * value(kind)
        })
        .sum()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl Evaluator for MaterialEvaluator {
    fn name(&self) -> &str {
        "material"
    }

    fn evaluate(&self, game: &GameState) -> i32 {
        material_balance(game.board(), |kind| self.piece_value(kind))
    }
}

/// Material plus piece-square bonuses.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalEvaluator;

impl PositionalEvaluator {
    /// Piece-square bonus for `piece` on `square`. Tables are laid out with
    /// a8 first from White's side; Black reads them vertically mirrored.
    #[inline]
    pub fn square_bonus(piece: Piece, square: Square) -> i32 {
        let index = match piece.color {
            Color::White => square.index(),
            Color::Black => square.flip_vertical().index(),
        };
        piece_square_table(piece.kind)[index]
    }
}

impl Evaluator for PositionalEvaluator {
    fn name(&self) -> &str {
        "positional"
    }

    fn evaluate(&self, game: &GameState) -> i32 {
        let board = game.board();
        let placement: i32 = board
            .iter_pieces()
            .map(|(square, piece)| {
                let bonus = Self::square_bonus(piece, square);
                match piece.color {
                    Color::White => bonus,
                    Color::Black => -bonus,
                }
            })
            .sum();
        material_balance(board, |kind| self.piece_value(kind)) + placement
    }
}

const fn piece_square_table(kind: PieceKind) -> &'static [i32; 64] {
    match kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King => &KING_TABLE,
    }
}

#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_TABLE: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];
