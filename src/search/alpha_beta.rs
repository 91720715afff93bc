//! Depth-limited minimax search with alpha-beta pruning.
//!
//! Scores are White-positive: White maximizes, Black minimizes. Each
//! candidate is explored through a `GameState::probe`, so the board is back
//! in its original state whenever a recursive call returns, including early
//! pruning exits and propagated errors.

use log::{debug, trace};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::{Evaluator, MATE_SCORE};
use crate::search::evaluator_registry::EvaluatorRegistry;
use crate::search::move_ordering::order_moves;

/// Bound wider than any reachable score.
const SCORE_INFINITY: i32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched below the root; at least 1.
    pub max_depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_depth: 3 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: Move,
    /// White-positive score of `best_move`.
    pub score: i32,
    /// Positions visited below the root.
    pub nodes: u64,
}

pub struct Searcher {
    evaluator: Box<dyn Evaluator>,
    config: SearchConfig,
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("evaluator", &self.evaluator.name())
            .field("config", &self.config)
            .finish()
    }
}

impl Searcher {
    pub fn new(evaluator: Box<dyn Evaluator>, config: SearchConfig) -> ChessResult<Self> {
        if config.max_depth == 0 {
            return Err(ChessError::InvalidSearchDepth(config.max_depth));
        }
        Ok(Self { evaluator, config })
    }

    /// Build a searcher around an evaluator from the global registry.
    pub fn from_registry(name: &str, config: SearchConfig) -> ChessResult<Self> {
        Self::new(EvaluatorRegistry::global().create(name)?, config)
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.config.max_depth
    }

    #[inline]
    pub fn evaluator(&self) -> &dyn Evaluator {
        self.evaluator.as_ref()
    }

    /// Best move for the side to move, searched with alpha-beta pruning.
    ///
    /// Among equally scored moves the first one searched wins. Fails with
    /// `NoLegalMoves` if the side to move has none.
    pub fn search(&self, game: &mut GameState) -> ChessResult<SearchOutcome> {
        self.search_root(game, true)
    }

    /// Plain minimax over the same tree without pruning or ordering.
    ///
    /// Returns the same score as `search`; only useful as a reference.
    pub fn search_exhaustive(&self, game: &mut GameState) -> ChessResult<SearchOutcome> {
        self.search_root(game, false)
    }

    fn search_root(&self, game: &mut GameState, prune: bool) -> ChessResult<SearchOutcome> {
        let mut moves = game.generate_moves()?;
        if moves.is_empty() {
            return Err(ChessError::NoLegalMoves);
        }
        if prune {
            order_moves(game.board(), &mut moves);
        }

        let maximizing = game.side_to_move() == Color::White;
        let mut alpha = -SCORE_INFINITY;
        let mut beta = SCORE_INFINITY;
        let mut nodes = 0u64;
        let mut best: Option<(Move, i32)> = None;

        for mv in moves {
            let score = {
                let mut probe = game.probe(mv)?;
                self.minimax(
                    &mut probe,
                    self.config.max_depth - 1,
                    1,
                    alpha,
                    beta,
                    prune,
                    &mut nodes,
                )?
            };
            trace!("root {mv}: {score}");

            let improves = match best {
                None => true,
                Some((_, best_score)) if maximizing => score > best_score,
                Some((_, best_score)) => score < best_score,
            };
            if improves {
                best = Some((mv, score));
            }

            if prune {
                if maximizing {
                    alpha = alpha.max(score);
                } else {
                    beta = beta.min(score);
                }
            }
        }

        let (best_move, score) = best.ok_or(ChessError::NoLegalMoves)?;
        debug!(
            "{} depth {} ({}): best {best_move} score {score}, {nodes} nodes",
            self.evaluator.name(),
            self.config.max_depth,
            if prune { "alpha-beta" } else { "exhaustive" },
        );
        Ok(SearchOutcome {
            best_move,
            score,
            nodes,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &self,
        game: &mut GameState,
        depth: u8,
        ply: u32,
        mut alpha: i32,
        mut beta: i32,
        prune: bool,
        nodes: &mut u64,
    ) -> ChessResult<i32> {
        *nodes += 1;

        // Mate and stalemate are scored exactly even at the horizon.
        let mut moves = game.generate_moves()?;
        if moves.is_empty() {
            return Ok(terminal_score(game, ply));
        }
        if depth == 0 {
            return Ok(self.evaluator.evaluate(game));
        }
        if prune {
            order_moves(game.board(), &mut moves);
        }

        let maximizing = game.side_to_move() == Color::White;
        let mut best = if maximizing {
            -SCORE_INFINITY
        } else {
            SCORE_INFINITY
        };

        for mv in moves {
            let score = {
                let mut probe = game.probe(mv)?;
                self.minimax(&mut probe, depth - 1, ply + 1, alpha, beta, prune, nodes)?
            };

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if prune && beta <= alpha {
                break;
            }
        }

        Ok(best)
    }
}

/// Score of a position with no legal moves, `ply` plies below the root.
/// Quicker mates score further from zero.
fn terminal_score(game: &GameState, ply: u32) -> i32 {
    if !game.in_check() {
        return 0;
    }
    let mate = MATE_SCORE - ply as i32;
    match game.side_to_move() {
        Color::White => -mate,
        Color::Black => mate,
    }
}
