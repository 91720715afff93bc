use std::fmt;

use crate::game_state::chess_types::Color;

/// Outcome of a game. Anything other than `Ongoing` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameResult {
    #[default]
    Ongoing,
    Checkmate {
        winner: Color,
    },
    Stalemate,
    FiftyMoveDraw,
    ThreefoldRepetition,
    InsufficientMaterial,
    Resignation {
        winner: Color,
    },
}

impl GameResult {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != GameResult::Ongoing
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameResult::Checkmate { winner } | GameResult::Resignation { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameResult::Stalemate
                | GameResult::FiftyMoveDraw
                | GameResult::ThreefoldRepetition
                | GameResult::InsufficientMaterial
        )
    }

    /// PGN result tag: `1-0`, `0-1`, `1/2-1/2` or `*`.
    pub fn pgn_token(self) -> &'static str {
        match self.winner() {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None if self.is_draw() => "1/2-1/2",
            None => "*",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Ongoing => f.write_str("ongoing"),
            GameResult::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameResult::Stalemate => f.write_str("stalemate"),
            GameResult::FiftyMoveDraw => f.write_str("draw by fifty-move rule"),
            GameResult::ThreefoldRepetition => f.write_str("draw by threefold repetition"),
            GameResult::InsufficientMaterial => f.write_str("draw by insufficient material"),
            GameResult::Resignation { winner } => {
                write!(f, "{} resigns, {winner} wins", winner.opposite())
            }
        }
    }
}
