//! Self-describing move value.
//!
//! A `Move` carries everything `Board::apply` needs: origin, destination,
//! promotion choice and the special-move flag. Equality covers every field,
//! so a move is only accepted when its flag matches the generated one.

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MoveFlag {
    #[default]
    Normal,
    DoublePawnPush,
    EnPassant,
    CastleKingside,
    CastleQueenside,
}

impl MoveFlag {
    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub flag: MoveFlag,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
            flag: MoveFlag::Normal,
        }
    }

    #[inline]
    pub const fn with_flag(from: Square, to: Square, flag: MoveFlag) -> Self {
        Self {
            from,
            to,
            promotion: None,
            flag,
        }
    }

    #[inline]
    pub const fn promoting(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
            flag: MoveFlag::Normal,
        }
    }

    /// True when this move matches a from/to/promotion triple.
    #[inline]
    pub fn matches(&self, from: Square, to: Square, promotion: Option<PieceKind>) -> bool {
        self.from == from && self.to == to && self.promotion == promotion
    }
}

/// UCI long algebraic form, for example `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.letter())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Move, MoveFlag};
    use crate::game_state::chess_types::{PieceKind, Square};

    fn sq(row: u8, col: u8) -> Square {
        Square::from_row_col(row, col).expect("test square on board")
    }

    #[test]
    fn display_uses_long_algebraic() {
        let push = Move::with_flag(sq(6, 4), sq(4, 4), MoveFlag::DoublePawnPush);
        assert_eq!(push.to_string(), "e2e4");

        let promo = Move::promoting(sq(1, 0), sq(0, 0), PieceKind::Knight);
        assert_eq!(promo.to_string(), "a7a8n");
    }

    #[test]
    fn flags_take_part_in_equality() {
        let plain = Move::new(sq(6, 4), sq(4, 4));
        let flagged = Move::with_flag(sq(6, 4), sq(4, 4), MoveFlag::DoublePawnPush);
        assert_ne!(plain, flagged);
        assert!(flagged.matches(sq(6, 4), sq(4, 4), None));
    }
}
