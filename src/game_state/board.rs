//! Core incremental board representation.
//!
//! `Board` stores piece bitboards, occupancy caches, turn/state flags, clocks
//! and the incrementally maintained Zobrist key. Moves are made and unmade in
//! place: `apply` returns an `UndoState` that `undo` consumes, strictly in
//! LIFO order.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{castling_lanes, color_castling_rights, rook_home_right};
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::ScopedMove;
use crate::move_generation::legal_move_checks;
use crate::moves::move_descriptions::{Move, MoveFlag};
use crate::search::zobrist::{
    castling_key, compute_zobrist_key, en_passant_key, piece_square_key, side_to_move_key,
};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    // [color][piece_kind]
    pub(crate) pieces: [[u64; 6]; 2],
    pub(crate) occupancy_by_color: [u64; 2],
    pub(crate) occupancy_all: u64,

    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_square: Option<Square>,

    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,

    pub(crate) zobrist_key: u64,

    // Number of applied-but-not-undone moves; pairs undo tokens with applies.
    pub(crate) ply: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// A board with no pieces, White to move, no rights.
    pub fn empty() -> Self {
        let mut board = Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            zobrist_key: 0,
            ply: 0,
        };
        board.refresh_zobrist_key();
        board
    }

    /// The standard starting position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for (col, kind) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            board.add_piece(back_rank_square(0, col), Piece::new(Color::Black, *kind));
            board.add_piece(back_rank_square(1, col), Piece::new(Color::Black, PieceKind::Pawn));
            board.add_piece(back_rank_square(6, col), Piece::new(Color::White, PieceKind::Pawn));
            board.add_piece(back_rank_square(7, col), Piece::new(Color::White, *kind));
        }
        board.castling_rights = CASTLE_ALL;
        board.refresh_zobrist_key();
        board
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    // --- Queries ---

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn has_castling_right(&self, right: CastlingRights) -> bool {
        self.castling_rights & right != 0
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    #[inline]
    pub fn zobrist_key(&self) -> u64 {
        self.zobrist_key
    }

    #[inline]
    pub fn pieces(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> u64 {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn occupancy_all(&self) -> u64 {
        self.occupancy_all
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let mask = square.bit();
        if self.occupancy_all & mask == 0 {
            return None;
        }
        let color = if self.occupancy_by_color[Color::White.index()] & mask != 0 {
            Color::White
        } else {
            Color::Black
        };
        ALL_PIECE_KINDS
            .iter()
            .find(|kind| self.pieces[color.index()][kind.index()] & mask != 0)
            .map(|kind| Piece::new(color, *kind))
    }

    /// Every occupied square with its piece, White pieces first.
    pub fn iter_pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        [Color::White, Color::Black].into_iter().flat_map(move |color| {
            ALL_PIECE_KINDS.into_iter().flat_map(move |kind| {
                Square::iter_bits(self.pieces(color, kind))
                    .map(move |square| (square, Piece::new(color, kind)))
            })
        })
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        Square::iter_bits(self.pieces(color, PieceKind::King)).next()
    }

    /// True if any piece of `by_color` attacks `square`.
    #[inline]
    pub fn is_square_attacked(&self, square: Square, by_color: Color) -> bool {
        legal_move_checks::is_square_attacked(self, square, by_color)
    }

    /// True if `color`'s king is attacked on the current board.
    #[inline]
    pub fn is_in_check(&self, color: Color) -> bool {
        legal_move_checks::is_king_in_check(self, color)
    }

    /// Require exactly one king per side.
    pub fn validate_kings(&self) -> ChessResult<()> {
        for color in [Color::White, Color::Black] {
            let kings = self.pieces(color, PieceKind::King).count_ones();
            if kings != 1 {
                return Err(ChessError::InvariantViolation(format!(
                    "{color} has {kings} kings, expected exactly one"
                )));
            }
        }
        Ok(())
    }

    // --- Make / unmake ---

    /// Make `mv` in place and return the record needed to reverse it.
    ///
    /// Legality is not checked; `mv` must come from the move generator for
    /// this position.
    pub fn apply(&mut self, mv: Move) -> ChessResult<UndoState> {
        let moved = self.piece_at(mv.from).ok_or_else(|| {
            ChessError::InvariantViolation(format!("no piece on {} for move {mv}", mv.from))
        })?;
        let color = moved.color;
        if color != self.side_to_move {
            return Err(ChessError::InvariantViolation(format!(
                "move {mv} moves a {color} piece but {} is to move",
                self.side_to_move
            )));
        }

        let prev_castling_rights = self.castling_rights;
        let prev_en_passant_square = self.en_passant_square;
        let prev_halfmove_clock = self.halfmove_clock;
        let prev_fullmove_number = self.fullmove_number;
        let prev_zobrist_key = self.zobrist_key;

        // Every check runs before the first placement change, so a rejected
        // move leaves the board untouched.
        // The en-passant victim stands beside the capturing pawn's origin.
        let captured = if mv.flag == MoveFlag::EnPassant {
            let victim_square = Square::from_row_col(mv.from.row(), mv.to.col())
                .ok_or_else(|| ChessError::InvariantViolation("bad en-passant square".into()))?;
            match self.piece_at(victim_square) {
                Some(victim) if victim == Piece::new(color.opposite(), PieceKind::Pawn) => {
                    Some((victim_square, victim))
                }
                _ => {
                    return Err(ChessError::InvariantViolation(format!(
                        "en-passant move {mv} has no pawn to capture on {victim_square}"
                    )))
                }
            }
        } else {
            match self.piece_at(mv.to) {
                Some(target) if target.color == color => {
                    return Err(ChessError::InvariantViolation(format!(
                        "move {mv} lands on a friendly piece"
                    )))
                }
                target => target.map(|piece| (mv.to, piece)),
            }
        };

        let castling_rook = if mv.flag.is_castle() {
            let lane = castling_lane_for(color, mv.flag)?;
            let rook = Piece::new(color, PieceKind::Rook);
            let rook_from = Square::from_index_unchecked(lane.rook_from);
            let rook_to = Square::from_index_unchecked(lane.rook_to);
            if self.piece_at(rook_from) != Some(rook) {
                return Err(ChessError::InvariantViolation(format!(
                    "castling move {mv} has no rook on {rook_from}"
                )));
            }
            if captured.is_some() || self.piece_at(rook_to).is_some() {
                return Err(ChessError::InvariantViolation(format!(
                    "castling move {mv} is blocked"
                )));
            }
            Some((rook, rook_from, rook_to))
        } else {
            None
        };

        if let Some((square, piece)) = captured {
            self.remove_piece(square, piece);
        }
        self.remove_piece(mv.from, moved);
        let placed = mv
            .promotion
            .map(|kind| Piece::new(color, kind))
            .unwrap_or(moved);
        self.add_piece(mv.to, placed);

        if let Some((rook, rook_from, rook_to)) = castling_rook {
            self.remove_piece(rook_from, rook);
            self.add_piece(rook_to, rook);
        }

        let mut rights = self.castling_rights;
        if moved.kind == PieceKind::King {
            rights &= !color_castling_rights(color);
        }
        if moved.kind == PieceKind::Rook {
            rights &= !rook_home_right(mv.from.index() as u8);
        }
        if let Some((square, _)) = captured {
            rights &= !rook_home_right(square.index() as u8);
        }
        self.set_castling_rights(rights);

        let en_passant = if mv.flag == MoveFlag::DoublePawnPush {
            Square::from_row_col((mv.from.row() + mv.to.row()) / 2, mv.from.col())
        } else {
            None
        };
        self.set_en_passant_square(en_passant);

        if moved.kind == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.side_to_move = color.opposite();
        self.zobrist_key ^= side_to_move_key();
        self.ply += 1;

        Ok(UndoState {
            mv,
            moved_piece: moved,
            captured,
            prev_castling_rights,
            prev_en_passant_square,
            prev_halfmove_clock,
            prev_fullmove_number,
            prev_zobrist_key,
            ply: self.ply,
        })
    }

    /// Reverse the most recent `apply`.
    ///
    /// Fails with `InvariantViolation` if `undo` is not the token of the most
    /// recent outstanding apply; the board is untouched in that case.
    pub fn undo(&mut self, undo: UndoState) -> ChessResult<()> {
        if undo.ply != self.ply || self.ply == 0 {
            return Err(ChessError::InvariantViolation(format!(
                "undo of {} out of order (token ply {}, board ply {})",
                undo.mv, undo.ply, self.ply
            )));
        }

        let mv = undo.mv;
        let color = undo.moved_piece.color;

        if mv.flag.is_castle() {
            let lane = castling_lane_for(color, mv.flag)?;
            let rook = Piece::new(color, PieceKind::Rook);
            self.remove_piece(Square::from_index_unchecked(lane.rook_to), rook);
            self.add_piece(Square::from_index_unchecked(lane.rook_from), rook);
        }

        let placed = mv
            .promotion
            .map(|kind| Piece::new(color, kind))
            .unwrap_or(undo.moved_piece);
        self.remove_piece(mv.to, placed);
        self.add_piece(mv.from, undo.moved_piece);

        if let Some((square, piece)) = undo.captured {
            self.add_piece(square, piece);
        }

        self.castling_rights = undo.prev_castling_rights;
        self.en_passant_square = undo.prev_en_passant_square;
        self.halfmove_clock = undo.prev_halfmove_clock;
        self.fullmove_number = undo.prev_fullmove_number;
        self.side_to_move = color;
        self.zobrist_key = undo.prev_zobrist_key;
        self.ply -= 1;

        Ok(())
    }

    /// Apply `mv` for the lifetime of the returned guard, undoing it on drop.
    pub fn scoped(&mut self, mv: Move) -> ChessResult<ScopedMove<'_>> {
        let undo = self.apply(mv)?;
        Ok(ScopedMove::new(self, undo))
    }

    // --- Placement primitives (keep occupancy and hash in sync) ---

    pub(crate) fn add_piece(&mut self, square: Square, piece: Piece) {
        let mask = square.bit();
        debug_assert_eq!(self.occupancy_all & mask, 0, "square {square} already occupied");
        self.pieces[piece.color.index()][piece.kind.index()] |= mask;
        self.occupancy_by_color[piece.color.index()] |= mask;
        self.occupancy_all |= mask;
        self.zobrist_key ^= piece_square_key(piece, square);
    }

    pub(crate) fn remove_piece(&mut self, square: Square, piece: Piece) {
        let mask = square.bit();
        debug_assert_ne!(
            self.pieces[piece.color.index()][piece.kind.index()] & mask,
            0,
            "{piece:?} missing from {square}"
        );
        self.pieces[piece.color.index()][piece.kind.index()] &= !mask;
        self.occupancy_by_color[piece.color.index()] &= !mask;
        self.occupancy_all &= !mask;
        self.zobrist_key ^= piece_square_key(piece, square);
    }

    fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.zobrist_key ^= castling_key(self.castling_rights ^ rights);
        self.castling_rights = rights;
    }

    fn set_en_passant_square(&mut self, square: Option<Square>) {
        self.zobrist_key ^= en_passant_key(self.en_passant_square);
        self.zobrist_key ^= en_passant_key(square);
        self.en_passant_square = square;
    }

    pub(crate) fn refresh_zobrist_key(&mut self) {
        self.zobrist_key = compute_zobrist_key(self);
    }
}

fn back_rank_square(row: u8, col: u8) -> Square {
    Square::from_index_unchecked(row * 8 + col)
}

fn castling_lane_for(
    color: Color,
    flag: MoveFlag,
) -> ChessResult<crate::game_state::chess_rules::CastlingLane> {
    let [kingside, queenside] = castling_lanes(color);
    match flag {
        MoveFlag::CastleKingside => Ok(kingside),
        MoveFlag::CastleQueenside => Ok(queenside),
        other => Err(ChessError::InvariantViolation(format!(
            "{other:?} is not a castling flag"
        ))),
    }
}
