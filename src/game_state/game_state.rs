//! Game-level state: board, history, repetition table and adjudication.
//!
//! `GameState` is the object the outside world holds for one game. It is
//! mutated only through `apply_move` and `resign`; every committed move
//! refreshes the legal-move cache and the game result. The search explores
//! through `probe`, which applies a move to the board alone and undoes it
//! when the returned guard drops.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use log::{debug, info};

use crate::chess_errors::{ChessError, ChessResult, IllegalMove};
use crate::game_state::chess_rules::{FIFTY_MOVE_PLY_LIMIT, REPETITION_LIMIT};
use crate::game_state::chess_types::*;
use crate::game_state::game_result::GameResult;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::move_descriptions::Move;
use crate::utils::long_algebraic::parse_long_algebraic;

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    initial_fen: String,
    move_history: Vec<Move>,

    // Zobrist key -> occurrences, including the initial position.
    position_counts: HashMap<u64, u32>,

    // Legal moves of the committed position.
    legal_moves: Vec<Move>,
    result: GameResult,

    // Number of outstanding probes.
    probe_depth: u32,
}

impl GameState {
    /// A new game from the standard starting position.
    pub fn new() -> Self {
        Self::build(Board::new()).expect("starting position should always be playable")
    }

    /// A game starting from an arbitrary FEN position.
    ///
    /// The position's result is adjudicated immediately, so a FEN with the
    /// side to move already mated yields a terminal game.
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Self::build(Board::from_fen(fen)?)
    }

    fn build(mut board: Board) -> ChessResult<Self> {
        board.validate_kings()?;
        let waiting = board.side_to_move().opposite();
        if board.is_in_check(waiting) {
            return Err(ChessError::InvalidFen(format!(
                "{waiting} is in check but it is not {waiting}'s move"
            )));
        }
        let legal_moves = generate_legal_moves(&mut board)?;
        let mut position_counts = HashMap::new();
        position_counts.insert(board.zobrist_key(), 1);

        let mut game = Self {
            initial_fen: board.to_fen(),
            board,
            move_history: Vec::new(),
            position_counts,
            legal_moves,
            result: GameResult::Ongoing,
            probe_depth: 0,
        };
        game.result = game.adjudicate();
        Ok(game)
    }

    // --- Queries ---

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Whether the side to move is in check on the current board.
    #[inline]
    pub fn in_check(&self) -> bool {
        self.board.is_in_check(self.board.side_to_move())
    }

    /// Legal moves of the committed position.
    ///
    /// Empty while a probe is active, since the cache does not describe the
    /// probed board; use `generate_moves` there.
    pub fn legal_moves(&self) -> &[Move] {
        if self.is_probing() {
            return &[];
        }
        &self.legal_moves
    }

    /// Whether a `Probe` on this game is still alive.
    #[inline]
    pub fn is_probing(&self) -> bool {
        self.probe_depth != 0
    }

    /// FEN of the position the game started from.
    pub fn initial_fen(&self) -> &str {
        &self.initial_fen
    }

    #[inline]
    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    #[inline]
    pub fn result(&self) -> GameResult {
        self.result
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.result.is_terminal()
    }

    /// How many times the current board's position has occurred in the game.
    pub fn position_count(&self) -> u32 {
        self.position_counts
            .get(&self.board.zobrist_key())
            .copied()
            .unwrap_or(0)
    }

    pub fn to_fen(&self) -> String {
        self.board.to_fen()
    }

    /// Legal moves of whatever position the board is in right now, probes
    /// included.
    pub fn generate_moves(&mut self) -> ChessResult<Vec<Move>> {
        generate_legal_moves(&mut self.board)
    }

    /// The legal move matching a from/to/promotion triple, with its flag.
    pub fn find_legal_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Option<Move> {
        self.legal_moves()
            .iter()
            .copied()
            .find(|mv| mv.matches(from, to, promotion))
    }

    /// Resolve UCI long algebraic text such as `e2e4` or `e7e8q` to a legal
    /// move.
    pub fn parse_uci_move(&self, text: &str) -> ChessResult<Move> {
        self.ensure_not_probing("parse_uci_move")?;
        let (from, to, promotion) = parse_long_algebraic(text)?;
        self.find_legal_move(from, to, promotion).ok_or_else(|| {
            IllegalMove::NotInLegalSet(Move {
                promotion,
                ..Move::new(from, to)
            })
            .into()
        })
    }

    // --- Mutation ---

    /// Commit `mv` to the game.
    ///
    /// Fails with `IllegalMove` if the game is over or `mv` is not in the
    /// current legal set, and with `InvariantViolation` if a probe is active. Either fully succeeds or leaves the game exactly
    /// as it was.
    pub fn apply_move(&mut self, mv: Move) -> ChessResult<()> {
        self.ensure_not_probing("apply_move")?;
        if self.result.is_terminal() {
            return Err(IllegalMove::GameFinished(self.result).into());
        }
        if !self.legal_moves.contains(&mv) {
            return Err(IllegalMove::NotInLegalSet(mv).into());
        }

        let undo = self.board.apply(mv)?;
        let next_moves = match generate_legal_moves(&mut self.board) {
            Ok(moves) => moves,
            Err(err) => {
                self.board.undo(undo)?;
                return Err(err);
            }
        };

        self.move_history.push(mv);
        *self
            .position_counts
            .entry(self.board.zobrist_key())
            .or_insert(0) += 1;
        self.legal_moves = next_moves;
        self.result = self.adjudicate();

        debug!(
            "applied {mv} (ply {}), {} replies",
            self.move_history.len(),
            self.legal_moves.len()
        );
        if self.result.is_terminal() {
            info!(
                "game over after {} plies: {}",
                self.move_history.len(),
                self.result
            );
        }
        Ok(())
    }

    /// `color` resigns; the opponent wins. Board and history are untouched.
    pub fn resign(&mut self, color: Color) -> ChessResult<()> {
        self.ensure_not_probing("resign")?;
        if self.result.is_terminal() {
            return Err(IllegalMove::GameFinished(self.result).into());
        }
        self.result = GameResult::Resignation {
            winner: color.opposite(),
        };
        info!("{color} resigned");
        Ok(())
    }

    /// Apply `mv` to the board only, until the returned guard drops.
    ///
    /// History, repetition counts, the legal-move cache and the result are
    /// not touched. `mv` must be legal in the current board position.
    pub fn probe(&mut self, mv: Move) -> ChessResult<Probe<'_>> {
        let undo = self.board.apply(mv)?;
        self.probe_depth += 1;
        Ok(Probe {
            game: self,
            undo: Some(undo),
        })
    }

    fn ensure_not_probing(&self, operation: &str) -> ChessResult<()> {
        if self.is_probing() {
            return Err(ChessError::InvariantViolation(format!(
                "{operation} called while {} probe(s) are active",
                self.probe_depth
            )));
        }
        Ok(())
    }

    // --- Adjudication ---

    /// Result for the committed position, checked in order: no moves,
    /// fifty-move rule, repetition, insufficient material.
    fn adjudicate(&self) -> GameResult {
        let side = self.board.side_to_move();
        if self.legal_moves.is_empty() {
            return if self.board.is_in_check(side) {
                GameResult::Checkmate {
                    winner: side.opposite(),
                }
            } else {
                GameResult::Stalemate
            };
        }
        if self.board.halfmove_clock() >= FIFTY_MOVE_PLY_LIMIT {
            return GameResult::FiftyMoveDraw;
        }
        if self.position_count() >= REPETITION_LIMIT {
            return GameResult::ThreefoldRepetition;
        }
        if has_insufficient_material(&self.board) {
            return GameResult::InsufficientMaterial;
        }
        GameResult::Ongoing
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Neither side can possibly deliver mate: bare kings, a single minor piece,
/// or one bishop each on same-colored squares.
pub fn has_insufficient_material(board: &Board) -> bool {
    let heavy_or_pawn = [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen]
        .into_iter()
        .any(|kind| board.pieces(Color::White, kind) | board.pieces(Color::Black, kind) != 0);
    if heavy_or_pawn {
        return false;
    }

    let minors = |color| {
        board.pieces(color, PieceKind::Knight) | board.pieces(color, PieceKind::Bishop)
    };
    let white_minors = minors(Color::White);
    let black_minors = minors(Color::Black);

    match (white_minors.count_ones(), black_minors.count_ones()) {
        (0, 0) | (1, 0) | (0, 1) => true,
        (1, 1) => {
            let white_bishop = board.pieces(Color::White, PieceKind::Bishop);
            let black_bishop = board.pieces(Color::Black, PieceKind::Bishop);
            match (
                Square::iter_bits(white_bishop).next(),
                Square::iter_bits(black_bishop).next(),
            ) {
                (Some(white), Some(black)) => white.is_light() == black.is_light(),
                _ => false,
            }
        }
        _ => false,
    }
}

/// A move probed on a game's board, undone when dropped.
///
/// Derefs to the `GameState` so evaluators and nested probes see the probed
/// position.
pub struct Probe<'a> {
    game: &'a mut GameState,
    undo: Option<UndoState>,
}

impl Probe<'_> {
    pub fn probed_move(&self) -> Option<Move> {
        self.undo.as_ref().map(UndoState::mv)
    }
}

impl Deref for Probe<'_> {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        self.game
    }
}

impl DerefMut for Probe<'_> {
    fn deref_mut(&mut self) -> &mut GameState {
        self.game
    }
}

impl Drop for Probe<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            if let Err(err) = self.game.board.undo(undo) {
                log::error!("probe could not be undone: {err}");
                debug_assert!(false, "probe could not be undone: {err}");
            }
            self.game.probe_depth -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{has_insufficient_material, GameState};
    use crate::chess_errors::{ChessError, IllegalMove};
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;
    use crate::game_state::game_result::GameResult;

    fn play(game: &mut GameState, moves: &[&str]) {
        for text in moves {
            let mv = game.parse_uci_move(text).expect("move should be legal");
            game.apply_move(mv).expect("move should apply");
        }
    }

    #[test]
    fn new_game_is_ongoing_with_twenty_moves() {
        let game = GameState::new();
        assert_eq!(game.legal_moves().len(), 20);
        assert_eq!(game.result(), GameResult::Ongoing);
        assert_eq!(game.to_fen(), STARTING_POSITION_FEN);
        assert_eq!(game.position_count(), 1);
        assert!(!game.in_check());
    }

    #[test]
    fn illegal_move_leaves_game_unchanged() {
        let mut game = GameState::new();
        let fen = game.to_fen();
        let err = game.parse_uci_move("e2e5").expect_err("e2e5 is not legal");
        assert!(matches!(
            err,
            ChessError::IllegalMove(IllegalMove::NotInLegalSet(_))
        ));

        let bogus = crate::moves::move_descriptions::Move::new(
            Square::from_row_col(6, 4).expect("e2"),
            Square::from_row_col(3, 4).expect("e5"),
        );
        assert!(game.apply_move(bogus).is_err());
        assert_eq!(game.to_fen(), fen);
        assert!(game.move_history().is_empty());
    }

    #[test]
    fn probe_restores_board_and_leaves_history_alone() {
        let mut game = GameState::new();
        let fen = game.to_fen();
        let mv = game.parse_uci_move("g1f3").expect("legal");
        {
            let mut probe = game.probe(mv).expect("probe applies");
            assert_eq!(probe.probed_move(), Some(mv));
            assert_eq!(probe.side_to_move(), Color::Black);
            assert_eq!(probe.generate_moves().expect("movegen").len(), 20);
            assert!(probe.move_history().is_empty());
        }
        assert_eq!(game.to_fen(), fen);
        assert_eq!(game.legal_moves().len(), 20);
    }

    #[test]
    fn committing_inside_a_probe_is_refused() {
        let mut game = GameState::new();
        let fen = game.to_fen();
        let e4 = game.parse_uci_move("e2e4").expect("legal");
        let nf3 = game.parse_uci_move("g1f3").expect("legal");
        {
            let mut outer = game.probe(e4).expect("probe applies");
            let e5 = outer
                .generate_moves()
                .expect("movegen")
                .into_iter()
                .find(|mv| mv.to_string() == "e7e5")
                .expect("e7e5 is legal");
            let mut inner = outer.probe(e5).expect("nested probe applies");

            assert!(inner.is_probing());
            assert!(inner.legal_moves().is_empty());
            assert!(matches!(
                inner.apply_move(nf3),
                Err(ChessError::InvariantViolation(_))
            ));
            assert!(matches!(
                inner.resign(Color::White),
                Err(ChessError::InvariantViolation(_))
            ));
            assert!(matches!(
                inner.parse_uci_move("g1f3"),
                Err(ChessError::InvariantViolation(_))
            ));
        }
        assert!(!game.is_probing());
        assert_eq!(game.to_fen(), fen);
        assert!(game.move_history().is_empty());
        assert_eq!(game.result(), GameResult::Ongoing);
        assert_eq!(game.legal_moves().len(), 20);
    }

    #[test]
    fn side_not_to_move_in_check_is_rejected() {
        let err = GameState::from_fen("4k3/8/8/8/8/8/8/4RK2 w - - 0 1")
            .expect_err("black king is already attacked");
        assert!(matches!(err, ChessError::InvalidFen(_)));

        // Same placement with Black to move is an ordinary check.
        let game = GameState::from_fen("4k3/8/8/8/8/8/8/4RK2 b - - 0 1").expect("FEN");
        assert!(game.in_check());
    }

    #[test]
    fn resignation_ends_game_once() {
        let mut game = GameState::new();
        game.resign(Color::White).expect("resign while ongoing");
        assert_eq!(
            game.result(),
            GameResult::Resignation {
                winner: Color::Black
            }
        );
        assert!(game.move_history().is_empty());

        let err = game.resign(Color::Black).expect_err("game already over");
        assert!(matches!(
            err,
            ChessError::IllegalMove(IllegalMove::GameFinished(_))
        ));
        let mv = game.legal_moves()[0];
        assert!(game.apply_move(mv).is_err());
    }

    #[test]
    fn knight_shuffle_reaches_threefold() {
        let mut game = GameState::new();
        let shuffle = ["b1c3", "b8c6", "c3b1", "c6b8"];
        play(&mut game, &shuffle);
        assert_eq!(game.position_count(), 2);
        assert_eq!(game.result(), GameResult::Ongoing);
        play(&mut game, &shuffle);
        assert_eq!(game.position_count(), 3);
        assert_eq!(game.result(), GameResult::ThreefoldRepetition);
    }

    #[test]
    fn fen_import_adjudicates_immediately() {
        let stalemate = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN");
        assert_eq!(stalemate.result(), GameResult::Stalemate);

        let bare = GameState::from_fen("8/8/4k3/8/8/3K4/8/8 w - - 0 1").expect("FEN");
        assert_eq!(bare.result(), GameResult::InsufficientMaterial);

        assert!(matches!(
            GameState::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(ChessError::InvariantViolation(_))
        ));
    }

    #[test]
    fn insufficient_material_cases() {
        let check = |fen: &str| {
            has_insufficient_material(&Board::from_fen(fen).expect("FEN"))
        };
        assert!(check("8/8/4k3/8/8/3K4/8/8 w - - 0 1"));
        assert!(check("8/8/4k3/8/8/3KN3/8/8 w - - 0 1"));
        assert!(check("8/8/4kb2/8/8/3K4/8/8 w - - 0 1"));
        // Bishops on c1 (dark) and f8 (dark).
        assert!(check("5b2/8/4k3/8/8/3K4/8/2B5 w - - 0 1"));
        // Bishops on c1 (dark) and c8 (light).
        assert!(!check("2b5/8/4k3/8/8/3K4/8/2B5 w - - 0 1"));
        assert!(!check("8/8/4k3/8/8/3KNN2/8/8 w - - 0 1"));
        assert!(!check("8/8/4k3/8/8/3K4/4P3/8 w - - 0 1"));
        assert!(!check("8/8/4kn2/8/8/3KN3/8/8 w - - 0 1"));
    }
}
