use pretty_assertions::assert_eq;

use chess_arbiter::chess_errors::{ChessError, IllegalMove};
use chess_arbiter::game_state::board::Board;
use chess_arbiter::game_state::chess_types::{Color, Piece, PieceKind, Square};
use chess_arbiter::game_state::game_result::GameResult;
use chess_arbiter::game_state::game_state::GameState;
use chess_arbiter::move_generation::legal_move_generator::generate_legal_moves;
use chess_arbiter::moves::move_descriptions::Move;
use chess_arbiter::utils::algebraic::algebraic_to_square;

fn sq(name: &str) -> Square {
    algebraic_to_square(name).expect("valid square")
}

fn play(game: &mut GameState, moves: &[&str]) {
    for text in moves {
        let mv = game.parse_uci_move(text).expect("move should be legal");
        game.apply_move(mv).expect("move should apply");
    }
}

fn game(fen: &str) -> GameState {
    GameState::from_fen(fen).expect("FEN should parse")
}

#[test]
fn starting_position_has_twenty_moves() {
    let game = GameState::new();
    assert_eq!(game.legal_moves().len(), 20);
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(game.result(), GameResult::Ongoing);
}

#[test]
fn en_passant_target_lives_for_one_reply() {
    let mut game = GameState::new();
    play(&mut game, &["e2e4"]);
    assert_eq!(game.board().en_passant_square(), Some(sq("e3")));
    assert_eq!(
        game.to_fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );

    play(&mut game, &["g8f6"]);
    assert_eq!(game.board().en_passant_square(), None);
}

#[test]
fn en_passant_capture_removes_the_passed_pawn() {
    let mut game = game("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
    play(&mut game, &["e5d6"]);
    assert_eq!(game.board().piece_at(sq("d5")), None);
    assert_eq!(
        game.board().piece_at(sq("d6")),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );
}

#[test]
fn scholars_mate_is_checkmate() {
    let mut game = GameState::new();
    play(
        &mut game,
        &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"],
    );
    assert_eq!(
        game.result(),
        GameResult::Checkmate {
            winner: Color::White
        }
    );
    assert!(game.legal_moves().is_empty());
    assert!(game.in_check());
}

#[test]
fn castling_moves_the_rook_and_clears_rights() {
    let mut game = game("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    play(&mut game, &["e1g1"]);
    let board = game.board();
    assert_eq!(
        board.piece_at(sq("f1")),
        Some(Piece::new(Color::White, PieceKind::Rook))
    );
    assert_eq!(board.piece_at(sq("h1")), None);
    assert_eq!(game.to_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");
}

#[test]
fn castling_through_an_attacked_square_is_illegal() {
    let game = game("r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq - 0 1");
    assert!(game.find_legal_move(sq("e1"), sq("g1"), None).is_none());
    assert!(game.find_legal_move(sq("e1"), sq("c1"), None).is_some());
}

#[test]
fn promotion_needs_a_piece_letter() {
    let mut game = game("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
    let promotions = game
        .legal_moves()
        .iter()
        .filter(|mv| mv.from == sq("e7"))
        .count();
    assert_eq!(promotions, 4);

    assert!(matches!(
        game.parse_uci_move("e7e8"),
        Err(ChessError::IllegalMove(IllegalMove::NotInLegalSet(_)))
    ));
    play(&mut game, &["e7e8n"]);
    assert_eq!(
        game.board().piece_at(sq("e8")),
        Some(Piece::new(Color::White, PieceKind::Knight))
    );
}

#[test]
fn fifty_move_rule_draws_at_one_hundred_plies() {
    let mut game = game("4k3/8/8/8/8/8/R7/4K3 w - - 99 80");
    assert_eq!(game.result(), GameResult::Ongoing);
    play(&mut game, &["a2b2"]);
    assert_eq!(game.board().halfmove_clock(), 100);
    assert_eq!(game.result(), GameResult::FiftyMoveDraw);
}

#[test]
fn checkmate_outranks_the_fifty_move_rule() {
    let mut game = game("6k1/8/6K1/8/8/8/8/1Q6 w - - 99 80");
    play(&mut game, &["b1b8"]);
    assert_eq!(
        game.result(),
        GameResult::Checkmate {
            winner: Color::White
        }
    );
}

#[test]
fn knight_shuffle_is_threefold_repetition() {
    let mut game = GameState::new();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
    play(&mut game, &shuffle);
    assert_eq!(game.position_count(), 2);
    play(&mut game, &shuffle[..3]);
    assert_eq!(game.result(), GameResult::Ongoing);
    play(&mut game, &shuffle[3..]);
    assert_eq!(game.position_count(), 3);
    assert_eq!(game.result(), GameResult::ThreefoldRepetition);
}

#[test]
fn stalemate_is_a_draw() {
    let mut game = game("7k/5Q2/8/6K1/8/8/8/8 w - - 0 1");
    play(&mut game, &["g5g6"]);
    assert_eq!(game.result(), GameResult::Stalemate);
    assert!(game.result().is_draw());
    assert!(!game.in_check());
}

#[test]
fn capturing_the_last_piece_leaves_insufficient_material() {
    let mut game = game("4k3/8/8/8/8/8/3r4/4K3 w - - 0 1");
    play(&mut game, &["e1d2"]);
    assert_eq!(game.result(), GameResult::InsufficientMaterial);
}

#[test]
fn illegal_move_leaves_the_game_unchanged() {
    let mut game = GameState::new();
    let before = game.to_fen();
    let knight = game.parse_uci_move("g1f3").expect("legal");
    let bogus = Move::new(sq("e2"), sq("e5"));

    assert_eq!(
        game.apply_move(bogus),
        Err(ChessError::IllegalMove(IllegalMove::NotInLegalSet(bogus)))
    );
    assert_eq!(game.to_fen(), before);
    assert!(game.move_history().is_empty());
    assert_eq!(game.legal_moves().len(), 20);

    game.apply_move(knight).expect("still legal");
    assert_eq!(game.move_history(), &[knight]);
}

#[test]
fn finished_game_rejects_moves_and_resignations() {
    let mut game = game("6k1/8/6K1/8/8/8/8/1Q6 w - - 0 1");
    play(&mut game, &["b1b8"]);
    let result = game.result();
    let fen = game.to_fen();

    let any = Move::new(sq("g8"), sq("h8"));
    assert_eq!(
        game.apply_move(any),
        Err(ChessError::IllegalMove(IllegalMove::GameFinished(result)))
    );
    assert_eq!(
        game.resign(Color::Black),
        Err(ChessError::IllegalMove(IllegalMove::GameFinished(result)))
    );
    assert_eq!(game.to_fen(), fen);
}

#[test]
fn resignation_ends_the_game() {
    let mut game = GameState::new();
    play(&mut game, &["e2e4"]);
    game.resign(Color::Black).expect("ongoing game");
    assert_eq!(
        game.result(),
        GameResult::Resignation {
            winner: Color::White
        }
    );
    assert_eq!(game.move_history().len(), 1);
}

const POSITIONS: [&str; 4] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
];

#[test]
fn apply_then_undo_restores_the_board() {
    for fen in POSITIONS {
        let mut board = Board::from_fen(fen).expect("FEN should parse");
        let original = board.clone();
        for mv in generate_legal_moves(&mut board).expect("moves") {
            let undo = board.apply(mv).expect("apply");
            // Incremental hash matches one computed from scratch.
            let fresh = Board::from_fen(&board.to_fen()).expect("round trip");
            assert_eq!(board.zobrist_key(), fresh.zobrist_key(), "{mv} in {fen}");
            board.undo(undo).expect("undo");
            assert_eq!(board, original, "{mv} in {fen}");
        }
    }
}

#[test]
fn no_legal_move_leaves_the_mover_in_check() {
    for fen in POSITIONS {
        let mut board = Board::from_fen(fen).expect("FEN should parse");
        let mover = board.side_to_move();
        for mv in generate_legal_moves(&mut board).expect("moves") {
            let scoped = board.scoped(mv).expect("apply");
            assert!(!scoped.is_in_check(mover), "{mv} leaves king in check in {fen}");
        }
    }
}

#[test]
fn undo_out_of_order_is_rejected() {
    let mut board = Board::new();
    let first = generate_legal_moves(&mut board).expect("moves")[0];
    let stale = board.apply(first).expect("apply");
    let reply = generate_legal_moves(&mut board).expect("moves")[0];
    let latest = board.apply(reply).expect("apply");

    let before = board.clone();
    assert!(matches!(
        board.undo(stale),
        Err(ChessError::InvariantViolation(_))
    ));
    assert_eq!(board, before);
    board.undo(latest).expect("latest token undoes");
}
