use clap::{Parser, Subcommand};
use log::info;

use chess_arbiter::chess_errors::ChessResult;
use chess_arbiter::game_state::board::Board;
use chess_arbiter::game_state::chess_rules::STARTING_POSITION_FEN;
use chess_arbiter::game_state::chess_types::Color;
use chess_arbiter::game_state::game_state::GameState;
use chess_arbiter::move_generation::perft::{perft, perft_divide};
use chess_arbiter::search::alpha_beta::{SearchConfig, Searcher};
use chess_arbiter::search::evaluator_registry::EvaluatorRegistry;
use chess_arbiter::utils::pgn::write_pgn;
use chess_arbiter::utils::render_game_state::render_game_state;

#[derive(Parser, Debug)]
#[command(name = "chess_arbiter", about = "Chess rules arbiter and alpha-beta self-play driver")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a game between two registered evaluators.
    Play {
        #[arg(long, default_value = "positional")]
        white: String,
        #[arg(long, default_value = "material")]
        black: String,
        #[arg(long, default_value_t = 3)]
        white_depth: u8,
        #[arg(long, default_value_t = 3)]
        black_depth: u8,
        /// Start position; defaults to the standard setup.
        #[arg(long)]
        fen: Option<String>,
        /// Stop after this many plies even if the game is still running.
        #[arg(long, default_value_t = 200)]
        max_plies: u32,
    },
    /// Count leaf nodes of the legal move tree.
    Perft {
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,
        #[arg(long, default_value_t = 4)]
        depth: u8,
        /// Print the count under each root move.
        #[arg(long)]
        divide: bool,
    },
    /// List the registered evaluator names.
    Evaluators,
}

fn main() -> ChessResult<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Play {
            white,
            black,
            white_depth,
            black_depth,
            fen,
            max_plies,
        } => play(&white, &black, white_depth, black_depth, fen.as_deref(), max_plies),
        Command::Perft { fen, depth, divide } => run_perft(&fen, depth, divide),
        Command::Evaluators => {
            for name in EvaluatorRegistry::global().names() {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn play(
    white: &str,
    black: &str,
    white_depth: u8,
    black_depth: u8,
    fen: Option<&str>,
    max_plies: u32,
) -> ChessResult<()> {
    let white_searcher = Searcher::from_registry(white, SearchConfig { max_depth: white_depth })?;
    let black_searcher = Searcher::from_registry(black, SearchConfig { max_depth: black_depth })?;
    let mut game = match fen {
        Some(fen) => GameState::from_fen(fen)?,
        None => GameState::new(),
    };
    info!("{white} (depth {white_depth}) vs {black} (depth {black_depth})");

    let mut plies = 0u32;
    while !game.is_terminal() && plies < max_plies {
        let searcher = match game.side_to_move() {
            Color::White => &white_searcher,
            Color::Black => &black_searcher,
        };
        let outcome = searcher.search(&mut game)?;
        println!(
            "{:>4}. {} {} ({})",
            game.board().fullmove_number(),
            game.side_to_move(),
            outcome.best_move,
            outcome.score
        );
        game.apply_move(outcome.best_move)?;
        plies += 1;
    }

    println!();
    println!("{}", render_game_state(&game));
    println!("Result: {}", game.result());
    println!();
    println!("{}", write_pgn(&game, white, black));
    Ok(())
}

fn run_perft(fen: &str, depth: u8, divide: bool) -> ChessResult<()> {
    let mut board = Board::from_fen(fen)?;
    if divide {
        let mut total = 0u64;
        for (mv, nodes) in perft_divide(&mut board, depth)? {
            println!("{mv}: {nodes}");
            total += nodes;
        }
        println!();
        println!("Nodes searched: {total}");
    } else {
        println!("perft({depth}) = {}", perft(&mut board, depth)?);
    }
    Ok(())
}
