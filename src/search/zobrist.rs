//! Zobrist hashing support for position identity and repetition tracking.
//!
//! Every position feature (piece on square, side to move, each castling
//! right, en-passant file) owns an independent random key, and a position's
//! hash is the XOR of the keys of the features it has. `Board` maintains the
//! hash incrementally by XOR-ing keys in and out as features change.
//!
//! The keys are generated from a fixed seed so hashes are deterministic across
//! runs, which is useful for testing and debugging.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::chess_types::*;

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 4],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for key in piece {
                *key = rng.random();
            }
        }
    }

    let side_to_move = rng.random();

    let mut castling = [0u64; 4];
    for key in &mut castling {
        *key = rng.random();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.random();
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

/// Return the Zobrist key for a piece standing on a square.
#[inline]
pub fn piece_square_key(piece: Piece, square: Square) -> u64 {
    tables().piece_square[piece.color.index()][piece.kind.index()][square.index()]
}

/// XOR of the keys of every right set in `castling_rights`.
#[inline]
pub fn castling_key(castling_rights: CastlingRights) -> u64 {
    let keys = &tables().castling;
    CASTLING_BITS
        .iter()
        .zip(keys.iter())
        .filter(|(bit, _)| castling_rights & **bit != 0)
        .fold(0u64, |acc, (_, key)| acc ^ key)
}

/// Key contribution of an en-passant target; only its file is hashed.
#[inline]
pub fn en_passant_key(en_passant_square: Option<Square>) -> u64 {
    en_passant_square
        .map(|square| tables().en_passant_file[square.col() as usize])
        .unwrap_or(0)
}

/// Return the side-to-move toggle key (xor in when Black is to move).
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Compute the full position key from scratch.
///
/// `Board` keeps its key up to date incrementally; this is the reference the
/// incremental path is checked against.
pub fn compute_zobrist_key(board: &Board) -> u64 {
    let mut key = 0u64;

    for (square, piece) in board.iter_pieces() {
        key ^= piece_square_key(piece, square);
    }

    if board.side_to_move() == Color::Black {
        key ^= side_to_move_key();
    }

    key ^= castling_key(board.castling_rights());
    key ^= en_passant_key(board.en_passant_square());

    key
}
