//! Perft node counting for move generator verification.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::move_descriptions::{Move, MoveFlag};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Count leaf nodes `depth` plies below `board`, restoring it afterwards.
pub fn perft(board: &mut Board, depth: u8) -> ChessResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = generate_legal_moves(board)?;
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0;
    for mv in moves {
        let undo = board.apply(mv)?;
        let child = perft(board, depth - 1);
        board.undo(undo)?;
        nodes += child?;
    }
    Ok(nodes)
}

/// Leaf counts with a breakdown of how the final move was made.
pub fn perft_detailed(board: &mut Board, depth: u8) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in generate_legal_moves(board)? {
        let captured = board.piece_at(mv.to).is_some() || mv.flag == MoveFlag::EnPassant;
        let undo = board.apply(mv)?;
        let child = if depth == 1 {
            classify_leaf(board, mv, captured)
        } else {
            perft_detailed(board, depth - 1)
        };
        board.undo(undo)?;
        total.merge(child?);
    }
    Ok(total)
}

/// Per-root-move node counts, in generation order.
pub fn perft_divide(board: &mut Board, depth: u8) -> ChessResult<Vec<(Move, u64)>> {
    let mut out = Vec::new();
    if depth == 0 {
        return Ok(out);
    }
    for mv in generate_legal_moves(board)? {
        let undo = board.apply(mv)?;
        let child = perft(board, depth - 1);
        board.undo(undo)?;
        out.push((mv, child?));
    }
    Ok(out)
}

/// A position with published leaf counts for depths 1, 2, 3, ...
#[derive(Debug, Clone, Copy)]
pub struct PerftCase {
    pub name: &'static str,
    pub fen: &'static str,
    pub expected_nodes: &'static [u64],
}

/// Depths whose reference count stays under this are cheap enough for unit
/// tests and the quick bench suite.
pub const QUICK_NODE_LIMIT: u64 = 10_000;

pub const REFERENCE_CASES: &[PerftCase] = &[
    PerftCase {
        name: "startpos",
        fen: STARTING_POSITION_FEN,
        expected_nodes: &[20, 400, 8_902, 197_281],
    },
    PerftCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_nodes: &[48, 2_039, 97_862],
    },
    PerftCase {
        name: "rook_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2_812, 43_238],
    },
    PerftCase {
        name: "promotions",
        fen: "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        expected_nodes: &[6, 264, 9_467],
    },
    PerftCase {
        name: "middlegame",
        fen: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        expected_nodes: &[44, 1_486, 62_379],
    },
];

impl PerftCase {
    /// `(depth, expected)` pairs whose expected count is at most `node_limit`.
    pub fn depths(&self, node_limit: u64) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.expected_nodes
            .iter()
            .enumerate()
            .map(|(idx, nodes)| ((idx + 1) as u8, *nodes))
            .take_while(move |(_, nodes)| *nodes <= node_limit)
    }

    /// Run perft at every depth under `node_limit` and compare against the
    /// reference counts. The board is restored after each run.
    pub fn verify(&self, node_limit: u64) -> ChessResult<()> {
        let mut board = Board::from_fen(self.fen)?;
        let before = board.clone();
        for (depth, expected) in self.depths(node_limit) {
            let nodes = perft(&mut board, depth)?;
            if nodes != expected {
                return Err(ChessError::InvariantViolation(format!(
                    "perft {} depth {depth}: counted {nodes}, expected {expected}",
                    self.name
                )));
            }
            if board != before {
                return Err(ChessError::InvariantViolation(format!(
                    "perft {} depth {depth} left the board changed",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

fn classify_leaf(board: &mut Board, mv: Move, captured: bool) -> ChessResult<PerftCounts> {
    let gives_check = board.is_in_check(board.side_to_move());
    let is_checkmate = gives_check && generate_legal_moves(board)?.is_empty();
    Ok(PerftCounts {
        nodes: 1,
        captures: captured as u64,
        en_passant: (mv.flag == MoveFlag::EnPassant) as u64,
        castles: mv.flag.is_castle() as u64,
        promotions: mv.promotion.is_some() as u64,
        checks: gives_check as u64,
        checkmates: is_checkmate as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    fn count(fen: &str, depth: u8) -> u64 {
        let mut board = Board::from_fen(fen).expect("FEN");
        let before = board.clone();
        let nodes = perft(&mut board, depth).expect("perft should run");
        assert_eq!(board, before, "perft must leave the board unchanged");
        nodes
    }

    #[test]
    fn perft_depth_zero_counts_single_node() {
        assert_eq!(count(STARTING_POSITION_FEN, 0), 1);
    }

    #[test]
    fn reference_positions_match_published_counts() {
        for case in REFERENCE_CASES {
            if let Err(err) = case.verify(QUICK_NODE_LIMIT) {
                panic!("{err}");
            }
        }
    }

    #[test]
    fn quick_limit_keeps_shallow_depths() {
        let endgame = REFERENCE_CASES
            .iter()
            .find(|case| case.name == "rook_endgame")
            .expect("case");
        let depths: Vec<_> = endgame.depths(QUICK_NODE_LIMIT).collect();
        assert_eq!(depths, vec![(1, 14), (2, 191), (3, 2_812)]);
    }

    #[test]
    fn wrong_reference_count_is_reported() {
        let case = PerftCase {
            name: "broken",
            fen: STARTING_POSITION_FEN,
            expected_nodes: &[21],
        };
        assert!(matches!(
            case.verify(QUICK_NODE_LIMIT),
            Err(ChessError::InvariantViolation(_))
        ));
    }

    #[test]
    fn detailed_counts_match_known_breakdown() {
        let mut board = Board::from_fen(KIWIPETE).expect("FEN");
        let counts = perft_detailed(&mut board, 1).expect("perft should run");
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 48,
                captures: 8,
                en_passant: 0,
                castles: 2,
                promotions: 0,
                checks: 0,
                checkmates: 0,
            }
        );

        let mut start = Board::new();
        let depth3 = perft_detailed(&mut start, 3).expect("perft should run");
        assert_eq!(depth3.nodes, 8_902);
        assert_eq!(depth3.captures, 34);
        assert_eq!(depth3.checks, 12);
    }

    #[test]
    fn divide_sums_to_total() {
        let mut board = Board::new();
        let divide = perft_divide(&mut board, 2).expect("perft should run");
        assert_eq!(divide.len(), 20);
        assert!(divide.iter().all(|(_, nodes)| *nodes == 20));
    }
}
