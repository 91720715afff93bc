//! PGN read/write utilities for game records.
//!
//! Movetext is written in long algebraic notation with move numbers. Reading
//! accepts the same dialect, skipping comments, variations, annotation
//! glyphs and move numbers, and replays the moves through `GameState`.

use std::collections::BTreeMap;

use chrono::Local;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::game_state::GameState;

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: BTreeMap<String, String>,
    /// The game after replaying every move.
    pub game: GameState,
    pub result: String,
}

/// Render `game` as PGN with the standard seven tag roster.
pub fn write_pgn(game: &GameState, white: &str, black: &str) -> String {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Chess Arbiter Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert(
        "Date".to_owned(),
        Local::now().format("%Y.%m.%d").to_string(),
    );
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), white.to_owned());
    headers.insert("Black".to_owned(), black.to_owned());
    headers.insert("Result".to_owned(), game.result().pgn_token().to_owned());

    if game.initial_fen() != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), game.initial_fen().to_owned());
    }

    write_pgn_with_headers(game, &headers)
}

pub fn write_pgn_with_headers(game: &GameState, headers: &BTreeMap<String, String>) -> String {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    // A game set up with Black to move numbers its first move "N...".
    let black_first = game.initial_fen().split_whitespace().nth(1) == Some("b");
    let first_move_number = game
        .initial_fen()
        .split_whitespace()
        .nth(5)
        .and_then(|field| field.parse::<usize>().ok())
        .unwrap_or(1);

    let history = game.move_history();
    let mut movetext_parts = Vec::<String>::with_capacity(history.len() + 1);
    for (index, mv) in history.iter().enumerate() {
        let ply = index + usize::from(black_first);
        let move_number = first_move_number + ply / 2;
        if ply % 2 == 0 {
            movetext_parts.push(format!("{move_number}. {mv}"));
        } else if index == 0 {
            movetext_parts.push(format!("{move_number}... {mv}"));
        } else {
            movetext_parts.push(mv.to_string());
        }
    }

    let result = headers
        .get("Result")
        .map(|x| normalize_result(x))
        .unwrap_or("*");
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    out
}

pub fn read_pgn(pgn: &str) -> ChessResult<PgnGame> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<String>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') {
            let (k, v) = parse_header_line(trimmed)?;
            headers.insert(k, v);
        } else {
            movetext_lines.push(trimmed.to_owned());
        }
    }

    let mut game = if headers.get("SetUp").map(|x| x.as_str()) == Some("1") {
        let fen = headers.get("FEN").ok_or_else(|| {
            ChessError::InvalidNotation("PGN SetUp=1 is present but FEN header is missing".into())
        })?;
        GameState::from_fen(fen)?
    } else {
        GameState::new()
    };

    let mut result = "*".to_owned();

    let movetext = strip_pgn_comments_and_variations(&movetext_lines.join(" "));
    for token in movetext.split_whitespace() {
        if is_move_number_token(token) {
            continue;
        }

        let cleaned = trim_annotation_suffix(strip_move_number_prefix(token));
        if cleaned.is_empty() {
            continue;
        }
        if is_result_token(cleaned) {
            result = cleaned.to_owned();
            break;
        }

        let mv = game.parse_uci_move(cleaned)?;
        game.apply_move(mv)?;
    }

    if let Some(header_result) = headers.get("Result") {
        result = normalize_result(header_result).to_owned();
    }

    Ok(PgnGame {
        headers,
        game,
        result,
    })
}

fn parse_header_line(line: &str) -> ChessResult<(String, String)> {
    let invalid = || ChessError::InvalidNotation(format!("invalid PGN header line: {line}"));

    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(invalid)?;
    let (key, value_raw) = inner.split_once(' ').ok_or_else(invalid)?;
    let value = value_raw
        .trim()
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(invalid)?;

    Ok((key.trim().to_owned(), value.replace("\\\"", "\"")))
}

fn strip_pgn_comments_and_variations(text: &str) -> String {
    let mut out = String::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' => paren_depth = paren_depth.saturating_add(1),
            ')' => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

fn is_move_number_token(token: &str) -> bool {
    let digits = token.trim_end_matches('.');
    digits.len() < token.len() && !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// `12.e4` style tokens carry the number glued to the move.
fn strip_move_number_prefix(token: &str) -> &str {
    match token.rfind('.') {
        Some(dot) if token[..dot].trim_end_matches('.').chars().all(|c| c.is_ascii_digit()) => {
            &token[dot + 1..]
        }
        _ => token,
    }
}

fn trim_annotation_suffix(token: &str) -> &str {
    token.trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'))
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{read_pgn, write_pgn};
    use crate::game_state::game_state::GameState;

    fn play(game: &mut GameState, moves: &[&str]) {
        for text in moves {
            let mv = game.parse_uci_move(text).expect("move should be legal");
            game.apply_move(mv).expect("move should apply");
        }
    }

    #[test]
    fn pgn_round_trip_start_position_history() {
        let mut game = GameState::new();
        play(&mut game, &["e2e4", "e7e5", "g1f3", "b8c6"]);

        let pgn = write_pgn(&game, "material", "positional");
        assert!(pgn.contains("[White \"material\"]"));
        assert!(pgn.contains("1. e2e4 e7e5 2. g1f3 b8c6 *"));
        assert!(!pgn.contains("[FEN "));

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(parsed.game.move_history(), game.move_history());
        assert_eq!(parsed.game.to_fen(), game.to_fen());
        assert_eq!(parsed.result, "*");
    }

    #[test]
    fn pgn_records_setup_and_result() {
        let mut game = GameState::from_fen("6k1/8/6K1/8/8/8/8/1Q6 b - - 0 1").expect("FEN");
        play(&mut game, &["g8h8", "b1b8"]);
        assert!(game.is_terminal());

        let pgn = write_pgn(&game, "White", "Black");
        assert!(pgn.contains("[SetUp \"1\"]"));
        assert!(pgn.contains("[Result \"1-0\"]"));
        assert!(pgn.contains("1... g8h8 2. b1b8 1-0"));

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(parsed.result, "1-0");
        assert_eq!(parsed.game.result(), game.result());
    }

    #[test]
    fn reader_skips_comments_and_glyphs() {
        let pgn = "[Event \"x\"]\n\n1. e2e4 {best by test} e7e5 (1... c7c5) 2.g1f3! *\n";
        let parsed = read_pgn(pgn).expect("PGN should parse");
        assert_eq!(parsed.game.move_history().len(), 3);
        assert_eq!(parsed.headers.get("Event").map(String::as_str), Some("x"));
    }
}
