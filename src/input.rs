use std::str::FromStr;

use crate::error::PuzzleError;
use crate::state::State;

/// Parses a board written as its side `k` followed by `k * k` tiles, all
/// separated by whitespace:
///
/// ```text
/// 3
/// 1 2 3
/// 4 0 6
/// 7 5 8
/// ```
pub fn parse_board(text: &str) -> Result<State, PuzzleError> {
    let mut tokens = text.split_whitespace();

    let size: usize = match tokens.next() {
        Some(token) => parse_token(token)?,
        None => return Err(PuzzleError::Parse("missing board size".to_string())),
    };
    if size < 2 {
        return Err(PuzzleError::InvalidSize(size));
    }

    let tiles = tokens
        .map(parse_token::<u16>)
        .collect::<Result<Vec<_>, _>>()?;

    State::new(size, tiles)
}

fn parse_token<T: FromStr>(token: &str) -> Result<T, PuzzleError> {
    token
        .parse()
        .map_err(|_| PuzzleError::Parse(format!("'{}' is not a non-negative integer", token)))
}
