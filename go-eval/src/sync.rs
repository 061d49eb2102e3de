//! Inputs from the external engine: the authoritative board dump and ranked
//! move suggestions.

use serde::{Deserialize, Serialize};

use crate::Point;
use crate::error::EvalError;
use crate::goban::Goban;
use crate::stone::Stone;

/// Parse a textual board dump: one line per row, `X` Black, `O` White,
/// anything else empty. Blank lines are ignored and anything past the first
/// `size` characters of a row is dropped.
pub fn parse_board_dump(text: &str, size: u8) -> Result<Goban, EvalError> {
    let n = size as usize;
    let rows: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(n)
        .collect();

    if rows.len() < n {
        return Err(EvalError::MalformedBoardDump(format!(
            "expected {n} rows, got {}",
            rows.len()
        )));
    }

    let mut board = Vec::with_capacity(n);
    for (i, line) in rows.iter().enumerate() {
        let cells: Vec<i8> = line
            .chars()
            .take(n)
            .map(|c| Stone::from_dump_char(c).map_or(0, Stone::to_int))
            .collect();
        if cells.len() < n {
            return Err(EvalError::MalformedBoardDump(format!(
                "row {i} has {} cells, expected {n}",
                cells.len()
            )));
        }
        board.push(cells);
    }

    Ok(Goban::new(board))
}

/// A candidate move as reported by the engine. `x` is the row, `y` the column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub x: i64,
    pub y: i64,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub color: Option<i8>,
}

/// A suggestion that passed local validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candidate {
    pub point: Point,
    pub score: f64,
    pub stone: Stone,
}

/// Parse a JSON array of suggestions, skipping entries that are not
/// objects with numeric `x` and `y`.
pub fn parse_suggestions(json: &str) -> Result<Vec<Suggestion>, serde_json::Error> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(json)?;
    Ok(raw
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}

/// Keep in-bounds suggestions on empty cells, best score first, at most `count`.
pub fn filter_suggestions(
    suggestions: &[Suggestion],
    goban: &Goban,
    to_play: Stone,
    count: usize,
) -> Vec<Candidate> {
    let size = i64::from(goban.size());
    let mut candidates: Vec<Candidate> = suggestions
        .iter()
        .filter(|s| (0..size).contains(&s.x) && (0..size).contains(&s.y))
        .map(|s| Candidate {
            point: (s.x as u8, s.y as u8),
            score: s.score,
            stone: s.color.and_then(Stone::from_int).unwrap_or(to_play),
        })
        .filter(|c| goban.stone_at(c.point).is_none())
        .collect();

    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(count);
    candidates
}
