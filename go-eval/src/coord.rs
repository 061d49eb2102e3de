use std::fmt;

use serde::Serialize;

use crate::Point;
use crate::error::EvalError;

/// GTP column letters; `I` is skipped.
const COLUMNS: &[u8; 19] = b"ABCDEFGHJKLMNOPQRST";

/// Label a point the GTP way: column letter followed by `size - row`.
pub fn to_gtp((row, col): Point, size: u8) -> Result<String, EvalError> {
    if row >= size || col >= size || col as usize >= COLUMNS.len() {
        return Err(EvalError::InvalidCoordinate(format!(
            "({row}, {col}) is outside a {size}x{size} board"
        )));
    }
    Ok(format!("{}{}", COLUMNS[col as usize] as char, size - row))
}

/// Inverse of [`to_gtp`]. Letters are case-insensitive.
pub fn from_gtp(label: &str, size: u8) -> Result<Point, EvalError> {
    let invalid = || EvalError::InvalidCoordinate(format!("{label:?} on a {size}x{size} board"));

    let label = label.trim();
    let mut chars = label.chars();
    let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
    let col = COLUMNS
        .iter()
        .position(|&c| c as char == letter)
        .ok_or_else(invalid)?;
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let number: u8 = digits.parse().map_err(|_| invalid())?;

    if col >= size as usize || number == 0 || number > size {
        return Err(invalid());
    }
    Ok((size - number, col as u8))
}

/// A move as it appears on the GTP wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Vertex {
    Play(Point),
    Pass,
    Resign,
}

impl Vertex {
    pub fn parse(s: &str, size: u8) -> Result<Self, EvalError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass" => Ok(Vertex::Pass),
            "resign" => Ok(Vertex::Resign),
            _ => from_gtp(s, size).map(Vertex::Play),
        }
    }

    pub fn to_gtp(self, size: u8) -> Result<String, EvalError> {
        match self {
            Vertex::Play(point) => to_gtp(point, size),
            Vertex::Pass => Ok("pass".to_string()),
            Vertex::Resign => Ok("resign".to_string()),
        }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vertex::Play((row, col)) => write!(f, "({row}, {col})"),
            Vertex::Pass => write!(f, "pass"),
            Vertex::Resign => write!(f, "resign"),
        }
    }
}
