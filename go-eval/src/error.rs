use std::fmt;

use crate::Point;
use crate::lifecycle::Status;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Placement target already holds a stone.
    OccupiedCell(Point),
    /// A move was attempted after the game ended.
    GameTerminated(Status),
    /// Coordinate outside the board or a label that does not parse.
    InvalidCoordinate(String),
    /// Placement would leave the placing group without liberties.
    SelfCapture(Point),
    /// Immediate recapture of a single-stone ko.
    KoViolation(Point),
    /// External board dump could not be applied.
    MalformedBoardDump(String),
    /// Config values a session cannot be built from.
    InvalidConfig(String),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::OccupiedCell((row, col)) => {
                write!(f, "cell ({row}, {col}) is occupied")
            }
            EvalError::GameTerminated(status) => write!(f, "game is over ({status})"),
            EvalError::InvalidCoordinate(msg) => write!(f, "invalid coordinate: {msg}"),
            EvalError::SelfCapture((row, col)) => {
                write!(f, "self-capture at ({row}, {col})")
            }
            EvalError::KoViolation((row, col)) => {
                write!(f, "ko recapture at ({row}, {col})")
            }
            EvalError::MalformedBoardDump(msg) => write!(f, "malformed board dump: {msg}"),
            EvalError::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for EvalError {}
