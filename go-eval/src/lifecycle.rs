use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EvalError;
use crate::stone::Stone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Playing,
    BlackWin,
    WhiteWin,
    Draw,
    /// Transient: a resignation was accepted and the winner is being settled.
    Resigned,
}

impl Status {
    pub fn is_playing(&self) -> bool {
        matches!(self, Status::Playing)
    }

    fn win_for(stone: Stone) -> Self {
        match stone {
            Stone::Black => Status::BlackWin,
            Stone::White => Status::WhiteWin,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Playing => write!(f, "playing"),
            Status::BlackWin => write!(f, "black_win"),
            Status::WhiteWin => write!(f, "white_win"),
            Status::Draw => write!(f, "draw"),
            Status::Resigned => write!(f, "resigned"),
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "playing" => Ok(Status::Playing),
            "black_win" => Ok(Status::BlackWin),
            "white_win" => Ok(Status::WhiteWin),
            "draw" => Ok(Status::Draw),
            "resigned" => Ok(Status::Resigned),
            _ => Err(format!("unknown status: {s}")),
        }
    }
}

/// Turn order, pass counting and terminal outcome. Status only moves
/// forward; `reset` is the single way back to `Playing`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lifecycle {
    status: Status,
    to_play: Stone,
    consecutive_passes: u8,
    resigned_by: Option<Stone>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            status: Status::Playing,
            to_play: Stone::Black,
            consecutive_passes: 0,
            resigned_by: None,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn to_play(&self) -> Stone {
        self.to_play
    }

    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    pub fn resigned_by(&self) -> Option<Stone> {
        self.resigned_by
    }

    pub fn ensure_playing(&self) -> Result<(), EvalError> {
        if self.status.is_playing() {
            Ok(())
        } else {
            Err(EvalError::GameTerminated(self.status))
        }
    }

    /// A stone was placed by `stone`.
    pub fn on_placement(&mut self, stone: Stone) {
        self.to_play = stone.opp();
        self.consecutive_passes = 0;
    }

    /// The side to move passes. The second consecutive pass settles the game
    /// on the sign of `score_diff` (Black minus White).
    pub fn pass(&mut self, score_diff: f64) -> Result<Status, EvalError> {
        self.ensure_playing()?;
        self.consecutive_passes += 1;
        self.to_play = self.to_play.opp();

        if self.consecutive_passes >= 2 {
            self.transition(if score_diff > 0.0 {
                Status::BlackWin
            } else if score_diff < 0.0 {
                Status::WhiteWin
            } else {
                Status::Draw
            });
            tracing::info!(status = %self.status, score_diff, "game ended by two passes");
        }
        Ok(self.status)
    }

    /// `stone` resigns; the opponent wins.
    pub fn resign(&mut self, stone: Stone) -> Result<Status, EvalError> {
        self.ensure_playing()?;
        self.resigned_by = Some(stone);
        self.transition(Status::Resigned);
        self.transition(Status::win_for(stone.opp()));
        tracing::info!(resigned = %stone, status = %self.status, "game ended by resignation");
        Ok(self.status)
    }

    fn transition(&mut self, next: Status) {
        tracing::debug!(from = %self.status, to = %next, "status transition");
        self.status = next;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
