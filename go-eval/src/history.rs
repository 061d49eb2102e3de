use serde::{Deserialize, Serialize};

use crate::Point;
use crate::stone::Stone;

/// Captures indexed by stone color (stones taken *by* that color).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Captures {
    pub black: u32,
    pub white: u32,
}

impl Captures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stone: Stone) -> u32 {
        match stone {
            Stone::Black => self.black,
            Stone::White => self.white,
        }
    }

    pub(crate) fn add(&mut self, stone: Stone, count: u32) {
        match stone {
            Stone::Black => self.black += count,
            Stone::White => self.white += count,
        }
    }
}

/// One successful placement. Index in the history is the move number minus one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub point: Point,
    pub stone: Stone,
    pub quality: f64,
}

/// Capture bookkeeping for one placement: the stones it removed and the
/// running totals after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRecord {
    /// 1-based move number.
    pub move_number: usize,
    pub totals: Captures,
    pub captured: Vec<Point>,
}

/// Append-only move and capture history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    moves: Vec<MoveRecord>,
    captures: Vec<CaptureRecord>,
}

impl History {
    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn captures(&self) -> &[CaptureRecord] {
        &self.captures
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.moves.last()
    }

    /// Running totals after the latest move, zero before any.
    pub fn capture_totals(&self) -> Captures {
        self.captures.last().map(|c| c.totals).unwrap_or_default()
    }

    /// Record a placement. `taken_by_mover` are opponent stones captured;
    /// `lost_by_mover` are the mover's own stones removed and credited to
    /// the opponent.
    pub(crate) fn record(
        &mut self,
        record: MoveRecord,
        taken_by_mover: &[Point],
        lost_by_mover: &[Point],
    ) {
        let mut totals = self.capture_totals();
        totals.add(record.stone, taken_by_mover.len() as u32);
        totals.add(record.stone.opp(), lost_by_mover.len() as u32);

        self.moves.push(record);
        self.captures.push(CaptureRecord {
            move_number: self.moves.len(),
            totals,
            captured: taken_by_mover
                .iter()
                .chain(lost_by_mover)
                .copied()
                .collect(),
        });
    }
}
