use serde::Serialize;

use crate::config::{EvalConfig, WinRateWeights};
use crate::goban::Goban;
use crate::history::{Captures, MoveRecord};
use crate::influence::InfluenceField;
use crate::stone::Stone;
use crate::territory::{self, Territory};

/// Whole-position assessment, always derived fresh from the board and the
/// capture history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub black_score: f64,
    pub white_score: f64,
    pub black_stones: u32,
    pub white_stones: u32,
    pub black_captures: u32,
    pub white_captures: u32,
    pub black_territory: u32,
    pub white_territory: u32,
    /// Heuristic probability that Black wins.
    pub win_rate: f64,
    /// Signed material balance, komi included. Positive favours Black.
    pub value: f64,
}

impl Default for Evaluation {
    fn default() -> Self {
        Self {
            black_score: 0.0,
            white_score: 0.0,
            black_stones: 0,
            white_stones: 0,
            black_captures: 0,
            white_captures: 0,
            black_territory: 0,
            white_territory: 0,
            win_rate: 0.5,
            value: 0.0,
        }
    }
}

impl Evaluation {
    pub fn score_diff(&self) -> f64 {
        self.black_score - self.white_score
    }
}

/// The five normalized inputs to the win-rate blend, each in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Signals {
    pub influence: f64,
    pub territory: f64,
    pub capture: f64,
    pub stones: f64,
    pub stability: f64,
}

pub fn evaluate(
    goban: &Goban,
    captures: Captures,
    moves: &[MoveRecord],
    influence: &InfluenceField,
    config: &EvalConfig,
) -> Evaluation {
    let black_stones = goban.count(Stone::Black);
    let white_stones = goban.count(Stone::White);
    let territory = territory::estimate(goban);
    let komi = config.komi;

    let black_score = f64::from(black_stones + territory.black + 2 * captures.black);
    let white_score = f64::from(white_stones + territory.white + 2 * captures.white) + komi;

    let value = f64::from(black_stones) - f64::from(white_stones)
        + 2.0 * (f64::from(captures.black) - f64::from(captures.white))
        + f64::from(territory.black)
        - f64::from(territory.white)
        - komi;

    let signals = signals(
        influence,
        &territory,
        captures,
        (black_stones, white_stones),
        moves,
        config,
    );

    Evaluation {
        black_score,
        white_score,
        black_stones,
        white_stones,
        black_captures: captures.black,
        white_captures: captures.white,
        black_territory: territory.black,
        white_territory: territory.white,
        win_rate: win_rate(&signals, moves.len(), &config.win_rate),
        value,
    }
}

pub fn signals(
    influence: &InfluenceField,
    territory: &Territory,
    captures: Captures,
    (black_stones, white_stones): (u32, u32),
    moves: &[MoveRecord],
    config: &EvalConfig,
) -> Signals {
    let w = &config.win_rate;
    let normalize = |value: f64, scale: f64| (value / scale).clamp(-1.0, 1.0);

    let window = &moves[moves.len().saturating_sub(w.stability_window)..];
    let recent_quality = if window.is_empty() {
        config.metrics.neutral_quality
    } else {
        window.iter().map(|m| m.quality).sum::<f64>() / window.len() as f64
    };

    Signals {
        influence: normalize(
            influence.black_total() - influence.white_total(),
            w.influence_scale,
        ),
        territory: normalize(
            f64::from(territory.black) - f64::from(territory.white) - config.komi,
            w.territory_scale,
        ),
        capture: normalize(
            f64::from(captures.black) - f64::from(captures.white),
            w.capture_scale,
        ),
        stones: normalize(
            f64::from(black_stones) - f64::from(white_stones),
            w.stone_scale,
        ),
        stability: normalize(recent_quality - w.stability_baseline, w.stability_scale),
    }
}

/// Blend the signals with phase weights, squash through a logistic curve,
/// pull toward 0.5 while the game is young, and clamp away from certainty.
pub fn win_rate(signals: &Signals, move_count: usize, w: &WinRateWeights) -> f64 {
    let phase = w.phase(move_count);
    let blended = signals.influence * phase.influence
        + signals.territory * phase.territory
        + signals.capture * phase.capture
        + signals.stones * phase.stones
        + signals.stability * phase.stability;

    let base = 1.0 / (1.0 + (-blended * w.steepness).exp());
    let rate = 0.5 + (base - 0.5) * (1.0 - w.uncertainty(move_count));
    rate.clamp(w.min_rate, w.max_rate)
}
