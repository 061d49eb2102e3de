//! Per-move game-theoretic descriptors.
//!
//! These are visual aids derived from the evaluation and move-quality
//! outputs, not solved-game quantities. Every series is append-only and
//! indexed by the 1-based move number.

use serde::Serialize;

use crate::config::MetricsConfig;
use crate::evaluation::Evaluation;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WinRatePoint {
    pub move_number: usize,
    pub black: f64,
    pub white: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValuePoint {
    pub move_number: usize,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaterialPoint {
    pub move_number: usize,
    pub black_captures: u32,
    pub white_captures: u32,
    pub black_territory: u32,
    pub white_territory: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityPoint {
    pub move_number: usize,
    pub quality: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParetoPoint {
    pub move_number: usize,
    pub black_utility: f64,
    pub white_utility: f64,
    pub efficiency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquilibriumPoint {
    pub move_number: usize,
    /// Distance of Black's win-rate from an even game.
    pub gap: f64,
    pub stability: f64,
    pub potential: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TensionPoint {
    pub move_number: usize,
    pub tension: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UncertaintyPoint {
    pub move_number: usize,
    pub uncertainty: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SynergyPoint {
    pub move_number: usize,
    pub synergy: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameTheorySeries {
    pub win_rate: Vec<WinRatePoint>,
    pub value: Vec<ValuePoint>,
    pub material: Vec<MaterialPoint>,
    pub quality: Vec<QualityPoint>,
    pub pareto: Vec<ParetoPoint>,
    pub equilibrium: Vec<EquilibriumPoint>,
    pub tension: Vec<TensionPoint>,
    pub uncertainty: Vec<UncertaintyPoint>,
    pub synergy: Vec<SynergyPoint>,
}

/// A labelled copy of the win-rate series kept for side-by-side comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Baseline {
    pub label: String,
    pub win_rate: Vec<WinRatePoint>,
}

#[derive(Debug, Clone, Default)]
pub struct GameTheoryTracker {
    series: GameTheorySeries,
}

impl GameTheoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn series(&self) -> &GameTheorySeries {
        &self.series
    }

    pub fn len(&self) -> usize {
        self.series.win_rate.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.win_rate.is_empty()
    }

    pub fn baseline(&self, label: impl Into<String>) -> Baseline {
        Baseline {
            label: label.into(),
            win_rate: self.series.win_rate.clone(),
        }
    }

    /// Append one point to every series. Windowed metrics look at the
    /// samples recorded before this call.
    pub fn record(
        &mut self,
        move_number: usize,
        eval: &Evaluation,
        quality: Option<f64>,
        config: &MetricsConfig,
    ) {
        let (black, white) = normalized_win_rates(eval.win_rate);

        let black_utility = eval.black_score;
        let white_utility = eval.white_score;
        let gap_abs = (black_utility - white_utility).abs();
        let efficiency =
            (1.0 - gap_abs / (black_utility + white_utility).max(1.0)).clamp(0.0, 1.0);

        let gap = (0.5 - black).abs();
        let stability = (1.0 - gap * 2.0).clamp(0.0, 1.0);
        let potential = ((efficiency + stability) / 2.0 * 1000.0).round() / 1000.0;

        let tension =
            (gap_abs / (black_utility.abs() + white_utility.abs()).max(1.0)).min(1.0);

        let uncertainty = self.uncertainty(config);
        let synergy = self.synergy(config);

        let s = &mut self.series;
        s.win_rate.push(WinRatePoint {
            move_number,
            black,
            white,
        });
        s.value.push(ValuePoint {
            move_number,
            value: eval.value,
        });
        s.material.push(MaterialPoint {
            move_number,
            black_captures: eval.black_captures,
            white_captures: eval.white_captures,
            black_territory: eval.black_territory,
            white_territory: eval.white_territory,
        });
        if let Some(quality) = quality {
            s.quality.push(QualityPoint {
                move_number,
                quality,
            });
        }
        s.pareto.push(ParetoPoint {
            move_number,
            black_utility,
            white_utility,
            efficiency,
        });
        s.equilibrium.push(EquilibriumPoint {
            move_number,
            gap,
            stability,
            potential,
        });
        s.tension.push(TensionPoint {
            move_number,
            tension,
        });
        s.uncertainty.push(UncertaintyPoint {
            move_number,
            uncertainty,
        });
        s.synergy.push(SynergyPoint {
            move_number,
            synergy,
        });
    }

    /// Scaled standard deviation of the trailing win-rate samples.
    fn uncertainty(&self, config: &MetricsConfig) -> f64 {
        let samples = &self.series.win_rate;
        let window = &samples[samples.len().saturating_sub(config.uncertainty_window)..];
        let std = if window.is_empty() {
            0.0
        } else {
            let n = window.len() as f64;
            let mean = window.iter().map(|p| p.black).sum::<f64>() / n;
            (window.iter().map(|p| (p.black - mean).powi(2)).sum::<f64>() / n).sqrt()
        };
        (std * config.uncertainty_scale).clamp(config.uncertainty_min, config.uncertainty_max)
    }

    /// Mean of the trailing move-quality samples.
    fn synergy(&self, config: &MetricsConfig) -> f64 {
        let samples = &self.series.quality;
        let window = &samples[samples.len().saturating_sub(config.synergy_window)..];
        if window.is_empty() {
            return config.neutral_quality;
        }
        let mean = window.iter().map(|p| p.quality).sum::<f64>() / window.len() as f64;
        mean.clamp(config.synergy_min, config.synergy_max)
    }
}

/// Black/White win probabilities that sum to one.
fn normalized_win_rates(win_rate: f64) -> (f64, f64) {
    let black = if win_rate.is_finite() {
        win_rate.clamp(0.0, 1.0)
    } else {
        0.5
    };
    let white = 1.0 - black;
    let total = black + white;
    if (total - 1.0).abs() > 1e-3 {
        (black / total, white / total)
    } else {
        (black, white)
    }
}
