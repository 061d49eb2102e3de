//! Tunable constants for rules and heuristics.
//!
//! Every struct deserializes from a partial JSON document; absent keys keep
//! their defaults. The defaults are tuned for a 19x19 board.

use serde::{Deserialize, Serialize};

use crate::error::EvalError;

pub const DEFAULT_BOARD_SIZE: u8 = 19;
/// Largest board the GTP column alphabet can label.
pub const MAX_BOARD_SIZE: u8 = 19;
pub const DEFAULT_KOMI: f64 = 7.5;

/// What happens when a placement leaves the placing group without liberties
/// after opponent captures are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfCapturePolicy {
    /// Reject the placement, board unchanged.
    #[default]
    Forbid,
    /// Leave the stone on the board with zero liberties.
    Permit,
    /// Remove the placing group and credit the stones to the opponent.
    RemoveOwn,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub self_capture: SelfCapturePolicy,
    /// Reject retaking a single-stone ko on the very next move.
    pub forbid_immediate_recapture: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            self_capture: SelfCapturePolicy::Forbid,
            forbid_immediate_recapture: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfluenceWeights {
    /// Strength at Manhattan distance 0, 1 and 2.
    pub steps: [f64; 3],
    /// Amplitude of the exponential tail for distances 3..=4.
    pub near_tail: f64,
    /// Amplitude of the exponential tail for distances 5..=reach.
    pub far_tail: f64,
    pub reach: u32,
    pub friendly_scale: f64,
    pub opposing_scale: f64,
    /// Cells this close to any border are damped.
    pub edge_band: u8,
    pub edge_scale: f64,
}

impl Default for InfluenceWeights {
    fn default() -> Self {
        Self {
            steps: [1.0, 0.82, 0.55],
            near_tail: 0.32,
            far_tail: 0.14,
            reach: 6,
            friendly_scale: 1.2,
            opposing_scale: 0.35,
            edge_band: 2,
            edge_scale: 0.85,
        }
    }
}

impl InfluenceWeights {
    /// Undamped strength at a Manhattan distance.
    pub fn strength(&self, distance: u32) -> f64 {
        match distance {
            0..=2 => self.steps[distance as usize],
            d if d > self.reach => 0.0,
            d @ 3..=4 => self.near_tail * (-(f64::from(d) - 2.0) / 2.0).exp(),
            d => self.far_tail * (-(f64::from(d) - 4.0) / 2.0).exp(),
        }
    }
}

/// Blend of the five win-rate signals for one phase of the game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseWeights {
    pub influence: f64,
    pub territory: f64,
    pub capture: f64,
    pub stones: f64,
    pub stability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WinRateWeights {
    pub opening: PhaseWeights,
    pub middle: PhaseWeights,
    pub endgame: PhaseWeights,
    pub middle_from: usize,
    pub endgame_from: usize,

    pub influence_scale: f64,
    pub territory_scale: f64,
    pub capture_scale: f64,
    pub stone_scale: f64,
    pub stability_baseline: f64,
    pub stability_scale: f64,
    pub stability_window: usize,

    pub steepness: f64,

    pub uncertainty_start: f64,
    pub uncertainty_mid: f64,
    pub uncertainty_floor: f64,
    pub uncertainty_mid_from: usize,
    pub uncertainty_floor_from: usize,

    pub min_rate: f64,
    pub max_rate: f64,
}

impl Default for WinRateWeights {
    fn default() -> Self {
        Self {
            opening: PhaseWeights {
                influence: 0.45,
                territory: 0.25,
                capture: 0.15,
                stones: 0.1,
                stability: 0.05,
            },
            middle: PhaseWeights {
                influence: 0.35,
                territory: 0.3,
                capture: 0.15,
                stones: 0.1,
                stability: 0.1,
            },
            endgame: PhaseWeights {
                influence: 0.2,
                territory: 0.4,
                capture: 0.2,
                stones: 0.1,
                stability: 0.1,
            },
            middle_from: 40,
            endgame_from: 120,
            influence_scale: 120.0,
            territory_scale: 30.0,
            capture_scale: 12.0,
            stone_scale: 30.0,
            stability_baseline: 0.55,
            stability_scale: 0.45,
            stability_window: 8,
            steepness: 3.2,
            uncertainty_start: 0.2,
            uncertainty_mid: 0.13,
            uncertainty_floor: 0.08,
            uncertainty_mid_from: 30,
            uncertainty_floor_from: 100,
            min_rate: 0.03,
            max_rate: 0.97,
        }
    }
}

impl WinRateWeights {
    pub fn phase(&self, move_count: usize) -> &PhaseWeights {
        if move_count < self.middle_from {
            &self.opening
        } else if move_count < self.endgame_from {
            &self.middle
        } else {
            &self.endgame
        }
    }

    /// Share of the signal discarded toward 0.5, shrinking as the game matures.
    pub fn uncertainty(&self, move_count: usize) -> f64 {
        let n = move_count as f64;
        if move_count < self.uncertainty_mid_from {
            let span = self.uncertainty_mid_from as f64;
            self.uncertainty_start - (n / span) * (self.uncertainty_start - self.uncertainty_mid)
        } else if move_count < self.uncertainty_floor_from {
            let from = self.uncertainty_mid_from as f64;
            let span = (self.uncertainty_floor_from - self.uncertainty_mid_from) as f64;
            self.uncertainty_mid - ((n - from) / span) * (self.uncertainty_mid - self.uncertainty_floor)
        } else {
            self.uncertainty_floor
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityWeights {
    pub opening_base: f64,
    pub opening_ramp: f64,
    pub opening_until: usize,
    pub middle_base: f64,
    pub endgame_base: f64,
    pub endgame_from: usize,

    pub capture_per_stone: f64,
    pub capture_cap: f64,

    pub star_bonus: f64,
    pub star_until: usize,

    pub center_bonus: f64,
    pub center_falloff: f64,

    /// Rows/columns this close to a border count as corner or edge.
    pub edge_band: u8,
    pub corner_bonus: f64,
    pub edge_bonus: f64,

    pub connection_per_stone: f64,
    pub connection_cap: f64,
    /// Bonus for one, two, and three or more empty neighbours.
    pub liberty_bonus: [f64; 3],

    pub isolation_distance: u32,
    pub isolation_penalty: f64,

    pub min: f64,
    pub max: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            opening_base: 0.48,
            opening_ramp: 0.1,
            opening_until: 30,
            middle_base: 0.58,
            endgame_base: 0.62,
            endgame_from: 150,
            capture_per_stone: 0.08,
            capture_cap: 0.25,
            star_bonus: 0.03,
            star_until: 60,
            center_bonus: 0.02,
            center_falloff: 0.6,
            edge_band: 4,
            corner_bonus: 0.03,
            edge_bonus: 0.015,
            connection_per_stone: 0.02,
            connection_cap: 0.06,
            liberty_bonus: [0.01, 0.02, 0.03],
            isolation_distance: 15,
            isolation_penalty: 0.03,
            min: 0.25,
            max: 0.85,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub uncertainty_window: usize,
    pub uncertainty_scale: f64,
    pub uncertainty_min: f64,
    pub uncertainty_max: f64,
    pub synergy_window: usize,
    pub synergy_min: f64,
    pub synergy_max: f64,
    /// Quality assumed where none has been recorded yet.
    pub neutral_quality: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            uncertainty_window: 12,
            uncertainty_scale: 1.8,
            uncertainty_min: 0.05,
            uncertainty_max: 0.6,
            synergy_window: 8,
            synergy_min: 0.3,
            synergy_max: 0.9,
            neutral_quality: 0.55,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    pub board_size: u8,
    pub komi: f64,
    pub rules: RulesConfig,
    pub influence: InfluenceWeights,
    pub win_rate: WinRateWeights,
    pub quality: QualityWeights,
    pub metrics: MetricsConfig,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            komi: DEFAULT_KOMI,
            rules: RulesConfig::default(),
            influence: InfluenceWeights::default(),
            win_rate: WinRateWeights::default(),
            quality: QualityWeights::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl EvalConfig {
    /// Parse a (possibly partial) JSON config.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: EvalConfig = serde_json::from_str(json)?;
        config.validate().map_err(serde::de::Error::custom)?;
        Ok(config)
    }

    /// Check the values a session cannot be built from.
    pub fn validate(&self) -> Result<(), EvalError> {
        if self.board_size < 2 || self.board_size > MAX_BOARD_SIZE {
            return Err(EvalError::InvalidConfig(format!(
                "board_size must be between 2 and {MAX_BOARD_SIZE}, got {}",
                self.board_size
            )));
        }
        if !self.komi.is_finite() {
            return Err(EvalError::InvalidConfig(format!(
                "komi must be finite, got {}",
                self.komi
            )));
        }
        Ok(())
    }

    pub fn with_komi(mut self, komi: f64) -> Self {
        self.komi = komi;
        self
    }
}
