use std::fmt;
use std::time::Duration;

use go_eval::EvalConfig;
use serde::{Deserialize, Serialize};

use crate::error::HostError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Every move comes from the console or UI.
    #[default]
    Manual,
    /// The engine answers each human move.
    VsEngine,
    /// The engine plays both sides.
    EngineOnly,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Manual => write!(f, "manual"),
            GameMode::VsEngine => write!(f, "vs_engine"),
            GameMode::EngineOnly => write!(f, "engine_only"),
        }
    }
}

impl std::str::FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(GameMode::Manual),
            "vs_engine" => Ok(GameMode::VsEngine),
            "engine_only" => Ok(GameMode::EngineOnly),
            _ => Err(format!("unknown game mode: {s}")),
        }
    }
}

/// Delays before the engine takes its turn on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinuationDelays {
    pub after_human: Duration,
    pub between_engine: Duration,
    pub after_reset: Duration,
}

impl Default for ContinuationDelays {
    fn default() -> Self {
        Self {
            after_human: Duration::from_millis(400),
            between_engine: Duration::from_millis(800),
            after_reset: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub eval: EvalConfig,
    pub mode: GameMode,
    /// How many engine suggestions to keep; 0 disables them.
    pub suggestions: usize,
    pub delays: ContinuationDelays,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            eval: EvalConfig::default(),
            mode: GameMode::Manual,
            suggestions: 5,
            delays: ContinuationDelays::default(),
        }
    }
}

impl HostConfig {
    pub fn from_env() -> Result<Self, HostError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unset variables keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HostError> {
        let mut config = HostConfig::default();

        if let Some(path) = lookup("GO_EVAL_CONFIG") {
            let json = std::fs::read_to_string(&path)
                .map_err(|e| HostError::Config(format!("{path}: {e}")))?;
            config.eval =
                EvalConfig::from_json(&json).map_err(|e| HostError::Config(format!("{path}: {e}")))?;
        }

        if let Some(komi) = lookup("GO_EVAL_KOMI") {
            config.eval.komi = komi
                .trim()
                .parse()
                .ok()
                .filter(|k: &f64| k.is_finite())
                .ok_or_else(|| HostError::Config(format!("GO_EVAL_KOMI: not a number: {komi}")))?;
        }

        if let Some(mode) = lookup("GO_EVAL_MODE") {
            config.mode = mode.trim().parse().map_err(HostError::Config)?;
        }

        if let Some(count) = lookup("GO_EVAL_SUGGESTIONS") {
            config.suggestions = count.trim().parse().map_err(|_| {
                HostError::Config(format!("GO_EVAL_SUGGESTIONS: not a count: {count}"))
            })?;
        }

        config
            .eval
            .validate()
            .map_err(|e| HostError::Config(e.to_string()))?;
        Ok(config)
    }
}
