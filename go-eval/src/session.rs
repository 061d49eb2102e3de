use serde::Serialize;

use crate::Point;
use crate::config::{EvalConfig, RulesConfig, SelfCapturePolicy};
use crate::error::EvalError;
use crate::evaluation::{self, Evaluation};
use crate::goban::Goban;
use crate::history::{History, MoveRecord};
use crate::influence::{self, InfluenceField};
use crate::lifecycle::{Lifecycle, Status};
use crate::metrics::{Baseline, GameTheorySeries, GameTheoryTracker};
use crate::quality;
use crate::stone::Stone;
use crate::sync;

/// What a successful placement did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveOutcome {
    pub move_number: usize,
    pub point: Point,
    pub stone: Stone,
    pub captured: Vec<Point>,
    pub self_removed: Vec<Point>,
    pub quality: f64,
}

/// One game: the board, its history, and every derived projection.
///
/// All mutation goes through `&mut self`, so a session is single-writer by
/// construction. Every operation that fails leaves the session untouched,
/// except `play_external`, which still hands the turn over.
#[derive(Debug, Clone)]
pub struct Session {
    config: EvalConfig,
    goban: Goban,
    history: History,
    lifecycle: Lifecycle,
    evaluation: Evaluation,
    tracker: GameTheoryTracker,
    show_influence: bool,
    cached_influence: Option<InfluenceField>,
    baseline: Option<Baseline>,
}

impl Default for Session {
    fn default() -> Self {
        Self::build(EvalConfig::default())
    }
}

impl Session {
    /// Start a game. Fails on a board size or komi no board can use.
    pub fn new(config: EvalConfig) -> Result<Self, EvalError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EvalConfig) -> Self {
        let goban = Goban::with_size(config.board_size);
        let mut session = Self {
            config,
            goban,
            history: History::default(),
            lifecycle: Lifecycle::new(),
            evaluation: Evaluation::default(),
            tracker: GameTheoryTracker::new(),
            show_influence: false,
            cached_influence: None,
            baseline: None,
        };
        session.refresh_evaluation();
        session
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn goban(&self) -> &Goban {
        &self.goban
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    pub fn series(&self) -> &GameTheorySeries {
        self.tracker.series()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn status(&self) -> Status {
        self.lifecycle.status()
    }

    pub fn to_play(&self) -> Stone {
        self.lifecycle.to_play()
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    pub fn baseline(&self) -> Option<&Baseline> {
        self.baseline.as_ref()
    }

    pub fn show_influence(&self) -> bool {
        self.show_influence
    }

    /// The field cached by show-influence mode, if enabled.
    pub fn cached_influence(&self) -> Option<&InfluenceField> {
        self.cached_influence.as_ref()
    }

    /// Place a stone for the side to move.
    pub fn play(&mut self, point: Point) -> Result<MoveOutcome, EvalError> {
        self.play_as(point, self.lifecycle.to_play())
    }

    /// Place a stone of an explicit colour, then rescore the position and
    /// append one point to every metric series.
    pub fn play_as(&mut self, point: Point, stone: Stone) -> Result<MoveOutcome, EvalError> {
        let rules = self.config.rules;
        self.place(point, stone, &rules)
    }

    /// Record a move an engine has already made on its own board.
    ///
    /// Ko is not enforced and a forbidden self-capture removes the placing
    /// group instead, so no group is left without liberties. If the board
    /// still refuses the stone, the turn passes to the opponent anyway and
    /// the error is returned for the caller to resync.
    pub fn play_external(&mut self, point: Point, stone: Stone) -> Result<MoveOutcome, EvalError> {
        let mut rules = self.config.rules;
        rules.forbid_immediate_recapture = false;
        if rules.self_capture == SelfCapturePolicy::Forbid {
            rules.self_capture = SelfCapturePolicy::RemoveOwn;
        }

        let result = self.place(point, stone, &rules);
        if result.is_err() && self.lifecycle.status().is_playing() {
            self.lifecycle.on_placement(stone);
        }
        result
    }

    fn place(
        &mut self,
        point: Point,
        stone: Stone,
        rules: &RulesConfig,
    ) -> Result<MoveOutcome, EvalError> {
        self.lifecycle.ensure_playing()?;

        let placement = match self.goban.play(point, stone, rules) {
            Ok(placement) => placement,
            Err(err) => {
                tracing::debug!(?point, %stone, %err, "placement rejected");
                return Err(err);
            }
        };

        let move_number = self.history.len() + 1;
        let quality = quality::score(
            &self.goban,
            point,
            stone,
            placement.captured.len(),
            move_number,
            &self.config.quality,
        );

        self.history.record(
            MoveRecord {
                point,
                stone,
                quality,
            },
            &placement.captured,
            &placement.self_removed,
        );
        self.lifecycle.on_placement(stone);
        self.refresh_evaluation();
        self.tracker
            .record(move_number, &self.evaluation, Some(quality), &self.config.metrics);

        if !placement.captured.is_empty() {
            tracing::info!(move_number, %stone, count = placement.captured.len(), "captured stones");
        }
        tracing::debug!(
            move_number,
            ?point,
            %stone,
            quality,
            win_rate = self.evaluation.win_rate,
            "move applied"
        );

        Ok(MoveOutcome {
            move_number,
            point,
            stone,
            captured: placement.captured,
            self_removed: placement.self_removed,
            quality,
        })
    }

    /// The side to move passes. Returns the status afterwards.
    pub fn pass(&mut self) -> Result<Status, EvalError> {
        let passer = self.lifecycle.to_play();
        let status = self.lifecycle.pass(self.evaluation.score_diff())?;
        self.goban.pass();
        tracing::debug!(%passer, %status, "pass");
        Ok(status)
    }

    /// `stone` resigns. Returns the terminal status.
    pub fn resign(&mut self, stone: Stone) -> Result<Status, EvalError> {
        self.lifecycle.resign(stone)
    }

    /// Back to an empty board with no history and no baseline.
    /// Configuration and the show-influence flag survive.
    pub fn clear(&mut self) {
        self.goban.clear();
        self.history = History::default();
        self.lifecycle.reset();
        self.tracker = GameTheoryTracker::new();
        self.baseline = None;
        self.refresh_evaluation();
        tracing::info!("board cleared");
    }

    /// Recompute the evaluation snapshot from the board and histories.
    /// Calling it twice in a row yields the same snapshot.
    pub fn refresh_evaluation(&mut self) -> &Evaluation {
        let field = influence::aggregate(&self.goban, &self.config.influence);
        self.evaluation = evaluation::evaluate(
            &self.goban,
            self.history.capture_totals(),
            self.history.moves(),
            &field,
            &self.config,
        );
        self.cached_influence = self.show_influence.then_some(field);
        &self.evaluation
    }

    /// A freshly computed influence field.
    pub fn influence(&self) -> InfluenceField {
        influence::aggregate(&self.goban, &self.config.influence)
    }

    pub fn set_show_influence(&mut self, on: bool) {
        self.show_influence = on;
        self.cached_influence = on.then(|| self.influence());
    }

    /// Replace the stones with an authoritative board dump. Histories are
    /// kept. A malformed dump leaves the previous board in place, and a dump
    /// that matches the local stones keeps the ko state.
    pub fn resync(&mut self, dump: &str) -> Result<(), EvalError> {
        let goban = match sync::parse_board_dump(dump, self.config.board_size) {
            Ok(goban) => goban,
            Err(err) => {
                tracing::warn!(%err, "resync failed, keeping local board");
                return Err(err);
            }
        };
        if goban.board() != self.goban.board() {
            self.goban = goban;
        }
        self.refresh_evaluation();
        Ok(())
    }

    pub fn set_baseline(&mut self, label: impl Into<String>) {
        self.baseline = Some(self.tracker.baseline(label));
    }

    pub fn clear_baseline(&mut self) {
        self.baseline = None;
    }
}
