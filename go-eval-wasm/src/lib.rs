use go_eval::sync::{self, Suggestion};
use go_eval::{CaptureRecord, EvalConfig, MoveRecord, Session, Stone, coord, territory};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// GTP label for `(row, col)`, or an empty string when out of range.
#[wasm_bindgen]
pub fn to_gtp(row: u8, col: u8, size: u8) -> String {
    coord::to_gtp((row, col), size).unwrap_or_default()
}

/// Returns JSON `[row, col]`, or `{ "error": "message" }`.
#[wasm_bindgen]
pub fn from_gtp(label: &str, size: u8) -> String {
    match coord::from_gtp(label, size) {
        Ok((row, col)) => format!("[{row},{col}]"),
        Err(e) => error_json(&e.to_string()),
    }
}

#[derive(Serialize)]
struct HistoryView<'a> {
    moves: &'a [MoveRecord],
    captures: &'a [CaptureRecord],
}

#[wasm_bindgen]
pub struct WasmSession {
    inner: Session,
    last_error: Option<String>,
}

impl WasmSession {
    fn wrap(inner: Session) -> Self {
        Self {
            inner,
            last_error: None,
        }
    }

    fn start(config: EvalConfig) -> Self {
        match Session::new(config) {
            Ok(session) => Self::wrap(session),
            Err(e) => Self::fallback(e.to_string()),
        }
    }

    /// A default session that remembers why the requested one was refused.
    fn fallback(reason: String) -> Self {
        Self {
            inner: Session::default(),
            last_error: Some(reason),
        }
    }

    fn track<T, E: std::fmt::Display>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(v) => {
                self.last_error = None;
                Some(v)
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                None
            }
        }
    }
}

#[wasm_bindgen]
impl WasmSession {
    #[wasm_bindgen(constructor)]
    pub fn new(size: u8, komi: f64) -> Self {
        let config = EvalConfig {
            board_size: size.clamp(2, go_eval::config::MAX_BOARD_SIZE),
            ..EvalConfig::default()
        }
        .with_komi(komi);
        Self::start(config)
    }

    /// Build from a (possibly partial) JSON `EvalConfig`. Invalid JSON falls
    /// back to the defaults and leaves the parse error in `last_error`.
    pub fn from_config_json(json: &str) -> Self {
        match EvalConfig::from_json(json) {
            Ok(config) => Self::start(config),
            Err(e) => Self::fallback(e.to_string()),
        }
    }

    // -- Game actions --

    /// Play for the side to move. On failure the reason is in `last_error`.
    pub fn try_play(&mut self, row: u8, col: u8) -> bool {
        let result = self.inner.play((row, col));
        self.track(result).is_some()
    }

    /// Play an explicit colour (1 black, -1 white).
    pub fn try_play_as(&mut self, row: u8, col: u8, stone: i8) -> bool {
        let Some(stone) = Stone::from_int(stone) else {
            self.last_error = Some(format!("invalid stone: {stone}"));
            return false;
        };
        let result = self.inner.play_as((row, col), stone);
        self.track(result).is_some()
    }

    /// Returns the status after the pass, or an empty string on failure.
    pub fn pass(&mut self) -> String {
        let result = self.inner.pass();
        self.track(result).map(|s| s.to_string()).unwrap_or_default()
    }

    pub fn resign(&mut self, stone: i8) -> String {
        let Some(stone) = Stone::from_int(stone) else {
            self.last_error = Some(format!("invalid stone: {stone}"));
            return String::new();
        };
        let result = self.inner.resign(stone);
        self.track(result).map(|s| s.to_string()).unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
        self.last_error = None;
    }

    /// Replace the stones with an engine board dump. A malformed dump keeps
    /// the current board.
    pub fn resync(&mut self, dump: &str) -> bool {
        let result = self.inner.resync(dump);
        self.track(result).is_some()
    }

    pub fn refresh(&mut self) {
        self.inner.refresh_evaluation();
    }

    pub fn set_show_influence(&mut self, on: bool) {
        self.inner.set_show_influence(on);
    }

    pub fn set_baseline(&mut self, label: &str) {
        self.inner.set_baseline(label);
    }

    pub fn clear_baseline(&mut self) {
        self.inner.clear_baseline();
    }

    pub fn last_error(&self) -> String {
        self.last_error.clone().unwrap_or_default()
    }

    // -- Accessors (WASM-friendly types) --

    pub fn board(&self) -> js_sys::Int8Array {
        js_sys::Int8Array::from(self.inner.goban().board())
    }

    pub fn size(&self) -> u8 {
        self.inner.goban().size()
    }

    pub fn to_play(&self) -> i8 {
        self.inner.to_play().to_int()
    }

    pub fn status(&self) -> String {
        self.inner.status().to_string()
    }

    pub fn move_count(&self) -> usize {
        self.inner.move_count()
    }

    /// Cheap pre-check for hover hints: empty, on the board, not a ko
    /// retake. Captures and self-capture are only known after playing.
    pub fn is_playable(&self, row: u8, col: u8) -> bool {
        let goban = self.inner.goban();
        let point = (row, col);
        self.inner.status().is_playing()
            && goban.on_board(point)
            && goban.stone_at(point).is_none()
            && !goban
                .ko()
                .is_some_and(|ko| ko.forbids(point, self.inner.to_play()))
    }

    pub fn ko_row(&self) -> i8 {
        match self.inner.goban().ko() {
            Some(ko) => ko.pos.0 as i8,
            None => -1,
        }
    }

    pub fn ko_col(&self) -> i8 {
        match self.inner.goban().ko() {
            Some(ko) => ko.pos.1 as i8,
            None => -1,
        }
    }

    pub fn last_move_gtp(&self) -> String {
        self.inner
            .history()
            .last_move()
            .and_then(|m| coord::to_gtp(m.point, self.size()).ok())
            .unwrap_or_default()
    }

    /// Row-major influence values in `[-1, 1]`. Uses the cached field when
    /// show-influence mode is on.
    pub fn influence(&self) -> js_sys::Float64Array {
        match self.inner.cached_influence() {
            Some(field) => js_sys::Float64Array::from(field.values()),
            None => js_sys::Float64Array::from(self.inner.influence().values()),
        }
    }

    /// Row-major ownership: 1 black, -1 white, 0 neutral or occupied.
    pub fn ownership(&self) -> js_sys::Int8Array {
        js_sys::Int8Array::from(territory::ownership(self.inner.goban()).as_slice())
    }

    // -- JSON projections --

    pub fn evaluation_json(&self) -> String {
        to_json(self.inner.evaluation(), "{}")
    }

    pub fn series_json(&self) -> String {
        to_json(self.inner.series(), "{}")
    }

    pub fn history_json(&self) -> String {
        let history = self.inner.history();
        to_json(
            &HistoryView {
                moves: history.moves(),
                captures: history.captures(),
            },
            r#"{"moves":[],"captures":[]}"#,
        )
    }

    pub fn lifecycle_json(&self) -> String {
        to_json(self.inner.lifecycle(), "{}")
    }

    /// The comparison baseline, or `null`.
    pub fn baseline_json(&self) -> String {
        to_json(&self.inner.baseline(), "null")
    }

    /// Filter raw engine suggestions against the local board.
    /// Returns a JSON array, best first.
    pub fn filter_suggestions(&self, json: &str, count: usize) -> String {
        let raw: Vec<Suggestion> = sync::parse_suggestions(json).unwrap_or_default();
        let kept = sync::filter_suggestions(&raw, self.inner.goban(), self.inner.to_play(), count);
        to_json(&kept, "[]")
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| fallback.to_string())
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}
