#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use go_eval::coord;
use go_eval::{EvalConfig, Goban, Point, RulesConfig, SelfCapturePolicy, Stone, Suggestion};
use go_eval_host::{Driver, EngineClient, GameMode, HostConfig, HostError};
use tokio::sync::Notify;

/// Scripted in-memory engine. Clones share state, so a test keeps one
/// handle for inspection after giving another to the driver.
#[derive(Clone)]
pub struct FakeEngine {
    state: Arc<Mutex<FakeState>>,
    gate: Arc<Notify>,
}

pub struct FakeState {
    pub goban: Goban,
    pub genmove_replies: VecDeque<String>,
    pub suggestions: Vec<Suggestion>,
    pub commands: Vec<String>,
    pub fail_play: bool,
    pub fail_clear: bool,
    pub fail_showboard: bool,
    pub fail_suggestions: bool,
    pub malformed_board: bool,
    pub hold_genmove: bool,
    /// Tromp-Taylor style: suicide removes the group and ko is not checked.
    pub lenient: bool,
}

impl FakeEngine {
    pub fn new(size: u8) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                goban: Goban::with_size(size),
                genmove_replies: VecDeque::new(),
                suggestions: Vec::new(),
                commands: Vec::new(),
                fail_play: false,
                fail_clear: false,
                fail_showboard: false,
                fail_suggestions: false,
                malformed_board: false,
                hold_genmove: false,
                lenient: false,
            })),
            gate: Arc::new(Notify::new()),
        }
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn script(&self, replies: &[&str]) {
        self.state()
            .genmove_replies
            .extend(replies.iter().map(|r| r.to_string()));
    }

    /// Put a stone on the engine's board without telling the driver.
    pub fn sneak(&self, point: Point, stone: Stone) {
        self.state().goban.place(point, stone).unwrap();
    }

    pub fn release_genmove(&self) {
        self.gate.notify_one();
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.state()
            .commands
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn apply(&self, stone: Stone, vertex: &str) -> Result<(), HostError> {
        let mut state = self.state();
        if vertex.eq_ignore_ascii_case("pass") || vertex.eq_ignore_ascii_case("resign") {
            return Ok(());
        }
        let size = state.goban.size();
        let point = coord::from_gtp(vertex, size).map_err(|e| HostError::Rejected(e.to_string()))?;
        let rules = if state.lenient {
            RulesConfig {
                self_capture: SelfCapturePolicy::RemoveOwn,
                forbid_immediate_recapture: false,
            }
        } else {
            RulesConfig::default()
        };
        state
            .goban
            .play(point, stone, &rules)
            .map(|_| ())
            .map_err(|e| HostError::Rejected(e.to_string()))
    }
}

impl EngineClient for FakeEngine {
    async fn play(&self, stone: Stone, vertex: &str) -> Result<(), HostError> {
        {
            let mut state = self.state();
            state.commands.push(format!("play {} {vertex}", stone.letter()));
            if state.fail_play {
                return Err(HostError::Transport("connection reset".to_string()));
            }
        }
        self.apply(stone, vertex)
    }

    async fn genmove(&self, stone: Stone) -> Result<String, HostError> {
        let hold = {
            let mut state = self.state();
            state.commands.push(format!("genmove {}", stone.letter()));
            state.hold_genmove
        };
        if hold {
            self.gate.notified().await;
        }
        let reply = self
            .state()
            .genmove_replies
            .pop_front()
            .ok_or_else(|| HostError::Rejected("no scripted move".to_string()))?;
        self.apply(stone, &reply)?;
        Ok(reply)
    }

    async fn showboard(&self) -> Result<String, HostError> {
        let mut state = self.state();
        state.commands.push("showboard".to_string());
        if state.fail_showboard {
            return Err(HostError::Transport("timeout".to_string()));
        }
        if state.malformed_board {
            return Ok("not a board".to_string());
        }
        let goban = &state.goban;
        let size = goban.size();
        let mut dump = String::new();
        for row in 0..size {
            for col in 0..size {
                dump.push(match goban.stone_at((row, col)) {
                    Some(Stone::Black) => 'X',
                    Some(Stone::White) => 'O',
                    None => '.',
                });
            }
            dump.push('\n');
        }
        Ok(dump)
    }

    async fn suggestions(&self, stone: Stone, count: usize) -> Result<Vec<Suggestion>, HostError> {
        let mut state = self.state();
        state
            .commands
            .push(format!("suggestions {} {count}", stone.letter()));
        if state.fail_suggestions {
            return Err(HostError::Transport("timeout".to_string()));
        }
        Ok(state.suggestions.clone())
    }

    async fn clear_board(&self) -> Result<(), HostError> {
        let mut state = self.state();
        state.commands.push("clear_board".to_string());
        if state.fail_clear {
            return Err(HostError::Transport("engine gone".to_string()));
        }
        state.goban.clear();
        Ok(())
    }
}

pub fn host_config(size: u8, mode: GameMode) -> HostConfig {
    HostConfig {
        eval: EvalConfig {
            board_size: size,
            ..EvalConfig::default()
        },
        mode,
        suggestions: 3,
        ..HostConfig::default()
    }
}

pub fn connected(size: u8, mode: GameMode) -> (Driver<FakeEngine>, FakeEngine) {
    let engine = FakeEngine::new(size);
    let driver = Driver::new(engine.clone(), host_config(size, mode)).unwrap();
    (driver, engine)
}

/// Let spawned tasks run until they block.
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
