use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use go_eval::coord::{self, Vertex};
use go_eval::sync::{self as board_sync, Candidate};
use go_eval::{MoveOutcome, Point, Session, Status, Stone};
use tokio::task::JoinHandle;

use crate::client::{EngineClient, Offline};
use crate::config::{GameMode, HostConfig};
use crate::error::HostError;

/// Drives one [`Session`] against an optional external engine.
///
/// Only one engine round trip may be outstanding at a time: every action
/// takes the thinking latch first and fails with [`HostError::Busy`] when
/// it is already held. The latch is released on every exit path.
pub struct Driver<C> {
    inner: Arc<Inner<C>>,
}

impl<C> Clone for Driver<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<C> {
    client: Option<C>,
    config: HostConfig,
    session: tokio::sync::Mutex<Session>,
    thinking: AtomicBool,
    next_continuation: AtomicU64,
    state: Mutex<HostState>,
}

#[derive(Default)]
struct HostState {
    mode: GameMode,
    /// Bumped by every action that changes the game.
    turn: u64,
    suggestions: Vec<Candidate>,
    last_error: Option<String>,
    continuation: Option<Continuation>,
}

struct Continuation {
    id: u64,
    handle: JoinHandle<()>,
}

struct ThinkingGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for ThinkingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl Driver<Offline> {
    /// A driver with no engine: moves are applied locally only.
    pub fn offline(config: HostConfig) -> Result<Self, HostError> {
        Self::build(None, config)
    }
}

impl<C: EngineClient> Driver<C> {
    pub fn new(client: C, config: HostConfig) -> Result<Self, HostError> {
        Self::build(Some(client), config)
    }

    fn build(client: Option<C>, config: HostConfig) -> Result<Self, HostError> {
        let session = Session::new(config.eval.clone())?;
        let state = HostState {
            mode: config.mode,
            ..HostState::default()
        };
        Ok(Self {
            inner: Arc::new(Inner {
                client,
                config,
                session: tokio::sync::Mutex::new(session),
                thinking: AtomicBool::new(false),
                next_continuation: AtomicU64::new(0),
                state: Mutex::new(state),
            }),
        })
    }

    // -- Read-only projections --

    pub fn is_connected(&self) -> bool {
        self.inner.client.is_some()
    }

    pub fn is_thinking(&self) -> bool {
        self.inner.thinking.load(Ordering::Acquire)
    }

    pub fn config(&self) -> &HostConfig {
        &self.inner.config
    }

    pub fn mode(&self) -> GameMode {
        self.state().mode
    }

    pub fn suggestions(&self) -> Vec<Candidate> {
        self.state().suggestions.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.state().last_error.clone()
    }

    pub fn has_pending_continuation(&self) -> bool {
        self.state().continuation.is_some()
    }

    pub async fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&*self.inner.session.lock().await)
    }

    /// Local-only session tweaks (show-influence, baselines). Game moves go
    /// through the driver's own methods.
    pub async fn with_session_mut<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut *self.inner.session.lock().await)
    }

    // -- Actions --

    /// Pull the engine's board and suggestions, e.g. right after connecting.
    pub async fn synchronize(&self) -> Result<(), HostError> {
        let result = self.synchronize_inner().await;
        self.record(result)
    }

    async fn synchronize_inner(&self) -> Result<(), HostError> {
        let client = self.client()?;
        let _guard = self.latch()?;
        let mut session = self.inner.session.lock().await;
        let dump = client.showboard().await?;
        session.resync(&dump)?;
        self.update_suggestions(client, &session).await;
        Ok(())
    }

    /// Place a stone for the side to move. When connected the engine must
    /// accept the move before it is applied locally.
    pub async fn play(&self, point: Point) -> Result<MoveOutcome, HostError> {
        let result = self.play_inner(point).await;
        self.record(result)
    }

    async fn play_inner(&self, point: Point) -> Result<MoveOutcome, HostError> {
        let _guard = self.latch()?;
        let mut session = self.inner.session.lock().await;
        session.lifecycle().ensure_playing()?;
        let stone = session.to_play();
        // The engine only hears about moves the local rules allow.
        session
            .goban()
            .clone()
            .play(point, stone, &session.config().rules)?;

        let Some(client) = &self.inner.client else {
            let outcome = session.play(point)?;
            self.advance();
            return Ok(outcome);
        };

        let vertex = coord::to_gtp(point, session.goban().size())?;
        client.play(stone, &vertex).await?;
        let outcome = match session.play_as(point, stone) {
            Ok(outcome) => outcome,
            Err(e) => {
                // The engine accepted a move the local rules reject.
                Self::resync(client, &mut session).await;
                return Err(e.into());
            }
        };
        let turn = self.advance();
        Self::resync(client, &mut session).await;
        self.update_suggestions(client, &session).await;

        let playing = session.status().is_playing();
        drop(session);
        if playing && self.mode() == GameMode::VsEngine {
            self.schedule_continuation(self.inner.config.delays.after_human, turn);
        }
        Ok(outcome)
    }

    /// Let the engine choose and play a move for the side to move.
    pub async fn engine_move(&self) -> Result<Vertex, HostError> {
        let result = self.engine_move_inner().await;
        self.record(result)
    }

    async fn engine_move_inner(&self) -> Result<Vertex, HostError> {
        let client = self.client()?;
        let _guard = self.latch()?;
        let mut session = self.inner.session.lock().await;
        session.lifecycle().ensure_playing()?;
        let stone = session.to_play();

        let reply = client.genmove(stone).await?;
        let vertex = Vertex::parse(&reply, session.goban().size())
            .map_err(|_| HostError::Rejected(format!("unreadable genmove reply: {reply:?}")))?;

        match vertex {
            Vertex::Play(point) => {
                // The engine's board is authoritative for its own moves.
                if let Err(e) = session.play_external(point, stone) {
                    Self::resync(client, &mut session).await;
                    self.advance();
                    return Err(e.into());
                }
                Self::resync(client, &mut session).await;
                self.update_suggestions(client, &session).await;
            }
            Vertex::Pass => {
                session.pass()?;
            }
            Vertex::Resign => {
                session.resign(stone)?;
            }
        }
        let turn = self.advance();
        tracing::info!(%stone, reply = reply.trim(), status = %session.status(), "engine moved");

        let playing = session.status().is_playing();
        drop(session);
        if playing && self.mode() == GameMode::EngineOnly {
            self.schedule_continuation(self.inner.config.delays.between_engine, turn);
        }
        Ok(vertex)
    }

    /// The side to move passes. The engine is told when connected.
    pub async fn pass(&self) -> Result<Status, HostError> {
        let result = self.pass_inner().await;
        self.record(result)
    }

    async fn pass_inner(&self) -> Result<Status, HostError> {
        let _guard = self.latch()?;
        let mut session = self.inner.session.lock().await;
        session.lifecycle().ensure_playing()?;
        let stone = session.to_play();

        if let Some(client) = &self.inner.client {
            client.play(stone, "pass").await?;
        }
        let status = session.pass()?;
        let turn = self.advance();
        drop(session);

        if status.is_playing() && self.is_connected() && self.mode() == GameMode::VsEngine {
            self.schedule_continuation(self.inner.config.delays.after_human, turn);
        }
        Ok(status)
    }

    pub async fn resign(&self, stone: Stone) -> Result<Status, HostError> {
        let result = self.resign_inner(stone).await;
        self.record(result)
    }

    async fn resign_inner(&self, stone: Stone) -> Result<Status, HostError> {
        let _guard = self.latch()?;
        let status = self.inner.session.lock().await.resign(stone)?;
        self.advance();
        self.cancel_continuation();
        Ok(status)
    }

    /// Reset the game. A failed engine-side clear is logged and the local
    /// reset happens regardless.
    pub async fn clear(&self) -> Result<(), HostError> {
        let result = self.clear_inner().await;
        self.record(result)
    }

    async fn clear_inner(&self) -> Result<(), HostError> {
        let _guard = self.latch()?;
        self.cancel_continuation();
        let mut session = self.inner.session.lock().await;

        if let Some(client) = &self.inner.client {
            if let Err(e) = client.clear_board().await {
                tracing::warn!(error = %e, "engine clear_board failed, resetting locally");
            }
        }

        session.clear();
        let turn = self.advance();
        self.state().suggestions.clear();

        if let Some(client) = &self.inner.client {
            Self::resync(client, &mut session).await;
            self.update_suggestions(client, &session).await;
            drop(session);
            if self.mode() == GameMode::EngineOnly {
                self.schedule_continuation(self.inner.config.delays.after_reset, turn);
            }
        }
        Ok(())
    }

    /// Switch who plays. Entering [`GameMode::EngineOnly`] starts the engine
    /// after a short delay.
    pub async fn set_mode(&self, mode: GameMode) {
        self.cancel_continuation();
        let turn = {
            let mut state = self.state();
            state.mode = mode;
            state.turn
        };
        tracing::info!(%mode, "game mode changed");

        if mode == GameMode::EngineOnly && self.is_connected() {
            let playing = self.inner.session.lock().await.status().is_playing();
            if playing {
                self.schedule_continuation(self.inner.config.delays.after_reset, turn);
            }
        }
    }

    /// Ask the engine for fresh suggestions. Offline the list is empty.
    pub async fn refresh_suggestions(&self) {
        match &self.inner.client {
            Some(client) => {
                let session = self.inner.session.lock().await;
                self.update_suggestions(client, &session).await;
            }
            None => self.state().suggestions.clear(),
        }
    }

    // -- Internals --

    fn client(&self) -> Result<&C, HostError> {
        self.inner.client.as_ref().ok_or(HostError::NotConnected)
    }

    fn latch(&self) -> Result<ThinkingGuard<'_>, HostError> {
        self.inner
            .thinking
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| HostError::Busy)?;
        Ok(ThinkingGuard {
            flag: &self.inner.thinking,
        })
    }

    fn state(&self) -> MutexGuard<'_, HostState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn advance(&self) -> u64 {
        let mut state = self.state();
        state.turn += 1;
        state.turn
    }

    fn record<T>(&self, result: Result<T, HostError>) -> Result<T, HostError> {
        let mut state = self.state();
        match &result {
            Ok(_) => state.last_error = None,
            Err(HostError::Busy) => tracing::debug!("request dropped while thinking"),
            Err(e) => {
                tracing::warn!(error = %e, "request failed");
                state.last_error = Some(e.to_string());
            }
        }
        result
    }

    async fn resync(client: &C, session: &mut Session) {
        match client.showboard().await {
            Ok(dump) => {
                // A malformed dump is logged by the session and ignored.
                let _ = session.resync(&dump);
            }
            Err(e) => tracing::warn!(error = %e, "showboard failed, keeping local board"),
        }
    }

    async fn update_suggestions(&self, client: &C, session: &Session) {
        let count = self.inner.config.suggestions;
        let kept = if count == 0 {
            Vec::new()
        } else {
            match client.suggestions(session.to_play(), count).await {
                Ok(raw) => {
                    board_sync::filter_suggestions(&raw, session.goban(), session.to_play(), count)
                }
                Err(e) => {
                    tracing::debug!(error = %e, "suggestions unavailable");
                    Vec::new()
                }
            }
        };
        self.state().suggestions = kept;
    }

    /// Let the engine move after `delay`, unless the game has moved on by then.
    fn schedule_continuation(&self, delay: Duration, turn: u64) {
        let id = self.inner.next_continuation.fetch_add(1, Ordering::Relaxed);
        let driver = self.clone();

        let mut state = self.state();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            driver.fire_continuation(id, turn).await;
        });
        if let Some(stale) = state.continuation.replace(Continuation { id, handle }) {
            stale.handle.abort();
        }
        tracing::debug!(id, turn, ?delay, "continuation scheduled");
    }

    fn cancel_continuation(&self) {
        if let Some(pending) = self.state().continuation.take() {
            pending.handle.abort();
            tracing::debug!(id = pending.id, "continuation cancelled");
        }
    }

    async fn fire_continuation(&self, id: u64, turn: u64) {
        {
            let mut state = self.state();
            if !state.continuation.as_ref().is_some_and(|c| c.id == id) {
                return;
            }
            state.continuation = None;
            if state.turn != turn {
                tracing::debug!(id, turn, current = state.turn, "stale continuation dropped");
                return;
            }
        }
        if self.is_thinking() {
            tracing::debug!(id, "continuation skipped while thinking");
            return;
        }
        if !self.inner.session.lock().await.status().is_playing() {
            return;
        }

        tracing::debug!(id, "continuation fired");
        // Failures are already recorded as the last error.
        let _ = self.engine_move().await;
    }
}
