use std::future::Future;

use go_eval::{Stone, Suggestion};

use crate::error::HostError;

/// The request/response boundary to an external move-generation engine.
///
/// Vertices travel as GTP text (`"D4"`, `"pass"`); colours as [`Stone`].
/// Implementations own their timeouts.
pub trait EngineClient: Send + Sync + 'static {
    fn play(&self, stone: Stone, vertex: &str)
    -> impl Future<Output = Result<(), HostError>> + Send;

    /// Ask the engine to choose and play a move. Returns its GTP reply.
    fn genmove(&self, stone: Stone) -> impl Future<Output = Result<String, HostError>> + Send;

    /// The engine's board, one line per row (`X` black, `O` white).
    fn showboard(&self) -> impl Future<Output = Result<String, HostError>> + Send;

    fn suggestions(
        &self,
        stone: Stone,
        count: usize,
    ) -> impl Future<Output = Result<Vec<Suggestion>, HostError>> + Send;

    fn clear_board(&self) -> impl Future<Output = Result<(), HostError>> + Send;
}

/// Stand-in for sessions without an engine. Every request fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

impl EngineClient for Offline {
    async fn play(&self, _stone: Stone, _vertex: &str) -> Result<(), HostError> {
        Err(HostError::NotConnected)
    }

    async fn genmove(&self, _stone: Stone) -> Result<String, HostError> {
        Err(HostError::NotConnected)
    }

    async fn showboard(&self) -> Result<String, HostError> {
        Err(HostError::NotConnected)
    }

    async fn suggestions(&self, _stone: Stone, _count: usize) -> Result<Vec<Suggestion>, HostError> {
        Err(HostError::NotConnected)
    }

    async fn clear_board(&self) -> Result<(), HostError> {
        Err(HostError::NotConnected)
    }
}
