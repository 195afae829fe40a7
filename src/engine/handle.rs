//! Client handle for a running engine.

use tokio::sync::{mpsc, oneshot, watch};

use super::worker::Command;
use crate::core::{CardId, GameEvent, GameState, GameView, Viewport};
use crate::error::{EngineError, EngineResult};

/// Cloneable handle to a [`GameEngine`](super::GameEngine).
///
/// Actions are queued and applied one at a time; each returns the state
/// right after its own transition. Reads (`state`, `view`) return the
/// latest published snapshot without a round-trip.
#[derive(Clone, Debug)]
pub struct EngineHandle {
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<GameState>,
    mobile_breakpoint: u32,
}

impl EngineHandle {
    pub(crate) fn new(
        commands: mpsc::Sender<Command>,
        state: watch::Receiver<GameState>,
        mobile_breakpoint: u32,
    ) -> Self {
        Self {
            commands,
            state,
            mobile_breakpoint,
        }
    }

    // === Actions ===

    /// Turn a hidden card face up.
    pub async fn flip_card(&self, card_id: impl Into<CardId>) -> EngineResult<GameState> {
        self.dispatch(GameEvent::FlipCard(card_id.into())).await
    }

    pub async fn increase_difficulty(&self) -> EngineResult<GameState> {
        self.dispatch(GameEvent::IncreaseDifficulty).await
    }

    /// Start a new game. Pending resolutions and ticks are discarded.
    pub async fn reset_game(&self) -> EngineResult<GameState> {
        self.dispatch(GameEvent::ResetGame).await
    }

    /// Report the viewport width in pixels.
    pub async fn set_viewport_width(&self, width: u32) -> EngineResult<GameState> {
        let viewport = Viewport::from_width(width, self.mobile_breakpoint);
        self.dispatch(GameEvent::ViewportChanged(viewport)).await
    }

    pub async fn start_timer(&self) -> EngineResult<GameState> {
        self.dispatch(GameEvent::StartTimer).await
    }

    pub async fn stop_timer(&self) -> EngineResult<GameState> {
        self.dispatch(GameEvent::StopTimer).await
    }

    pub async fn reset_timer(&self) -> EngineResult<GameState> {
        self.dispatch(GameEvent::ResetTimer).await
    }

    /// Reload the catalog if the last load failed.
    pub async fn retry_load(&self) -> EngineResult<GameState> {
        self.request(|reply| Command::RetryLoad { reply }).await
    }

    /// Stop the engine. Later calls on any handle fail.
    pub async fn shutdown(&self) -> EngineResult<()> {
        self.request(|reply| Command::Shutdown { reply }).await
    }

    // === Reads ===

    /// Latest published state.
    #[must_use]
    pub fn state(&self) -> GameState {
        self.state.borrow().clone()
    }

    /// Latest published state, derived for presentation.
    #[must_use]
    pub fn view(&self) -> GameView {
        GameView::from_state(&self.state.borrow())
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.state.clone()
    }

    /// Wait until the published state satisfies `predicate` and return it.
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&GameState) -> bool,
    ) -> EngineResult<GameState> {
        let mut state = self.state.clone();
        let matched = state
            .wait_for(predicate)
            .await
            .map_err(|_| EngineError::Stopped)?
            .clone();
        Ok(matched)
    }

    async fn dispatch(&self, event: GameEvent) -> EngineResult<GameState> {
        self.request(|reply| Command::Dispatch { event, reply }).await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> EngineResult<T> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| EngineError::CommandChannelClosed)?;
        response.await.map_err(EngineError::ReplyChannelClosed)
    }
}
