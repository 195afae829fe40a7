//! Events accepted by the reducer.
//!
//! Every state change is expressed as a [`GameEvent`] and applied through
//! [`reduce`](crate::rules::reduce). Timer-driven events carry the generation
//! and deal they were scheduled under so that callbacks outliving a reset or
//! a redeal are dropped.

use serde::{Deserialize, Serialize};

use super::card::{CardId, CatalogEntry};
use super::state::{GameState, Viewport};

/// A state transition request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A catalog fetch started (initial load or retry).
    LoadCatalogRequested,

    /// The catalog arrived.
    LoadCatalogSucceeded(Vec<CatalogEntry>),

    /// The catalog fetch failed. Retryable.
    LoadCatalogFailed { reason: String },

    /// The viewport class may have changed.
    ViewportChanged(Viewport),

    /// Deal a fresh board from the current catalog and difficulty.
    InitializeBoard,

    /// Turn a hidden card face up.
    FlipCard(CardId),

    /// Settle delay elapsed after the second flip.
    ResolvePendingMatch { generation: u64, deal: u64 },

    /// Add `difficulty_step` cards, up to the viewport ceiling.
    IncreaseDifficulty,

    /// Start a new generation and redeal.
    ResetGame,

    StartTimer,
    StopTimer,
    /// Stop the timer and zero elapsed time.
    ResetTimer,

    /// One timer interval elapsed.
    Tick { generation: u64, deal: u64 },
}

impl GameEvent {
    /// Resolution for the pair currently face up in `state`.
    #[must_use]
    pub fn resolve_for(state: &GameState) -> Self {
        GameEvent::ResolvePendingMatch {
            generation: state.generation,
            deal: state.deal,
        }
    }

    /// Tick for the board currently dealt in `state`.
    #[must_use]
    pub fn tick_for(state: &GameState) -> Self {
        GameEvent::Tick {
            generation: state.generation,
            deal: state.deal,
        }
    }

    /// Short name for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::LoadCatalogRequested => "load_catalog_requested",
            GameEvent::LoadCatalogSucceeded(_) => "load_catalog_succeeded",
            GameEvent::LoadCatalogFailed { .. } => "load_catalog_failed",
            GameEvent::ViewportChanged(_) => "viewport_changed",
            GameEvent::InitializeBoard => "initialize_board",
            GameEvent::FlipCard(_) => "flip_card",
            GameEvent::ResolvePendingMatch { .. } => "resolve_pending_match",
            GameEvent::IncreaseDifficulty => "increase_difficulty",
            GameEvent::ResetGame => "reset_game",
            GameEvent::StartTimer => "start_timer",
            GameEvent::StopTimer => "stop_timer",
            GameEvent::ResetTimer => "reset_timer",
            GameEvent::Tick { .. } => "tick",
        }
    }

    /// True for events produced by scheduled timers.
    #[must_use]
    pub fn is_timer_event(&self) -> bool {
        matches!(
            self,
            GameEvent::ResolvePendingMatch { .. } | GameEvent::Tick { .. }
        )
    }
}
