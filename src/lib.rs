//! # flipzy
//!
//! Game state engine for a memory-matching card game.
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: every state change is an event applied by
//!    `reduce(&GameState, &GameEvent) -> GameState`. The reducer does no I/O
//!    and owns its RNG, so a seed and an event log replay exactly.
//!
//! 2. **One Writer**: a single engine task applies events one at a time.
//!    Timers and the catalog fetch report back as events.
//!
//! 3. **Generation-Scoped Timers**: a reset bumps the generation and every
//!    deal bumps the deal counter. Pending match resolutions and ticks from
//!    an older generation or deal are dropped.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) snapshot clones via `im-rs`, so
//!   each transition publishes a full state cheaply.
//!
//! - **Coalesced Catalog**: the catalog is fetched at most once per process
//!   under concurrent demand and cached until invalidated.
//!
//! ## Modules
//!
//! - `core`: cards, state, events, configuration, RNG, presentation view
//! - `rules`: board dealing and the reducer
//! - `score`: score formula and the high-score book
//! - `store`: key-value persistence
//! - `catalog`: catalog sources and the caching provider
//! - `engine`: the event-loop task and its handle
//! - `session`: engine plus score book, recording finished games
//! - `error`: error types

pub mod catalog;
pub mod core;
pub mod engine;
pub mod error;
pub mod rules;
pub mod score;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    Card, CardId, CardStatus, CatalogEntry,
    GameConfig, GameEvent, GameRng, GameState, GameView,
    LoadStatus, Viewport,
};

pub use crate::rules::{deal_board, reduce};

pub use crate::score::{compute_score, format_elapsed, HighScoreEntry, NameChange, ScoreBook};

pub use crate::store::{FileStore, KeyValueStore, MemoryStore};

pub use crate::catalog::{CatalogProvider, CatalogSource, HttpCatalogSource, StaticCatalogSource};

pub use crate::engine::{EngineHandle, GameEngine};

pub use crate::session::{GameSession, RecordedScore};

pub use crate::error::{CatalogError, EngineError, ScoreError, SessionError, StoreError};
