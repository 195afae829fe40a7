//! Core value types: cards, state, events, configuration, RNG.
//!
//! Nothing in this module performs I/O. The engine owns a [`GameState`],
//! feeds it [`GameEvent`]s through the reducer, and hands [`GameView`]s to
//! the presentation layer.

pub mod card;
pub mod config;
pub mod event;
pub mod rng;
pub mod state;
pub mod view;

pub use card::{Card, CardId, CardStatus, CatalogEntry};
pub use config::{DifficultyLimits, GameConfig, DEFAULT_CATALOG_URL};
pub use event::GameEvent;
pub use rng::GameRng;
pub use state::{GameState, LoadStatus, Viewport};
pub use view::GameView;
