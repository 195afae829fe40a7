//! The game engine runtime.
//!
//! ```text
//! EngineHandle ──commands──▶ GameEngine ──watch──▶ subscribers
//!                               ▲    │
//!            timers, catalog ───┘    └── reduce(state, event)
//! ```
//!
//! [`GameEngine`] is a single task that owns the [`GameState`](crate::core::GameState)
//! and applies one event at a time. Side tasks (the settle delay before a
//! match resolves, the one-second tick, the catalog fetch) send their
//! results back as events tagged with the generation and deal they were
//! started under. Any redeal aborts pending timer tasks, and the reducer
//! drops timer events that were already queued for an older board.

mod handle;
mod worker;

pub use handle::EngineHandle;
pub use worker::GameEngine;
