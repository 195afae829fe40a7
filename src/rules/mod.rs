//! Game rules as a pure transition function.
//!
//! - `board`: dealing a shuffled board from the catalog
//! - `reducer`: `reduce(&GameState, &GameEvent) -> GameState`
//!
//! The engine applies events strictly one at a time; nothing here touches
//! timers or I/O.

pub mod board;
pub mod reducer;

pub use board::deal_board;
pub use reducer::reduce;
