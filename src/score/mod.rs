//! Scoring and the persisted high-score list.
//!
//! - `formula`: pure score computation and `mm:ss` formatting
//! - `entry`: the persisted [`HighScoreEntry`] row
//! - `book`: [`ScoreBook`], the bounded high-score list plus the last-used
//!   player name, stored through a [`KeyValueStore`](crate::store::KeyValueStore)

pub mod book;
pub mod entry;
pub mod formula;

pub use book::{NameChange, ScoreBook};
pub use entry::HighScoreEntry;
pub use formula::{compute_score, format_elapsed};
