//! High-score entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::formula::format_elapsed;

/// One row of the persisted high-score list.
///
/// Field names on disk follow the stored format (`username`, `elapsedTime`,
/// `formattedTime`, `date`). Missing fields default so that older, partial
/// rows still rank by score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreEntry {
    #[serde(rename = "username", default)]
    pub player_name: String,

    pub score: u32,

    #[serde(default)]
    pub matches: u32,

    #[serde(default)]
    pub mistakes: u32,

    #[serde(rename = "elapsedTime", default)]
    pub elapsed_seconds: u64,

    #[serde(default)]
    pub formatted_time: String,

    #[serde(rename = "date", default)]
    pub timestamp: DateTime<Utc>,
}

impl HighScoreEntry {
    /// Build an entry stamped with the current time.
    pub fn new(
        player_name: impl Into<String>,
        score: u32,
        matches: u32,
        mistakes: u32,
        elapsed_seconds: u64,
    ) -> Self {
        Self {
            player_name: player_name.into(),
            score,
            matches,
            mistakes,
            elapsed_seconds,
            formatted_time: format_elapsed(elapsed_seconds),
            timestamp: Utc::now(),
        }
    }

    /// Override the timestamp.
    #[must_use]
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
