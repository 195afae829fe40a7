//! Game configuration.
//!
//! Everything the engine treats as a constant lives here so tests and hosts
//! can tune it: board size limits, timer durations, persistence keys and the
//! catalog endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default content endpoint for the card catalog.
pub const DEFAULT_CATALOG_URL: &str =
    "https://fed-team.modyo.cloud/api/content/spaces/animals/types/game/entries?per_page=20";

/// Engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Card count dealt for a fresh session.
    pub initial_difficulty: usize,

    /// Card count ceiling on mobile viewports.
    pub mobile_max_cards: usize,

    /// Card count ceiling on desktop viewports.
    pub desktop_max_cards: usize,

    /// Cards added per difficulty increase.
    pub difficulty_step: usize,

    /// Viewport widths strictly below this are mobile.
    pub mobile_breakpoint: u32,

    /// Wait after the second flip before resolving, in milliseconds.
    pub settle_delay_ms: u64,

    /// Timer resolution, in milliseconds. One tick adds one elapsed second.
    pub tick_interval_ms: u64,

    /// Entries kept in the high-score list.
    pub high_score_capacity: usize,

    /// Store key for the high-score list.
    pub high_score_key: String,

    /// Store key for the last-used player name.
    pub player_name_key: String,

    /// Catalog endpoint.
    pub catalog_url: String,

    /// Seed for the dealing RNG.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_difficulty: 12,
            mobile_max_cards: 12,
            desktop_max_cards: 40,
            difficulty_step: 2,
            mobile_breakpoint: 768,
            settle_delay_ms: 800,
            tick_interval_ms: 1000,
            high_score_capacity: 3,
            high_score_key: "flipzy_high_scores".to_string(),
            player_name_key: "username".to_string(),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Build a config from `FLIPZY_*` environment variables.
    ///
    /// Unset or unparseable variables keep their defaults, except the seed,
    /// which falls back to the system clock so separate sessions deal
    /// different boards.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("FLIPZY_CATALOG_URL") {
            let url = url.trim();
            if !url.is_empty() {
                config.catalog_url = url.to_string();
            }
        }

        config.seed = read_env::<u64>("FLIPZY_SEED").unwrap_or_else(clock_seed);

        if let Some(ms) = read_env::<u64>("FLIPZY_SETTLE_DELAY_MS") {
            config.settle_delay_ms = ms;
        }
        if let Some(ms) = read_env::<u64>("FLIPZY_TICK_MS") {
            config.tick_interval_ms = ms.max(1);
        }
        if let Some(cards) = read_env::<usize>("FLIPZY_INITIAL_DIFFICULTY") {
            config.initial_difficulty = cards;
        }

        config
    }

    /// Set the dealing seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the starting card count.
    #[must_use]
    pub fn with_initial_difficulty(mut self, cards: usize) -> Self {
        self.initial_difficulty = cards;
        self
    }

    /// Set the settle delay.
    #[must_use]
    pub fn with_settle_delay_ms(mut self, ms: u64) -> Self {
        self.settle_delay_ms = ms;
        self
    }

    /// Set the catalog endpoint.
    #[must_use]
    pub fn with_catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = url.into();
        self
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Card limits handed to the game state.
    #[must_use]
    pub fn limits(&self) -> DifficultyLimits {
        DifficultyLimits {
            mobile_max: self.mobile_max_cards,
            desktop_max: self.desktop_max_cards,
            step: self.difficulty_step,
        }
    }
}

/// Card-count bounds carried inside the state so transitions stay pure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyLimits {
    pub mobile_max: usize,
    pub desktop_max: usize,
    pub step: usize,
}

impl Default for DifficultyLimits {
    fn default() -> Self {
        GameConfig::default().limits()
    }
}

fn read_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}
