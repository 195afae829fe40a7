//! The game state aggregate.
//!
//! ## GameState
//!
//! A single value owned by the engine and replaced wholesale on every
//! transition:
//! - Catalog and board (dealt cards in display order)
//! - The flipped set (0-2 card ids awaiting resolution)
//! - Counters: matches, mistakes, elapsed seconds
//! - Difficulty (card count), viewport class, load status
//! - Generation, which fences off timers scheduled before a reset
//! - The dealing RNG
//!
//! Board and catalog use `im` persistent vectors, so producing the next
//! snapshot clones in O(1) and unchanged parts are shared.
//!
//! ## Derived values
//!
//! `is_complete`, `max_difficulty`, `formatted_time` and `score` are computed
//! on demand and never stored.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::{Card, CardId, CatalogEntry};
use super::config::{DifficultyLimits, GameConfig};
use super::rng::GameRng;
use crate::score::{compute_score, format_elapsed};

/// Device class. Controls the card-count ceiling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Viewport {
    Mobile,
    #[default]
    Desktop,
}

impl Viewport {
    /// Classify a viewport width. Widths below `breakpoint` are mobile.
    #[must_use]
    pub fn from_width(width: u32, breakpoint: u32) -> Self {
        if width < breakpoint {
            Viewport::Mobile
        } else {
            Viewport::Desktop
        }
    }

    #[must_use]
    pub fn is_mobile(self) -> bool {
        self == Viewport::Mobile
    }
}

/// Catalog load progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    /// Retryable. The board is left as it was.
    Failed,
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    /// Entries available for dealing.
    pub catalog: Vector<CatalogEntry>,

    /// Dealt cards; order is display order.
    pub board: Vector<Card>,

    /// Cards currently face up awaiting resolution (at most two).
    pub flipped: SmallVec<[CardId; 2]>,

    pub matches: u32,
    pub mistakes: u32,

    /// Requested card count. The dealt count may be lower (see `playable_card_count`).
    pub difficulty: usize,

    /// Incremented on reset; timer events from older generations are discarded.
    pub generation: u64,

    /// Incremented on every fresh deal, including redeals within a generation.
    pub deal: u64,

    pub viewport: Viewport,
    pub load_status: LoadStatus,

    pub elapsed_seconds: u64,
    pub timer_running: bool,

    /// Card-count bounds.
    pub limits: DifficultyLimits,

    /// Dealing RNG.
    pub rng: GameRng,
}

impl GameState {
    /// Create the initial (loading, empty-board) state.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            catalog: Vector::new(),
            board: Vector::new(),
            flipped: SmallVec::new(),
            matches: 0,
            mistakes: 0,
            difficulty: config.initial_difficulty,
            generation: 0,
            deal: 0,
            viewport: Viewport::default(),
            load_status: LoadStatus::Loading,
            elapsed_seconds: 0,
            timer_running: false,
            limits: config.limits(),
            rng: GameRng::new(config.seed),
        }
    }

    // === Derived ===

    /// Card-count ceiling for the current viewport.
    #[must_use]
    pub fn max_difficulty(&self) -> usize {
        match self.viewport {
            Viewport::Mobile => self.limits.mobile_max,
            Viewport::Desktop => self.limits.desktop_max,
        }
    }

    /// Card count the next deal will aim for: difficulty clamped to the
    /// viewport ceiling, rounded down to even, at least 2.
    #[must_use]
    pub fn playable_card_count(&self) -> usize {
        let mut count = self.difficulty.min(self.max_difficulty());
        if count % 2 != 0 {
            count -= 1;
        }
        count.max(2)
    }

    /// Number of pairs on the board.
    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.board.len() / 2
    }

    /// True once every pair on a non-empty board is matched.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.matches > 0 && self.matches as usize == self.total_pairs()
    }

    /// Final score, or 0 while the game is in progress.
    #[must_use]
    pub fn score(&self) -> u32 {
        if self.is_complete() {
            compute_score(self.matches, self.mistakes, self.elapsed_seconds)
        } else {
            0
        }
    }

    /// Elapsed time as `mm:ss`.
    #[must_use]
    pub fn formatted_time(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }

    /// True if `IncreaseDifficulty` would change anything.
    #[must_use]
    pub fn can_increase_difficulty(&self) -> bool {
        (self.difficulty + self.limits.step).min(self.max_difficulty()) != self.difficulty
    }

    // === Lookup ===

    /// Find a card by id.
    #[must_use]
    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.board.iter().find(|c| &c.id == id)
    }

    /// Position of a card on the board.
    #[must_use]
    pub fn card_index(&self, id: &CardId) -> Option<usize> {
        self.board.iter().position(|c| &c.id == id)
    }

    /// True if a match resolution is pending.
    #[must_use]
    pub fn awaiting_resolution(&self) -> bool {
        self.flipped.len() == 2
    }
}
