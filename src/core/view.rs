//! Read-only snapshot handed to the presentation layer.

use serde::{Deserialize, Serialize};

use super::card::Card;
use super::state::{GameState, LoadStatus};

/// Everything a view needs to render one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub cards: Vec<Card>,
    pub matches: u32,
    pub mistakes: u32,
    pub total_pairs: usize,
    /// Matched share of the board, 0-100.
    pub progress_percent: u32,
    pub elapsed_seconds: u64,
    pub formatted_time: String,
    pub is_complete: bool,
    pub score: u32,
    pub difficulty: usize,
    pub max_difficulty: usize,
    pub can_increase_difficulty: bool,
    pub is_mobile: bool,
    pub is_loading: bool,
    pub has_error: bool,
}

impl GameView {
    /// Derive the view from a state snapshot.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        let total_pairs = state.total_pairs();
        let progress_percent = if total_pairs > 0 {
            ((state.matches as f64 / total_pairs as f64) * 100.0).round() as u32
        } else {
            0
        };

        Self {
            cards: state.board.iter().cloned().collect(),
            matches: state.matches,
            mistakes: state.mistakes,
            total_pairs,
            progress_percent,
            elapsed_seconds: state.elapsed_seconds,
            formatted_time: state.formatted_time(),
            is_complete: state.is_complete(),
            score: state.score(),
            difficulty: state.difficulty,
            max_difficulty: state.max_difficulty(),
            can_increase_difficulty: state.can_increase_difficulty(),
            is_mobile: state.viewport.is_mobile(),
            is_loading: state.load_status == LoadStatus::Loading,
            has_error: state.load_status == LoadStatus::Failed,
        }
    }
}

impl From<&GameState> for GameView {
    fn from(state: &GameState) -> Self {
        Self::from_state(state)
    }
}
