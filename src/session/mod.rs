//! A game session: a running engine plus the score book.
//!
//! [`GameSession`] watches for completed games and records each one once
//! for the current player, so the presentation layer only has to render the
//! top scores and highlight the entry that was just added.

use serde::{Deserialize, Serialize};

use crate::core::GameState;
use crate::engine::EngineHandle;
use crate::error::{ScoreResult, SessionResult};
use crate::score::{HighScoreEntry, NameChange, ScoreBook};
use crate::store::KeyValueStore;

/// A score recorded for a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedScore {
    pub entry: HighScoreEntry,
    /// 1-based position in the stored list, or `None` if it did not place.
    pub rank: Option<usize>,
}

/// Engine handle bound to a score book.
pub struct GameSession<S: KeyValueStore> {
    engine: EngineHandle,
    book: ScoreBook<S>,
    /// Completion seen on the last observed state, keyed by generation.
    completed: Option<u64>,
    current: Option<RecordedScore>,
}

impl<S: KeyValueStore> GameSession<S> {
    pub fn new(engine: EngineHandle, book: ScoreBook<S>) -> Self {
        Self {
            engine,
            book,
            completed: None,
            current: None,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    #[must_use]
    pub fn book(&self) -> &ScoreBook<S> {
        &self.book
    }

    /// Stored high scores, best first.
    #[must_use]
    pub fn top_scores(&self) -> Vec<HighScoreEntry> {
        self.book.load_top_scores()
    }

    /// The score recorded for the most recent finished game, if any.
    #[must_use]
    pub fn current_score(&self) -> Option<&RecordedScore> {
        self.current.as_ref()
    }

    /// True if `entry` is the one recorded for the most recent game.
    #[must_use]
    pub fn is_current(&self, entry: &HighScoreEntry) -> bool {
        self.current.as_ref().is_some_and(|c| &c.entry == entry)
    }

    #[must_use]
    pub fn player_name(&self) -> Option<String> {
        self.book.player_name()
    }

    /// Change the player name. Returns whether an earlier name was replaced.
    pub fn set_player_name(&mut self, name: &str) -> ScoreResult<NameChange> {
        let change = self.book.set_player_name(name)?;
        if change.replaced_existing() {
            tracing::info!(
                "Player name updated from {:?} to {:?}",
                change.previous,
                change.current
            );
        }
        Ok(change)
    }

    /// Record `state` if it is a game that just completed.
    ///
    /// Each completed game is recorded at most once. Nothing is recorded
    /// without a player name or with a zero score.
    pub fn record_if_complete(&mut self, state: &GameState) -> ScoreResult<Option<RecordedScore>> {
        if !state.is_complete() {
            self.completed = None;
            return Ok(None);
        }
        if self.completed == Some(state.generation) {
            return Ok(None);
        }
        self.completed = Some(state.generation);

        let score = state.score();
        if score == 0 {
            tracing::debug!("Completed game scored 0; not recorded");
            return Ok(None);
        }
        let Some(name) = self.book.player_name() else {
            tracing::debug!("No player name set; score {} not recorded", score);
            return Ok(None);
        };

        let entry = HighScoreEntry::new(
            name,
            score,
            state.matches,
            state.mistakes,
            state.elapsed_seconds,
        );
        let saved = self.book.record_score(entry.clone())?;
        let rank = saved.iter().position(|e| e == &entry).map(|i| i + 1);

        tracing::info!(
            "Recorded score {} for {} (rank {:?})",
            entry.score,
            entry.player_name,
            rank
        );

        let recorded = RecordedScore { entry, rank };
        self.current = Some(recorded.clone());
        Ok(Some(recorded))
    }

    /// Wait for the next game to complete and record it.
    ///
    /// If the current game is already complete and recorded, waits for a
    /// new game first.
    pub async fn next_completion(&mut self) -> SessionResult<Option<RecordedScore>> {
        if let Some(generation) = self.completed {
            self.engine
                .wait_for(|s| !s.is_complete() || s.generation != generation)
                .await?;
            self.completed = None;
        }

        let state = self.engine.wait_for(GameState::is_complete).await?;
        Ok(self.record_if_complete(&state)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogProvider, StaticCatalogSource};
    use crate::core::{Card, CardStatus, CatalogEntry, GameConfig};
    use crate::engine::GameEngine;
    use crate::store::MemoryStore;

    fn finished_state(mistakes: u32, elapsed: u64) -> GameState {
        let mut state = GameState::new(&GameConfig::default());
        for card in Card::pair(&CatalogEntry::new("a", "A", "a")) {
            state.board.push_back(card.with_status(CardStatus::Matched));
        }
        state.matches = 1;
        state.mistakes = mistakes;
        state.elapsed_seconds = elapsed;
        state
    }

    async fn session() -> GameSession<MemoryStore> {
        let provider = CatalogProvider::new(StaticCatalogSource::new(Vec::new()));
        let engine = GameEngine::spawn(GameConfig::default(), provider);
        GameSession::new(engine, ScoreBook::with_defaults(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_records_once_per_game() {
        let mut session = session().await;
        session.set_player_name("Ana").unwrap();

        let state = finished_state(0, 10);
        let recorded = session.record_if_complete(&state).unwrap().unwrap();
        assert_eq!(recorded.entry.score, 95);
        assert_eq!(recorded.rank, Some(1));
        assert!(session.is_current(&session.top_scores()[0]));

        assert!(session.record_if_complete(&state).unwrap().is_none());
        assert_eq!(session.top_scores().len(), 1);
    }

    #[tokio::test]
    async fn test_requires_name_and_positive_score() {
        let mut session = session().await;
        assert!(session
            .record_if_complete(&finished_state(0, 10))
            .unwrap()
            .is_none());

        session.set_player_name("Ana").unwrap();
        let mut next = finished_state(10, 0);
        next.generation = 1;
        assert!(session.record_if_complete(&next).unwrap().is_none());
        assert!(session.top_scores().is_empty());
    }

    #[tokio::test]
    async fn test_new_generation_records_again() {
        let mut session = session().await;
        session.set_player_name("Ana").unwrap();

        session.record_if_complete(&finished_state(0, 10)).unwrap();
        let mut again = finished_state(1, 10);
        again.generation = 1;
        let recorded = session.record_if_complete(&again).unwrap().unwrap();

        assert_eq!(recorded.rank, Some(2));
        assert_eq!(session.top_scores().len(), 2);
    }
}
