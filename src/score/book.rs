//! High-score list and player-name storage.
//!
//! ## Persisted format
//!
//! The list lives under one store key as a JSON array of
//! [`HighScoreEntry`], sorted by score (highest first) and capped at the
//! configured capacity. The last-used player name lives under a second key
//! as a plain string.
//!
//! Corrupt list data reads as an empty list and is overwritten by the next
//! successful [`record_score`](ScoreBook::record_score).

use serde::{Deserialize, Serialize};

use super::entry::HighScoreEntry;
use crate::core::GameConfig;
use crate::error::{ScoreError, ScoreResult};
use crate::store::KeyValueStore;

/// Outcome of changing the player name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameChange {
    /// Name stored before the change, if any.
    pub previous: Option<String>,
    /// Name now stored (trimmed).
    pub current: String,
}

impl NameChange {
    /// True when an existing, different name was replaced.
    #[must_use]
    pub fn replaced_existing(&self) -> bool {
        matches!(&self.previous, Some(prev) if *prev != self.current)
    }
}

/// Score and player-name book over a [`KeyValueStore`].
///
/// ## Example
///
/// ```
/// use flipzy::score::{HighScoreEntry, ScoreBook};
/// use flipzy::store::MemoryStore;
///
/// let mut book = ScoreBook::with_defaults(MemoryStore::new());
/// assert!(book.qualifies_as_high_score(1));
///
/// book.record_score(HighScoreEntry::new("ana", 250, 3, 2, 60)).unwrap();
/// assert_eq!(book.load_top_scores()[0].score, 250);
/// ```
#[derive(Clone, Debug)]
pub struct ScoreBook<S: KeyValueStore> {
    store: S,
    high_score_key: String,
    player_name_key: String,
    capacity: usize,
}

impl<S: KeyValueStore> ScoreBook<S> {
    /// Create a book using the keys and capacity from `config`.
    pub fn new(store: S, config: &GameConfig) -> Self {
        Self {
            store,
            high_score_key: config.high_score_key.clone(),
            player_name_key: config.player_name_key.clone(),
            capacity: config.high_score_capacity.max(1),
        }
    }

    /// Create a book with the default keys and capacity.
    pub fn with_defaults(store: S) -> Self {
        Self::new(store, &GameConfig::default())
    }

    /// Maximum entries kept.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // === High Scores ===

    /// Read the stored list. Absent, unreadable or malformed data is empty.
    #[must_use]
    pub fn load_top_scores(&self) -> Vec<HighScoreEntry> {
        let raw = match self.store.get(&self.high_score_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!("Could not read high scores: {}", err);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<HighScoreEntry>>(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!("Ignoring malformed high-score data: {}", err);
                Vec::new()
            }
        }
    }

    /// Add an entry, keep the best `capacity` by score, persist, and return
    /// the persisted list.
    ///
    /// Ties keep insertion order, so a new entry ranks below existing
    /// entries with the same score.
    pub fn record_score(&mut self, entry: HighScoreEntry) -> ScoreResult<Vec<HighScoreEntry>> {
        let mut entries = self.load_top_scores();
        entries.push(entry);
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(self.capacity);

        let json = serde_json::to_string(&entries)
            .map_err(|e| ScoreError::Serialization(e.to_string()))?;
        self.store.set(&self.high_score_key, &json)?;

        tracing::debug!("Persisted {} high score(s)", entries.len());
        Ok(entries)
    }

    /// True if `score` would enter the list.
    ///
    /// Any score qualifies while the list has room; once full, a score must
    /// beat the lowest stored score (a tie does not qualify).
    #[must_use]
    pub fn qualifies_as_high_score(&self, score: u32) -> bool {
        let entries = self.load_top_scores();
        if entries.len() < self.capacity {
            return true;
        }
        entries
            .iter()
            .map(|e| e.score)
            .min()
            .map_or(true, |lowest| score > lowest)
    }

    // === Player Name ===

    /// Last-used player name, if one is stored and non-blank.
    #[must_use]
    pub fn player_name(&self) -> Option<String> {
        match self.store.get(&self.player_name_key) {
            Ok(Some(name)) => {
                let name = name.trim();
                (!name.is_empty()).then(|| name.to_string())
            }
            Ok(None) => None,
            Err(err) => {
                tracing::warn!("Could not read player name: {}", err);
                None
            }
        }
    }

    /// Store a new player name.
    pub fn set_player_name(&mut self, name: &str) -> ScoreResult<NameChange> {
        let current = name.trim();
        if current.is_empty() {
            return Err(ScoreError::BlankPlayerName);
        }

        let previous = self.player_name();
        self.store.set(&self.player_name_key, current)?;

        Ok(NameChange {
            previous,
            current: current.to_string(),
        })
    }

    // === Store Access ===

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn book() -> ScoreBook<MemoryStore> {
        ScoreBook::with_defaults(MemoryStore::new())
    }

    fn seed_raw(book: &mut ScoreBook<MemoryStore>, json: &str) {
        book.store_mut().set("flipzy_high_scores", json).unwrap();
    }

    #[test]
    fn test_empty_book() {
        let book = book();
        assert!(book.load_top_scores().is_empty());
        assert!(book.qualifies_as_high_score(0));
        assert!(book.player_name().is_none());
    }

    #[test]
    fn test_record_and_load() {
        let mut book = book();
        let saved = book
            .record_score(HighScoreEntry::new("testUser", 250, 3, 2, 60))
            .unwrap();

        assert_eq!(saved.len(), 1);
        let loaded = book.load_top_scores();
        assert_eq!(loaded, saved);
        assert_eq!(loaded[0].player_name, "testUser");
        assert_eq!(loaded[0].score, 250);
    }

    #[test]
    fn test_record_keeps_top_three_sorted() {
        let mut book = book();
        for (name, score) in [("a", 100), ("b", 300), ("c", 200), ("d", 250), ("e", 50)] {
            book.record_score(HighScoreEntry::new(name, score, 1, 0, 0)).unwrap();
        }

        let scores: Vec<_> = book.load_top_scores().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![300, 250, 200]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut book = book();
        book.record_score(HighScoreEntry::new("first", 200, 2, 0, 0)).unwrap();
        let saved = book
            .record_score(HighScoreEntry::new("second", 200, 2, 0, 0))
            .unwrap();

        assert_eq!(saved[0].player_name, "first");
        assert_eq!(saved[1].player_name, "second");
    }

    #[test]
    fn test_qualifies_when_full() {
        let mut book = book();
        seed_raw(
            &mut book,
            r#"[{"score":300,"username":"PlayerA"},{"score":200,"username":"PlayerB"},{"score":100,"username":"PlayerC"}]"#,
        );

        assert!(book.qualifies_as_high_score(150));
        assert!(!book.qualifies_as_high_score(100));
        assert!(!book.qualifies_as_high_score(50));
        assert!(book.qualifies_as_high_score(350));
    }

    #[test]
    fn test_qualifies_when_not_full() {
        let mut book = book();
        seed_raw(
            &mut book,
            r#"[{"score":300,"username":"PlayerA"},{"score":200,"username":"PlayerB"}]"#,
        );

        assert!(book.qualifies_as_high_score(50));
        assert!(book.qualifies_as_high_score(250));
    }

    #[test]
    fn test_malformed_data_reads_empty_and_self_heals() {
        let mut book = book();
        seed_raw(&mut book, "{not json");

        assert!(book.load_top_scores().is_empty());
        assert!(book.qualifies_as_high_score(1));

        book.record_score(HighScoreEntry::new("ana", 90, 1, 1, 0)).unwrap();
        assert_eq!(book.load_top_scores().len(), 1);
    }

    #[test]
    fn test_player_name() {
        let mut book = book();

        let first = book.set_player_name("  Ana  ").unwrap();
        assert_eq!(first.current, "Ana");
        assert!(!first.replaced_existing());
        assert_eq!(book.player_name().as_deref(), Some("Ana"));

        let same = book.set_player_name("Ana").unwrap();
        assert!(!same.replaced_existing());

        let renamed = book.set_player_name("Bo").unwrap();
        assert!(renamed.replaced_existing());
        assert_eq!(renamed.previous.as_deref(), Some("Ana"));
    }

    #[test]
    fn test_blank_player_name_rejected() {
        let mut book = book();
        assert!(matches!(
            book.set_player_name("   "),
            Err(ScoreError::BlankPlayerName)
        ));
        assert!(book.player_name().is_none());
    }

    #[test]
    fn test_custom_capacity() {
        let config = GameConfig {
            high_score_capacity: 1,
            ..GameConfig::default()
        };
        let mut book = ScoreBook::new(MemoryStore::new(), &config);

        book.record_score(HighScoreEntry::new("a", 10, 1, 0, 0)).unwrap();
        book.record_score(HighScoreEntry::new("b", 20, 1, 0, 0)).unwrap();

        let entries = book.load_top_scores();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].player_name, "b");
        assert!(!book.qualifies_as_high_score(20));
    }
}
