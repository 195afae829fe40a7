//! Score book integration tests against the file-backed store.

use flipzy::core::GameConfig;
use flipzy::score::{HighScoreEntry, ScoreBook};
use flipzy::store::{FileStore, KeyValueStore};

fn file_book(dir: &tempfile::TempDir) -> ScoreBook<FileStore> {
    ScoreBook::new(FileStore::new(dir.path()).unwrap(), &GameConfig::default())
}

#[test]
fn test_scores_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut book = file_book(&dir);
        book.set_player_name("Ana").unwrap();
        book.record_score(HighScoreEntry::new("Ana", 250, 3, 2, 60)).unwrap();
        book.record_score(HighScoreEntry::new("Bo", 300, 3, 0, 30)).unwrap();
    }

    let book = file_book(&dir);
    let scores = book.load_top_scores();
    assert_eq!(scores.len(), 2);
    assert_eq!(scores[0].player_name, "Bo");
    assert_eq!(scores[1].formatted_time, "01:00");
    assert_eq!(book.player_name().as_deref(), Some("Ana"));
}

#[test]
fn test_stored_json_uses_expected_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut book = file_book(&dir);
    book.record_score(HighScoreEntry::new("testUser", 250, 3, 2, 60)).unwrap();

    let raw = book.store().get("flipzy_high_scores").unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let row = &json[0];

    assert_eq!(row["username"], "testUser");
    assert_eq!(row["score"], 250);
    assert_eq!(row["matches"], 3);
    assert_eq!(row["mistakes"], 2);
    assert_eq!(row["elapsedTime"], 60);
    assert_eq!(row["formattedTime"], "01:00");
    assert!(row["date"].is_string());
}

#[test]
fn test_corrupt_file_reads_empty_and_heals() {
    let dir = tempfile::tempdir().unwrap();
    let mut book = file_book(&dir);
    book.store_mut().set("flipzy_high_scores", "[{broken").unwrap();

    assert!(book.load_top_scores().is_empty());

    let saved = book.record_score(HighScoreEntry::new("Ana", 120, 2, 1, 40)).unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(file_book(&dir).load_top_scores(), saved);
}

#[test]
fn test_legacy_rows_still_rank() {
    let dir = tempfile::tempdir().unwrap();
    let mut book = file_book(&dir);
    book.store_mut()
        .set("flipzy_high_scores", r#"[{"score":300,"username":"PlayerA"},{"score":100,"username":"PlayerC"}]"#)
        .unwrap();

    let saved = book.record_score(HighScoreEntry::new("Ana", 200, 2, 0, 0)).unwrap();
    let names: Vec<_> = saved.iter().map(|e| e.player_name.as_str()).collect();
    assert_eq!(names, vec!["PlayerA", "Ana", "PlayerC"]);

    assert!(!book.qualifies_as_high_score(100));
    assert!(book.qualifies_as_high_score(101));
}
