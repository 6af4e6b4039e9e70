//! High-score persistence through the real JSON file medium.

use std::fs;
use std::path::PathBuf;

use tui_snake::core::{GameState, JsonFileBackend, KvBackend, ScoreStore};
use tui_snake::types::{Grid, Position, HIGH_SCORE_KEY};

fn scratch_file(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "tui-snake-{}-{}.json",
        name,
        std::process::id()
    ));
    let _ = fs::remove_file(&path);
    path
}

fn file_store(path: &PathBuf) -> ScoreStore {
    ScoreStore::new(Some(Box::new(JsonFileBackend::new(path.clone()))))
}

fn stored_slot(path: &PathBuf) -> Option<String> {
    let text = fs::read_to_string(path).ok()?;
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    doc.get(HIGH_SCORE_KEY)
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

#[test]
fn test_high_score_survives_reopen() {
    let path = scratch_file("reopen");

    let mut store = file_store(&path);
    assert_eq!(store.get(), 0);
    assert!(store.set(70));
    assert_eq!(stored_slot(&path).as_deref(), Some("70"));

    let mut reopened = file_store(&path);
    assert_eq!(reopened.get(), 70);
    assert!(!reopened.set(40));
    assert_eq!(stored_slot(&path).as_deref(), Some("70"));

    let _ = fs::remove_file(&path);
}

#[test]
fn test_unrelated_slots_are_preserved() {
    let path = scratch_file("slots");
    fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

    let mut store = file_store(&path);
    assert!(store.set(30));
    store.clear();

    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc["theme"], "dark");
    assert!(doc.get(HIGH_SCORE_KEY).is_none());

    let _ = fs::remove_file(&path);
}

#[test]
fn test_corrupt_file_reads_as_zero() {
    let path = scratch_file("corrupt");
    fs::write(&path, "not json at all").unwrap();

    let aside = JsonFileBackend::new(path.clone()).corrupt_path();
    let _ = fs::remove_file(&aside);

    let mut store = file_store(&path);
    assert_eq!(store.get(), 0);
    // The unreadable file is kept aside, then a fresh one is written.
    assert!(store.set(20));
    assert_eq!(stored_slot(&path).as_deref(), Some("20"));
    assert_eq!(fs::read_to_string(&aside).unwrap(), "not json at all");

    let _ = fs::remove_file(&path);
    let _ = fs::remove_file(&aside);
}

#[test]
fn test_garbage_slot_reads_as_zero() {
    let path = scratch_file("garbage");
    let mut backend = JsonFileBackend::new(path.clone());
    backend.write(HIGH_SCORE_KEY, "lots").unwrap();

    assert_eq!(file_store(&path).get(), 0);

    let _ = fs::remove_file(&path);
}

#[test]
fn test_set_keeps_the_best() {
    let mut store = ScoreStore::volatile();
    assert!(store.set(50));
    assert!(!store.set(20));
    assert_eq!(store.get(), 50);
    assert!(!store.set(50));
}

#[test]
fn test_set_raw_rejects_non_numbers() {
    let mut store = ScoreStore::volatile();
    store.set(50);
    for raw in ["invalid", "-5", "NaN", "", "12.5"] {
        assert!(!store.set_raw(raw), "{:?}", raw);
        assert_eq!(store.get(), 50);
    }
    assert!(store.set_raw("90"));
    assert_eq!(store.get(), 90);
}

#[test]
fn test_no_medium_still_tracks_best() {
    let mut store = ScoreStore::new(None);
    assert!(!store.is_persistent());
    assert!(store.set(10));
    assert_eq!(store.get(), 10);
    store.clear();
    assert_eq!(store.get(), 0);
}

#[test]
fn test_game_writes_record_on_game_over() {
    let path = scratch_file("game");
    let mut game = GameState::new(Grid::new(10, 10).unwrap(), 3, file_store(&path));

    game.set_score(40);
    game.place_snake([Position::new(9, 5)]);
    game.advance();
    assert!(game.game_over());
    assert_eq!(game.high_score(), 40);
    assert_eq!(stored_slot(&path).as_deref(), Some("40"));

    game.reset();
    assert_eq!(game.high_score(), 40);

    game.clear_high_score();
    assert_eq!(game.high_score(), 0);
    assert_eq!(stored_slot(&path), None);

    let _ = fs::remove_file(&path);
}
