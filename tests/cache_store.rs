use chatcache::{
    canonicalize, CacheEntry, CacheKey, CachedResponse, Config, Error, FileCacheStore, RawRequest,
};
use std::fs;
use tempfile::tempdir;

fn store_in(dir: &std::path::Path) -> FileCacheStore {
    FileCacheStore::open(&Config::new(dir.join("cache"), dir.join("memory.jsonl")))
}

fn entry_for(prompt: &str) -> CacheEntry {
    let request = canonicalize(&RawRequest {
        model: "test-model",
        prompt,
        temperature: "0.7",
        ..Default::default()
    })
    .unwrap();
    CacheEntry::new(request, CachedResponse::text_only("a response")).unwrap()
}

#[test]
fn put_then_get_returns_the_entry() {
    let dir = tempdir().unwrap();
    let store = store_in(dir.path());
    let entry = entry_for("hello");
    store.put(&entry).unwrap();

    let found = store.get(&entry.key).unwrap().expect("entry should exist");
    assert_eq!(found, entry);
    assert!(store.contains(&entry.key));
}

#[test]
fn get_of_unknown_key_is_none() {
    let dir = tempdir().unwrap();
    let store = store_in(dir.path());
    let missing = CacheKey::from("0".repeat(64));
    assert!(store.get(&missing).unwrap().is_none());
    assert!(!store.contains(&missing));
}

#[test]
fn put_is_idempotent() {
    let dir = tempdir().unwrap();
    let store = store_in(dir.path());
    let entry = entry_for("hello");

    store.put(&entry).unwrap();
    store.put(&entry).unwrap();

    assert_eq!(store.get(&entry.key).unwrap().unwrap(), entry);
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn put_leaves_no_scratch_files() {
    let dir = tempdir().unwrap();
    let store = store_in(dir.path());
    store.put(&entry_for("hello")).unwrap();

    let stray: Vec<_> = fs::read_dir(dir.path().join("cache"))
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|x| x.to_str()) != Some("json"))
        .collect();
    assert!(stray.is_empty(), "non-entry files in cache dir: {stray:?}");
}

#[test]
fn list_reports_key_model_and_preview() {
    let dir = tempdir().unwrap();
    let store = store_in(dir.path());
    store.put(&entry_for("first prompt")).unwrap();
    store.put(&entry_for(&"y".repeat(120))).unwrap();

    let rows = store.list().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.model == "test-model"));
    let long = rows
        .iter()
        .find(|r| r.prompt_preview.ends_with('…'))
        .expect("long prompt should be truncated");
    assert_eq!(long.prompt_preview.chars().count(), 81);
    assert!(rows.iter().any(|r| r.prompt_preview == "first prompt"));
}

#[test]
fn list_of_missing_dir_is_empty() {
    let dir = tempdir().unwrap();
    let store = store_in(dir.path());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn corrupt_entry_reads_as_absent_and_is_skipped_by_list() {
    let dir = tempdir().unwrap();
    let store = store_in(dir.path());
    let entry = entry_for("hello");
    store.put(&entry).unwrap();

    let path = dir.path().join("cache").join(format!("{}.json", entry.key));
    fs::write(&path, b"{ truncated").unwrap();

    assert!(store.get(&entry.key).unwrap().is_none());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn replay_returns_stored_text() {
    let dir = tempdir().unwrap();
    let store = store_in(dir.path());
    let entry = entry_for("hello");
    store.put(&entry).unwrap();
    assert_eq!(store.replay(&entry.key).unwrap(), "a response");
}

#[test]
fn replay_falls_back_to_raw_payload() {
    let dir = tempdir().unwrap();
    let store = store_in(dir.path());
    let request = canonicalize(&RawRequest {
        model: "test-model",
        prompt: "hello",
        temperature: "0.7",
        ..Default::default()
    })
    .unwrap();
    let response = CachedResponse {
        text: None,
        raw: Some(serde_json::json!({"choices": []})),
    };
    let entry = CacheEntry::new(request, response).unwrap();
    store.put(&entry).unwrap();

    let replayed = store.replay(&entry.key).unwrap();
    assert!(replayed.contains("choices"));
}

#[test]
fn replay_of_unknown_key_is_not_found() {
    let dir = tempdir().unwrap();
    let store = store_in(dir.path());
    let err = store.replay(&CacheKey::from("f".repeat(64))).unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}
