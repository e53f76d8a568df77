//! Store and retriever behavior through the public API

use sheets_rag::{retrieve, Chunk, FileStore, RetrieveOptions, StoreOptions};

fn chunk(id: &str, text: &str, tab_name: &str, spreadsheet_name: &str, updated_at: &str) -> Chunk {
    Chunk {
        id: id.to_string(),
        text: text.to_string(),
        tab_name: tab_name.to_string(),
        spreadsheet_name: spreadsheet_name.to_string(),
        updated_at: updated_at.to_string(),
        ..Chunk::default()
    }
}

#[test]
fn store_precomputes_tokens_and_builds_inverted_index() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(StoreOptions::new(dir.path().join("chunks.jsonl"))).unwrap();
    store.clear().unwrap();

    store
        .upsert_chunks(vec![
            chunk("1", "alpha beta", "Backlogs", "Ops", "2024-01-01T00:00:00Z"),
            chunk("2", "beta gamma", "Other", "Other", "2024-01-02T00:00:00Z"),
        ])
        .unwrap();

    assert!(store.items()[0].tokens.is_some());
    assert!(store.inverted_index()["alpha"].contains(&0));
}

#[test]
fn retrieve_prefers_title_matches_and_stable_sorting() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(StoreOptions::new(dir.path().join("chunks.jsonl"))).unwrap();
    store.clear().unwrap();

    store
        .upsert_chunks(vec![
            chunk("1", "alpha beta", "Backlogs", "Ops", "2024-01-01T00:00:00Z"),
            chunk("2", "alpha beta", "Other", "Other", "2024-01-02T00:00:00Z"),
        ])
        .unwrap();

    let options = RetrieveOptions {
        top_k: 1,
        ..RetrieveOptions::default()
    };
    let results = retrieve("backlogs", &options, &store);
    assert_eq!(results[0].id, "1");
}

#[test]
fn reload_from_disk_serves_identical_retrieval() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chunks.jsonl");

    let mut writer = FileStore::new(StoreOptions::new(&path)).unwrap();
    writer
        .upsert_chunks(vec![
            chunk("1", "truck rota monday", "Rota", "Logistics", "2024-01-01T00:00:00Z"),
            chunk("2", "backlog triage notes", "Backlogs", "Ops", "2024-01-02T00:00:00Z"),
        ])
        .unwrap();

    let mut reader = FileStore::new(StoreOptions::new(&path)).unwrap();
    reader.load().unwrap();

    let from_writer = retrieve("rota", &RetrieveOptions::default(), &writer);
    let from_reader = retrieve("rota", &RetrieveOptions::default(), &reader);
    assert_eq!(from_writer.len(), 1);
    assert_eq!(from_writer[0].id, from_reader[0].id);
    assert_eq!(from_writer[0].tokens, from_reader[0].tokens);
}
