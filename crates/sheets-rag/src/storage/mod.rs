//! Durable chunk storage
//!
//! A single JSONL file backs the whole collection; the in-memory item list
//! and the token inverted index are both derived from it on load.

mod file_store;

pub use file_store::{FileStore, StoreOptions, DEFAULT_SEARCH_LIMIT};
