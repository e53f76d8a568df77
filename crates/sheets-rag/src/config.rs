//! Configuration for the spreadsheet retrieval pipeline
//!
//! Every knob has a serde default so partial configs deserialize cleanly,
//! and [`RagConfig::from_env`] honors the deployment's environment
//! variable contract (`DRIVE_FOLDER_ID`, `SHEETS_FILE`, `INDEX_STORE_PATH`,
//! `MAX_ROWS_TO_SCAN`, `MAX_COLS_TO_SCAN`). Invalid numeric values fall
//! back to defaults rather than failing startup.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ingestion::chunker::DEFAULT_ROWS_PER_CHUNK;
use crate::retrieval::ranker::DEFAULT_MAX_PER_TOKEN;
use crate::retrieval::retriever::{
    DEFAULT_PHRASE_BONUS, DEFAULT_SPREADSHEET_TITLE_BONUS, DEFAULT_TAB_TITLE_BONUS, DEFAULT_TOP_K,
};

const DEFAULT_INDEX_STORE_PATH: &str = "./data/chunks.jsonl";
const DEFAULT_SHEETS_FILE: &str = "./sheets.txt";
const DEFAULT_MAX_ROWS_TO_SCAN: usize = 2000;
const DEFAULT_MAX_COLS_TO_SCAN: usize = 200;
const DEFAULT_TAB_DELAY_MS: u64 = 400;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Chunk store configuration
    #[serde(default)]
    pub store: StoreConfig,
    /// Indexer configuration
    #[serde(default)]
    pub indexing: IndexingConfig,
    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

/// Chunk store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSONL file holding the persisted chunks
    pub path: PathBuf,
    /// Fall back to the OS temp directory when the store directory cannot
    /// be created (read-only deployments)
    #[serde(default)]
    pub allow_temp_fallback: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_INDEX_STORE_PATH),
            allow_temp_fallback: false,
        }
    }
}

/// Indexer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexingConfig {
    /// Drive folder to list; `None` lists across all drives
    #[serde(default)]
    pub drive_folder_id: Option<String>,
    /// Sheet-link listing file; when present and non-empty it takes
    /// precedence over the Drive folder listing
    #[serde(default = "default_sheets_file")]
    pub sheets_file: Option<PathBuf>,
    /// Maximum rows requested per tab scan; 0 means unlimited
    #[serde(default = "default_max_rows_to_scan")]
    pub max_rows_to_scan: usize,
    /// Maximum columns requested per tab scan; 0 means unlimited
    #[serde(default = "default_max_cols_to_scan")]
    pub max_cols_to_scan: usize,
    /// Data rows per chunk
    #[serde(default = "default_rows_per_chunk")]
    pub rows_per_chunk: usize,
    /// Pause between tab reads, to reduce API pressure; 0 disables
    #[serde(default = "default_tab_delay_ms")]
    pub tab_delay_ms: u64,
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            drive_folder_id: None,
            sheets_file: default_sheets_file(),
            max_rows_to_scan: DEFAULT_MAX_ROWS_TO_SCAN,
            max_cols_to_scan: DEFAULT_MAX_COLS_TO_SCAN,
            rows_per_chunk: DEFAULT_ROWS_PER_CHUNK,
            tab_delay_ms: DEFAULT_TAB_DELAY_MS,
        }
    }
}

/// Retrieval configuration
///
/// The bonus values are deliberate tuning constants carried over from the
/// production deployment; change them together or not at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Results returned per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Cap on any single term's score contribution
    #[serde(default = "default_max_per_token")]
    pub max_per_token: usize,
    /// Bonus when the chunk text contains the whole query as a phrase
    #[serde(default = "default_phrase_bonus")]
    pub phrase_bonus: u32,
    /// Bonus when the tab title contains the whole query
    #[serde(default = "default_tab_title_bonus")]
    pub tab_title_bonus: u32,
    /// Additional bonus when the spreadsheet title contains the whole query
    #[serde(default = "default_spreadsheet_title_bonus")]
    pub spreadsheet_title_bonus: u32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            max_per_token: DEFAULT_MAX_PER_TOKEN,
            phrase_bonus: DEFAULT_PHRASE_BONUS,
            tab_title_bonus: DEFAULT_TAB_TITLE_BONUS,
            spreadsheet_title_bonus: DEFAULT_SPREADSHEET_TITLE_BONUS,
        }
    }
}

fn default_sheets_file() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_SHEETS_FILE))
}

fn default_max_rows_to_scan() -> usize {
    DEFAULT_MAX_ROWS_TO_SCAN
}

fn default_max_cols_to_scan() -> usize {
    DEFAULT_MAX_COLS_TO_SCAN
}

fn default_rows_per_chunk() -> usize {
    DEFAULT_ROWS_PER_CHUNK
}

fn default_tab_delay_ms() -> u64 {
    DEFAULT_TAB_DELAY_MS
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_max_per_token() -> usize {
    DEFAULT_MAX_PER_TOKEN
}

fn default_phrase_bonus() -> u32 {
    DEFAULT_PHRASE_BONUS
}

fn default_tab_title_bonus() -> u32 {
    DEFAULT_TAB_TITLE_BONUS
}

fn default_spreadsheet_title_bonus() -> u32 {
    DEFAULT_SPREADSHEET_TITLE_BONUS
}

impl RagConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(path) = env_string("INDEX_STORE_PATH") {
            config.store.path = PathBuf::from(path);
        }
        config.indexing.drive_folder_id = env_string("DRIVE_FOLDER_ID");
        if let Some(path) = env_string("SHEETS_FILE") {
            config.indexing.sheets_file = Some(PathBuf::from(path));
        }
        config.indexing.max_rows_to_scan =
            env_usize("MAX_ROWS_TO_SCAN", DEFAULT_MAX_ROWS_TO_SCAN);
        config.indexing.max_cols_to_scan =
            env_usize("MAX_COLS_TO_SCAN", DEFAULT_MAX_COLS_TO_SCAN);

        config
    }
}

fn env_string(name: &str) -> Option<String> {
    let value = env::var(name).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn env_usize(name: &str, fallback: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RagConfig::default();
        assert_eq!(config.store.path, PathBuf::from("./data/chunks.jsonl"));
        assert!(!config.store.allow_temp_fallback);
        assert_eq!(config.indexing.max_rows_to_scan, 2000);
        assert_eq!(config.indexing.max_cols_to_scan, 200);
        assert_eq!(config.indexing.rows_per_chunk, 20);
        assert_eq!(config.indexing.tab_delay_ms, 400);
        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.retrieval.max_per_token, 2);
        assert_eq!(config.retrieval.phrase_bonus, 2);
        assert_eq!(config.retrieval.tab_title_bonus, 3);
        assert_eq!(config.retrieval.spreadsheet_title_bonus, 1);
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: RagConfig =
            serde_json::from_str(r#"{"indexing":{"max_rows_to_scan":50}}"#).unwrap();
        assert_eq!(config.indexing.max_rows_to_scan, 50);
        assert_eq!(config.indexing.max_cols_to_scan, 200);
        assert_eq!(config.retrieval.top_k, 3);
    }

    #[test]
    fn test_env_usize_falls_back_on_invalid() {
        env::set_var("SHEETS_RAG_TEST_BAD_INT", "not-a-number");
        assert_eq!(env_usize("SHEETS_RAG_TEST_BAD_INT", 7), 7);
        env::set_var("SHEETS_RAG_TEST_BAD_INT", "-3");
        assert_eq!(env_usize("SHEETS_RAG_TEST_BAD_INT", 7), 7);
        env::set_var("SHEETS_RAG_TEST_BAD_INT", "42");
        assert_eq!(env_usize("SHEETS_RAG_TEST_BAD_INT", 7), 42);
        env::remove_var("SHEETS_RAG_TEST_BAD_INT");
    }

    #[test]
    fn test_env_string_ignores_blank() {
        env::set_var("SHEETS_RAG_TEST_BLANK", "   ");
        assert_eq!(env_string("SHEETS_RAG_TEST_BLANK"), None);
        env::remove_var("SHEETS_RAG_TEST_BLANK");
    }
}
