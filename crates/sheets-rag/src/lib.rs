//! sheets-rag: spreadsheet chunking, durable JSONL storage, and ranked
//! keyword retrieval.
//!
//! The pipeline: the [`Indexer`] reads tab grids through the Drive/Sheets
//! collaborator traits, trims trailing empty regions, and windows data
//! rows into [`Chunk`]s; the [`FileStore`] persists chunks as
//! newline-delimited JSON and derives a token inverted index from them;
//! [`retrieve`] serves deterministic top-K keyword retrieval with phrase
//! and title bonuses over the loaded store.
//!
//! The webhook/chat layer, LLM summarization, and the real Google API
//! clients live outside this crate and talk to it through
//! [`providers::DriveProvider`], [`providers::SheetsProvider`], and the
//! public operations re-exported below.

pub mod a1;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod storage;
pub mod text;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use ingestion::chunker::{to_chunks, ChunkOptions};
pub use ingestion::indexer::{IndexSummary, Indexer};
pub use retrieval::retriever::{retrieve, RetrieveOptions};
pub use storage::{FileStore, StoreOptions};
pub use types::{Chunk, TabMeta};
