//! Spreadsheet ingestion: chunking scanned values and full-folder indexing

pub mod chunker;
pub mod indexer;

pub use chunker::{detect_headers, to_chunks, ChunkOptions, DEFAULT_ROWS_PER_CHUNK};
pub use indexer::{trim_values, IndexSummary, Indexer, Trimmed};
