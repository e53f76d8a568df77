//! Record types shared across ingestion, storage, and retrieval

mod chunk;

pub use chunk::{Chunk, TabMeta};
