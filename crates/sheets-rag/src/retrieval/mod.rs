//! Ranked keyword retrieval over the chunk store

pub mod ranker;
pub mod retriever;

pub use ranker::{score, ScoreOptions};
pub use retriever::{retrieve, RetrieveOptions};
