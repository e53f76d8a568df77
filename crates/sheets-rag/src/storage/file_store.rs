//! JSONL-backed chunk store with an in-memory inverted index

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::text::{tokenize, StopwordFilter};
use crate::types::Chunk;

/// Default result cap for the legacy substring search
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Options for constructing a [`FileStore`]
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Path of the JSONL file holding the persisted chunks
    pub path: PathBuf,
    /// Fall back to the OS temp directory when the parent directory cannot
    /// be created
    pub allow_temp_fallback: bool,
}

impl StoreOptions {
    /// Options with the given path and no temp fallback
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            allow_temp_fallback: false,
        }
    }
}

/// Durable chunk collection backed by a single JSONL file.
///
/// Item order doubles as the insertion-order tie-break for retrieval; the
/// inverted index maps each normalized token to the ascending indices of
/// the items containing it. Single-writer only: the file has no locking.
pub struct FileStore {
    path: PathBuf,
    items: Vec<Chunk>,
    inverted_index: HashMap<String, Vec<usize>>,
}

impl FileStore {
    /// Create a store over the given file, creating its directory if needed.
    ///
    /// With `allow_temp_fallback` set, a directory that cannot be created
    /// retargets the store to the OS temp directory with a warning instead
    /// of failing.
    pub fn new(options: StoreOptions) -> Result<Self> {
        if options.path.as_os_str().is_empty() {
            return Err(Error::validation("FileStore requires a non-empty path"));
        }

        let path = ensure_directory(&options.path, options.allow_temp_fallback)?;
        Ok(Self {
            path,
            items: Vec::new(),
            inverted_index: HashMap::new(),
        })
    }

    /// The file this store persists to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The loaded items, in persisted order
    pub fn items(&self) -> &[Chunk] {
        &self.items
    }

    /// Token to ascending-item-index postings
    pub fn inverted_index(&self) -> &HashMap<String, Vec<usize>> {
        &self.inverted_index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Parse the persisted file into memory and rebuild the index.
    ///
    /// A missing file is an empty store. A line that fails to parse is
    /// logged and skipped; loading continues with the remaining lines.
    pub fn load(&mut self) -> Result<&[Chunk]> {
        self.items = Vec::new();
        self.inverted_index = HashMap::new();

        if !self.path.exists() {
            return Ok(&self.items);
        }

        let raw = fs::read_to_string(&self.path)?;
        let mut parsed = Vec::new();
        for line in raw.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Chunk>(line) {
                Ok(chunk) => parsed.push(chunk),
                Err(err) => {
                    tracing::warn!("skipping malformed store line: {}", err);
                }
            }
        }

        self.items = parsed;
        self.build_index();
        Ok(&self.items)
    }

    /// Truncate the persisted file and reset the in-memory state.
    pub fn clear(&mut self) -> Result<()> {
        fs::write(&self.path, "")?;
        self.items = Vec::new();
        self.inverted_index = HashMap::new();
        Ok(())
    }

    /// Replace the entire collection and rewrite the persisted file.
    ///
    /// Despite the name this is a wholesale replacement, not a per-id
    /// merge: the previous items are discarded, the index is rebuilt, and
    /// the file is overwritten. Tokens are memoized onto each chunk before
    /// serialization, so persisted lines carry them.
    pub fn upsert_chunks(&mut self, chunks: Vec<Chunk>) -> Result<&[Chunk]> {
        self.items = chunks;
        self.build_index();

        let mut payload = String::new();
        for chunk in &self.items {
            payload.push_str(&serde_json::to_string(chunk)?);
            payload.push('\n');
        }
        fs::write(&self.path, payload)?;

        Ok(&self.items)
    }

    /// Rebuild the inverted index, memoizing each item's tokens on first use.
    fn build_index(&mut self) {
        let mut index: HashMap<String, Vec<usize>> = HashMap::new();

        for (item_index, item) in self.items.iter_mut().enumerate() {
            if item.tokens.is_none() {
                item.tokens = Some(tokenize(&item.text, StopwordFilter::Default));
            }
            let Some(tokens) = item.tokens.as_deref() else {
                continue;
            };

            let distinct: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
            for token in distinct {
                index.entry(token.to_string()).or_default().push(item_index);
            }
        }

        self.inverted_index = index;
    }

    /// Naive substring containment search over chunk text.
    ///
    /// Legacy fallback path, independent of the ranked retriever; an empty
    /// query returns the first items in store order.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<&Chunk> {
        let limit = if top_k > 0 { top_k } else { DEFAULT_SEARCH_LIMIT };
        if query.is_empty() {
            return self.items.iter().take(limit).collect();
        }

        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.text.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }
}

fn ensure_directory(path: &Path, allow_temp_fallback: bool) -> Result<PathBuf> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => return Ok(path.to_path_buf()),
    };

    match fs::create_dir_all(parent) {
        Ok(()) => Ok(path.to_path_buf()),
        Err(err) => {
            if allow_temp_fallback {
                if let Some(file_name) = path.file_name() {
                    let fallback = std::env::temp_dir().join(file_name);
                    if fallback != path {
                        tracing::warn!(
                            "store directory {} unavailable ({}), falling back to {}",
                            parent.display(),
                            err,
                            fallback.display()
                        );
                        return Ok(fallback);
                    }
                }
            }
            Err(err.into())
        }
    }
}
