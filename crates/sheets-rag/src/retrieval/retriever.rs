//! Deterministic top-K retrieval
//!
//! Candidates are pruned through the store's inverted index when any query
//! token has postings; final scores are always recomputed in full, never
//! read from the index. Ordering is total: score descending, then
//! `updatedAt` descending, then store index ascending, so fully-tied
//! candidates come back in the same order on every call and on both the
//! pruned and full-scan paths.

use std::collections::BTreeSet;

use crate::config::RetrievalConfig;
use crate::retrieval::ranker::{self, ScoreOptions, DEFAULT_MAX_PER_TOKEN};
use crate::storage::FileStore;
use crate::text::{normalize, tokenize, StopwordFilter};
use crate::types::Chunk;

/// Default number of results per query
pub const DEFAULT_TOP_K: usize = 3;
/// Bonus when the chunk text contains the whole query as a phrase
pub const DEFAULT_PHRASE_BONUS: u32 = 2;
/// Bonus when the tab title contains the whole query
pub const DEFAULT_TAB_TITLE_BONUS: u32 = 3;
/// Additional bonus when the spreadsheet title contains the whole query
pub const DEFAULT_SPREADSHEET_TITLE_BONUS: u32 = 1;

/// Retrieval options
#[derive(Debug, Clone)]
pub struct RetrieveOptions {
    /// Results returned per query; 0 selects the default
    pub top_k: usize,
    /// Cap on any single term's score contribution
    pub max_per_token: usize,
    pub phrase_bonus: u32,
    pub tab_title_bonus: u32,
    pub spreadsheet_title_bonus: u32,
}

impl Default for RetrieveOptions {
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

impl From<&RetrievalConfig> for RetrieveOptions {
    fn from(config: &RetrievalConfig) -> Self {
        Self {
            top_k: config.top_k,
            max_per_token: config.max_per_token,
            phrase_bonus: config.phrase_bonus,
            tab_title_bonus: config.tab_title_bonus,
            spreadsheet_title_bonus: config.spreadsheet_title_bonus,
        }
    }
}

/// Union the postings of every query token into an ordered candidate set.
///
/// `None` means no pruning is possible and every item must be scanned.
fn candidate_indices(query_tokens: &[String], store: &FileStore) -> Option<BTreeSet<usize>> {
    if query_tokens.is_empty() || store.inverted_index().is_empty() {
        return None;
    }

    let mut candidates = BTreeSet::new();
    for token in query_tokens {
        if let Some(postings) = store.inverted_index().get(token.as_str()) {
            candidates.extend(postings.iter().copied());
        }
    }

    (!candidates.is_empty()).then_some(candidates)
}

fn title_bonus(query_normalized: &str, chunk: &Chunk, options: &RetrieveOptions) -> u32 {
    if query_normalized.is_empty() {
        return 0;
    }

    let mut bonus = 0;
    let tab_name = normalize(&chunk.tab_name);
    if !tab_name.is_empty() && tab_name.contains(query_normalized) {
        bonus += options.tab_title_bonus;
    }
    let spreadsheet_name = normalize(&chunk.spreadsheet_name);
    if !spreadsheet_name.is_empty() && spreadsheet_name.contains(query_normalized) {
        bonus += options.spreadsheet_title_bonus;
    }

    bonus
}

/// Retrieve the top-K chunks for a query.
///
/// The store must already be loaded. An empty query returns the first
/// `top_k` items in store order without scoring; a query with no matches
/// returns an empty list. Returned references borrow from the store.
pub fn retrieve<'s>(
    query: &str,
    options: &RetrieveOptions,
    store: &'s FileStore,
) -> Vec<&'s Chunk> {
    let top_k = if options.top_k > 0 {
        options.top_k
    } else {
        DEFAULT_TOP_K
    };

    let items = store.items();
    if query.is_empty() {
        return items.iter().take(top_k).collect();
    }

    let query_normalized = normalize(query);
    let query_tokens = tokenize(&query_normalized, StopwordFilter::Default);
    let score_options = ScoreOptions {
        max_per_token: options.max_per_token,
    };

    let candidates: Vec<usize> = match candidate_indices(&query_tokens, store) {
        Some(pruned) => pruned.into_iter().collect(),
        None => (0..items.len()).collect(),
    };

    // (total score, updatedAt ms, store index) per surviving candidate
    let mut scored: Vec<(u32, i64, usize)> = Vec::with_capacity(candidates.len());
    for index in candidates {
        let chunk = &items[index];

        let computed;
        let tokens: &[String] = match &chunk.tokens {
            Some(tokens) => tokens,
            None => {
                computed = tokenize(&chunk.text, StopwordFilter::Default);
                &computed
            }
        };

        let base_score = ranker::score(&query_tokens, tokens, &score_options);
        let phrase_bonus = if !query_normalized.is_empty()
            && normalize(&chunk.text).contains(&query_normalized)
        {
            options.phrase_bonus
        } else {
            0
        };
        let total_score = base_score + phrase_bonus + title_bonus(&query_normalized, chunk, options);

        if total_score > 0 {
            scored.push((total_score, chunk.updated_at_ms(), index));
        }
    }

    scored.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)).then(a.2.cmp(&b.2)));

    scored
        .into_iter()
        .take(top_k)
        .map(|(_, _, index)| &items[index])
        .collect()
}
