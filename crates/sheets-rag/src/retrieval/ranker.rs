//! Term-frequency overlap scoring
//!
//! The score is a bounded multiset intersection: each distinct query term
//! contributes at most `max_per_token`, so a single repeated term cannot
//! dominate genuine multi-term relevance.

use std::collections::HashMap;

/// Default cap on any single term's score contribution
pub const DEFAULT_MAX_PER_TOKEN: usize = 2;

/// Scoring options
#[derive(Debug, Clone)]
pub struct ScoreOptions {
    /// Cap on any single term's contribution; 0 selects the default
    pub max_per_token: usize,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self {
            max_per_token: DEFAULT_MAX_PER_TOKEN,
        }
    }
}

fn build_frequency(tokens: &[String]) -> HashMap<&str, usize> {
    let mut freq = HashMap::new();
    for token in tokens {
        *freq.entry(token.as_str()).or_insert(0) += 1;
    }
    freq
}

/// Score a chunk's tokens against a query's tokens.
///
/// Returns 0 when either side is empty.
pub fn score(query_tokens: &[String], chunk_tokens: &[String], options: &ScoreOptions) -> u32 {
    if query_tokens.is_empty() || chunk_tokens.is_empty() {
        return 0;
    }

    let max_per_token = if options.max_per_token > 0 {
        options.max_per_token
    } else {
        DEFAULT_MAX_PER_TOKEN
    };

    let query_freq = build_frequency(query_tokens);
    let chunk_freq = build_frequency(chunk_tokens);

    let mut overlap = 0;
    for (token, query_count) in &query_freq {
        if let Some(chunk_count) = chunk_freq.get(token) {
            overlap += (*query_count).min(*chunk_count).min(max_per_token);
        }
    }

    overlap as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|word| word.to_string()).collect()
    }

    #[test]
    fn test_counts_overlapping_terms() {
        let query = tokens(&["alpha", "beta"]);
        let chunk = tokens(&["alpha", "gamma", "beta"]);
        assert_eq!(score(&query, &chunk, &ScoreOptions::default()), 2);
    }

    #[test]
    fn test_repeated_term_is_capped() {
        let query = tokens(&["alpha", "alpha", "alpha", "alpha"]);
        let chunk = tokens(&["alpha", "alpha", "alpha", "alpha", "alpha"]);
        assert_eq!(score(&query, &chunk, &ScoreOptions::default()), 2);

        let relaxed = ScoreOptions { max_per_token: 4 };
        assert_eq!(score(&query, &chunk, &relaxed), 4);
    }

    #[test]
    fn test_counts_are_bounded_by_both_sides() {
        let query = tokens(&["alpha", "alpha"]);
        let chunk = tokens(&["alpha"]);
        assert_eq!(score(&query, &chunk, &ScoreOptions::default()), 1);
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        let some = tokens(&["alpha"]);
        assert_eq!(score(&[], &some, &ScoreOptions::default()), 0);
        assert_eq!(score(&some, &[], &ScoreOptions::default()), 0);
    }

    #[test]
    fn test_zero_cap_falls_back_to_default() {
        let query = tokens(&["alpha", "alpha", "alpha"]);
        let chunk = tokens(&["alpha", "alpha", "alpha"]);
        let options = ScoreOptions { max_per_token: 0 };
        assert_eq!(score(&query, &chunk, &options), 2);
    }
}
