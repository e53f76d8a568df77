//! Query and content normalization
//!
//! Pure functions shared by the store, the retriever, and the chunk text
//! pipeline. Normalization is intentionally ASCII-centric: spreadsheet
//! queries and cell text are matched on lowercase alphanumeric terms, and
//! everything else collapses to whitespace.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Common English function words dropped during tokenization
pub static DEFAULT_STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "and", "for", "are", "with", "that", "this", "from", "your", "you", "about",
        "what", "when", "where", "which", "who", "how", "can", "could", "would", "should",
        "please", "thanks", "hello", "hi", "hey",
    ]
    .into_iter()
    .collect()
});

/// Stopword handling for [`tokenize`]
#[derive(Debug, Clone, Copy, Default)]
pub enum StopwordFilter<'a> {
    /// Drop the default English stopword set
    #[default]
    Default,
    /// Keep every token
    None,
    /// Drop tokens present in the given set
    Custom(&'a HashSet<&'a str>),
}

/// Lowercase, strip everything outside `[a-z0-9\s]`, collapse whitespace, trim.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else {
            pending_space = true;
        }
    }

    out
}

/// Split normalized text into terms, dropping empties and stopwords.
pub fn tokenize(text: &str, stopwords: StopwordFilter<'_>) -> Vec<String> {
    let dropped: Option<&HashSet<&str>> = match stopwords {
        StopwordFilter::Default => Some(&DEFAULT_STOPWORDS),
        StopwordFilter::None => None,
        StopwordFilter::Custom(set) => Some(set),
    };

    normalize(text)
        .split(' ')
        .filter(|token| !token.is_empty())
        .filter(|token| dropped.map_or(true, |set| !set.contains(token)))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation_and_collapses() {
        assert_eq!(normalize("  Alice,  9am-5pm!! "), "alice 9am 5pm");
        assert_eq!(normalize("Name | Shift"), "name shift");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("???"), "");
    }

    #[test]
    fn test_normalize_drops_non_ascii() {
        assert_eq!(normalize("café 1"), "caf 1");
    }

    #[test]
    fn test_tokenize_drops_stopwords() {
        assert_eq!(
            tokenize("what is the shift for Alice", StopwordFilter::Default),
            vec!["is", "shift", "alice"]
        );
    }

    #[test]
    fn test_tokenize_without_stopwords() {
        assert_eq!(
            tokenize("the shift", StopwordFilter::None),
            vec!["the", "shift"]
        );
    }

    #[test]
    fn test_tokenize_custom_stopwords() {
        let custom: HashSet<&str> = ["shift"].into_iter().collect();
        assert_eq!(
            tokenize("the shift rota", StopwordFilter::Custom(&custom)),
            vec!["the", "rota"]
        );
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize("", StopwordFilter::Default).is_empty());
        assert!(tokenize("  \t ", StopwordFilter::Default).is_empty());
    }
}
