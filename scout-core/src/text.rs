//! Text normalization and keyword scanning helpers

use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use crate::keywords::all_signal_keywords;

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"')\]]+"#).unwrap());

/// Lower-case and collapse whitespace for comparison
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    WHITESPACE_REGEX
        .replace_all(lowered.trim(), " ")
        .into_owned()
}

/// Truncate to at most `max_len` characters, appending `...` when cut
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Extract URLs from free text, deduplicated, original order kept
pub fn extract_urls(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    URL_REGEX
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?']))
        .filter(|u| seen.insert(u.to_string()))
        .map(str::to_string)
        .collect()
}

/// Which signal keywords appear in the given text.
///
/// Plain-word keywords match on word boundaries (via a token set, so "pm"
/// never fires inside "rpm"); phrases and keywords carrying punctuation
/// ("v0.dev", "gpt-4") match as substrings of the normalized text.
pub fn signal_keywords(text: &str) -> BTreeSet<&'static str> {
    let normalized = normalize_text(text);
    if normalized.is_empty() {
        return BTreeSet::new();
    }
    let tokens: HashSet<&str> = normalized
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    all_signal_keywords()
        .filter(|kw| {
            if kw.chars().all(char::is_alphanumeric) {
                tokens.contains(kw)
            } else {
                normalized.contains(kw)
            }
        })
        .collect()
}

/// A normalized text corpus with a token set for repeated keyword lookups
#[derive(Debug, Clone)]
pub struct TextCorpus {
    normalized: String,
    tokens: HashSet<String>,
}

impl TextCorpus {
    pub fn new(text: &str) -> Self {
        let normalized = normalize_text(text);
        let tokens = normalized
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        Self { normalized, tokens }
    }

    /// Word-boundary match for plain words, substring match for phrases
    /// and punctuated keywords
    pub fn contains(&self, keyword: &str) -> bool {
        if keyword.chars().all(char::is_alphanumeric) {
            self.tokens.contains(keyword)
        } else {
            self.normalized.contains(keyword)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Hello\n\tWorld  "), "hello world");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate_text("short", 10), "short");
        let cut = truncate_text("a".repeat(50).as_str(), 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_extract_urls_dedups() {
        let text = "see https://demo.example.com/app. also https://demo.example.com/app";
        let urls = extract_urls(text);
        assert_eq!(urls, vec!["https://demo.example.com/app".to_string()]);
    }

    #[test]
    fn test_signal_keywords_word_boundaries() {
        let hits = signal_keywords("Shipped an MVP with Cursor over a weekend project");
        assert!(hits.contains("shipped"));
        assert!(hits.contains("mvp"));
        assert!(hits.contains("cursor"));
        assert!(hits.contains("weekend project"));

        // "pm" must not fire inside another token
        let none = signal_keywords("running at 7000rpm");
        assert!(!none.contains("pm"));
    }

    #[test]
    fn test_corpus_lookup() {
        let corpus = TextCorpus::new("Built with v0.dev and GPT-4, shipped fast");
        assert!(corpus.contains("v0.dev"));
        assert!(corpus.contains("gpt-4"));
        assert!(corpus.contains("shipped"));
        assert!(!corpus.contains("cursor"));
        assert!(!TextCorpus::new("words").is_empty());
        assert!(TextCorpus::new("  ").is_empty());
    }
}
