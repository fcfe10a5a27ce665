//! Match Index
//!
//! Answers, for a new record, "which already-seen records share at least
//! one exact strong identifier with it?". Buckets are typed string keys
//! (`handle:github:foo`, `email:a@b`, `linkedin:slug`, `domain:x.dev`)
//! mapping to record indices in insertion order, so lookups are O(1)
//! amortized and results are deterministic.

use std::collections::HashMap;

use scout_core::IdentifierSet;

#[derive(Debug, Default)]
pub struct MatchIndex {
    buckets: HashMap<String, Vec<usize>>,
}

impl MatchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert record `idx` under every strong identifier it carries and
    /// return the sorted, deduplicated indices of previously inserted
    /// records sharing at least one of them.
    pub fn insert(&mut self, idx: usize, ids: &IdentifierSet) -> Vec<usize> {
        let mut matches: Vec<usize> = Vec::new();
        for key in ids.strong_keys() {
            let bucket = self.buckets.entry(key).or_default();
            matches.extend(bucket.iter().copied());
            bucket.push(idx);
        }
        matches.sort_unstable();
        matches.dedup();
        matches
    }

    /// Records currently filed under one typed key
    pub fn lookup(&self, key: &str) -> &[usize] {
        self.buckets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::{RawRecord, Source};

    fn ids(record: &RawRecord) -> IdentifierSet {
        IdentifierSet::extract(record)
    }

    #[test]
    fn test_exact_handle_match() {
        let mut index = MatchIndex::new();
        let a = RawRecord::new(Source::Github).with_handle("ada");
        let b = RawRecord::new(Source::Github).with_handle("Ada");

        assert!(index.insert(0, &ids(&a)).is_empty());
        assert_eq!(index.insert(1, &ids(&b)), vec![0]);
    }

    #[test]
    fn test_cross_platform_handles_do_not_match() {
        let mut index = MatchIndex::new();
        let a = RawRecord::new(Source::Github).with_handle("ada");
        let b = RawRecord::new(Source::Reddit).with_handle("ada");

        index.insert(0, &ids(&a));
        assert!(index.insert(1, &ids(&b)).is_empty());
    }

    #[test]
    fn test_match_via_any_strong_identifier() {
        let mut index = MatchIndex::new();
        let a = RawRecord::new(Source::Github)
            .with_handle("ada")
            .with_email("ada@example.com");
        let b = RawRecord::new(Source::HackerNews)
            .with_handle("adab")
            .with_email("ADA@example.com");
        let c = RawRecord::new(Source::DevTo)
            .with_handle("ada-dev")
            .with_website("https://ada.dev");

        index.insert(0, &ids(&a));
        assert_eq!(index.insert(1, &ids(&b)), vec![0]);
        assert!(index.insert(2, &ids(&c)).is_empty());
    }

    #[test]
    fn test_multi_key_matches_deduplicated() {
        let mut index = MatchIndex::new();
        let a = RawRecord::new(Source::Github)
            .with_handle("ada")
            .with_email("ada@example.com");
        let b = RawRecord::new(Source::Github)
            .with_handle("ada")
            .with_email("ada@example.com");

        index.insert(0, &ids(&a));
        // Shares both the handle and the email bucket; reported once.
        assert_eq!(index.insert(1, &ids(&b)), vec![0]);
    }

    #[test]
    fn test_name_is_not_indexed() {
        let mut index = MatchIndex::new();
        let a = RawRecord::new(Source::HackerNews).with_name("Grace Hopper");
        let b = RawRecord::new(Source::Reddit).with_name("Grace Hopper");

        index.insert(0, &ids(&a));
        assert!(index.insert(1, &ids(&b)).is_empty());
        assert_eq!(index.bucket_count(), 0);
    }
}
