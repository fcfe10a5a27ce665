//! Union-Merge Engine
//!
//! Two passes over the batch:
//! 1. Exact pass: union every record with each record sharing a strong
//!    identifier, straight from the match index. A single shared strong
//!    identifier is treated as unambiguous.
//! 2. Fuzzy pass: records are bucketed by the first few characters of
//!    their normalized name; within a bucket, a pair merges only when
//!    name similarity clears the threshold AND at least one weak signal
//!    corroborates. Name similarity alone never merges - common names
//!    would otherwise collapse distinct people.

use std::collections::BTreeMap;

use strsim::normalized_levenshtein;
use tracing::debug;

use scout_core::text::signal_keywords;
use scout_core::{
    registrable_domain, IdentifierSet, LocationBucket, MergedCandidate, RawRecord,
    DEFAULT_NAME_SIMILARITY, MIN_FUZZY_NAME_LEN,
};

use crate::index::MatchIndex;
use crate::merge::merge_class;
use crate::union_find::UnionFind;

/// Tunables for the fuzzy pass. The similarity threshold and the
/// corroboration rule are empirically chosen, not derived from labeled
/// data; treat them as knobs.
#[derive(Debug, Clone)]
pub struct ResolveConfig {
    /// Minimum normalized-Levenshtein similarity between names
    pub name_similarity_threshold: f64,
    /// Characters of the normalized name used to bucket candidates,
    /// keeping the fuzzy pass sub-quadratic in practice
    pub name_bucket_prefix: usize,
    /// Names shorter than this never enter the fuzzy pass
    pub min_name_len: usize,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            name_similarity_threshold: DEFAULT_NAME_SIMILARITY,
            name_bucket_prefix: 3,
            min_name_len: MIN_FUZZY_NAME_LEN,
        }
    }
}

impl ResolveConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.name_similarity_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_min_name_len(mut self, len: usize) -> Self {
        self.min_name_len = len;
        self
    }
}

/// Groups record indices into equivalence classes
pub struct Resolver {
    config: ResolveConfig,
}

impl Resolver {
    pub fn new(config: ResolveConfig) -> Self {
        Self { config }
    }

    /// Partition the batch: every record lands in exactly one class, a
    /// singleton if nothing matched. Deterministic for a given input
    /// order and content.
    pub fn partition(&self, records: &[RawRecord]) -> Vec<Vec<usize>> {
        let ids: Vec<IdentifierSet> = records.iter().map(IdentifierSet::extract).collect();
        let mut uf = UnionFind::new(records.len());

        // Pass 1: exact strong-identifier matches.
        let mut index = MatchIndex::new();
        for (i, id) in ids.iter().enumerate() {
            for j in index.insert(i, id) {
                if uf.union(i, j) {
                    debug!(record = i, matched = j, "exact identifier merge");
                }
            }
        }

        // Pass 2: fuzzy names with corroboration. BTreeMap keeps bucket
        // iteration order deterministic.
        let mut name_buckets: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (i, id) in ids.iter().enumerate() {
            if let Some(name) = &id.normalized_name {
                if name.chars().count() >= self.config.min_name_len {
                    let prefix: String =
                        name.chars().take(self.config.name_bucket_prefix).collect();
                    name_buckets.entry(prefix).or_default().push(i);
                }
            }
        }

        for members in name_buckets.values() {
            for (pos, &i) in members.iter().enumerate() {
                for &j in &members[pos + 1..] {
                    if uf.same_set(i, j) {
                        continue;
                    }
                    let (Some(name_i), Some(name_j)) =
                        (&ids[i].normalized_name, &ids[j].normalized_name)
                    else {
                        continue;
                    };
                    let similarity = normalized_levenshtein(name_i, name_j);
                    if similarity < self.config.name_similarity_threshold {
                        continue;
                    }
                    if corroborated(&records[i], &records[j]) {
                        uf.union(i, j);
                        debug!(
                            record = i,
                            matched = j,
                            similarity,
                            "fuzzy name merge with corroboration"
                        );
                    } else {
                        debug!(
                            record = i,
                            candidate = j,
                            similarity,
                            "similar names without corroboration, not merged"
                        );
                    }
                }
            }
        }

        uf.classes()
    }
}

/// Weak corroborating signals for a fuzzy name match: same known
/// location bucket, overlapping evidence keyword, or a shared demo-URL
/// domain. Any one suffices.
fn corroborated(a: &RawRecord, b: &RawRecord) -> bool {
    if let (Some(loc_a), Some(loc_b)) = (&a.location, &b.location) {
        let bucket_a = LocationBucket::classify(loc_a);
        let bucket_b = LocationBucket::classify(loc_b);
        // Two unknowns corroborate nothing.
        if bucket_a == bucket_b && bucket_a != LocationBucket::Unknown {
            return true;
        }
    }

    let keywords_a = signal_keywords(&evidence_text(a));
    if !keywords_a.is_empty() {
        let keywords_b = signal_keywords(&evidence_text(b));
        if keywords_a.intersection(&keywords_b).next().is_some() {
            return true;
        }
    }

    let domains_a: Vec<String> = demo_domains(a);
    if !domains_a.is_empty() {
        let domains_b = demo_domains(b);
        if domains_a.iter().any(|d| domains_b.contains(d)) {
            return true;
        }
    }

    false
}

fn evidence_text(record: &RawRecord) -> String {
    record
        .evidence
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn demo_domains(record: &RawRecord) -> Vec<String> {
    record
        .demo_urls
        .iter()
        .filter_map(|u| registrable_domain(u))
        .collect()
}

/// Full resolution: partition the batch and merge every class
pub fn resolve(records: &[RawRecord], config: &ResolveConfig) -> Vec<MergedCandidate> {
    let classes = Resolver::new(config.clone()).partition(records);
    debug!(
        records = records.len(),
        candidates = classes.len(),
        "resolved batch"
    );
    classes
        .into_iter()
        .map(|class| merge_class(&class, records))
        .collect()
}
