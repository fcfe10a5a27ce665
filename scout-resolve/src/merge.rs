//! Evidence Merger
//!
//! Combines every record of an equivalence class into one consolidated
//! candidate. Field-specific policy; no field is silently dropped and
//! every merge decision is attributable to a source record.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use scout_core::text::{normalize_text, truncate_text};
use scout_core::{
    normalize_linkedin, registrable_domain, LocationBucket, MergedCandidate, RawRecord,
    TaggedEvidence, TaggedUrl, MAX_MERGED_BIO_LEN,
};

/// Merge one equivalence class (ascending record indices) into a single
/// candidate. Pure function of its inputs: merging the same class twice
/// yields an identical candidate.
pub fn merge_class(class: &[usize], records: &[RawRecord]) -> MergedCandidate {
    debug_assert!(!class.is_empty(), "equivalence classes are never empty");
    debug_assert!(class.windows(2).all(|w| w[0] < w[1]));

    let mut candidate = MergedCandidate {
        first_seen: class[0],
        records: class.to_vec(),
        ..Default::default()
    };

    // Display name: first non-empty by source priority, then by
    // discovery order. Disagreements are logged, not discarded - losing
    // names survive in the per-record evidence.
    let mut named: Vec<(u8, usize, &str)> = class
        .iter()
        .filter_map(|&i| {
            records[i]
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(|n| (records[i].source.name_priority(), i, n))
        })
        .collect();
    named.sort_by_key(|&(priority, idx, _)| (priority, idx));
    if let Some(&(_, idx, chosen)) = named.first() {
        let distinct: BTreeSet<String> = named.iter().map(|&(_, _, n)| normalize_text(n)).collect();
        if distinct.len() > 1 {
            debug!(
                record = idx,
                chosen,
                alternatives = distinct.len() - 1,
                "display names disagree across class, keeping highest-priority source"
            );
        }
        candidate.name = Some(chosen.to_string());
        candidate.name_source = Some(records[idx].source);
    }

    // Identifier fields: one handle per platform, scalar identifiers
    // first-non-empty, all in ascending record order.
    for &i in class {
        let record = &records[i];
        candidate.sources.insert(record.source);

        if let Some(handle) = record.handle.as_deref().map(str::trim).filter(|h| !h.is_empty()) {
            candidate
                .handles
                .entry(record.source)
                .or_insert_with(|| handle.to_string());
        }
        if candidate.email.is_none() {
            candidate.email = record
                .email
                .as_deref()
                .map(|e| e.trim().to_lowercase())
                .filter(|e| !e.is_empty());
        }
        if candidate.linkedin_slug.is_none() {
            candidate.linkedin_slug = record.linkedin_url.as_deref().and_then(normalize_linkedin);
        }
        if candidate.website.is_none() {
            candidate.website = record
                .website
                .as_deref()
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(str::to_string);
        }
        if candidate.website_domain.is_none() {
            candidate.website_domain = record.website.as_deref().and_then(registrable_domain);
        }

        candidate.stars_total = candidate.stars_total.max(record.stars_total);
        candidate.repo_count = candidate.repo_count.max(record.repo_count);
        candidate.last_activity = match (candidate.last_activity, record.last_activity) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }

    // Bio: distinct non-empty bios concatenated, length-capped.
    let mut seen_bios: HashSet<String> = HashSet::new();
    let bios: Vec<&str> = class
        .iter()
        .filter_map(|&i| records[i].bio.as_deref().map(str::trim))
        .filter(|b| !b.is_empty() && seen_bios.insert(normalize_text(b)))
        .collect();
    if !bios.is_empty() {
        candidate.bio = Some(truncate_text(&bios.join(" | "), MAX_MERGED_BIO_LEN));
    }

    // Location: first non-empty, structured-profile sources first.
    let mut located: Vec<(u8, usize, &str)> = class
        .iter()
        .filter_map(|&i| {
            records[i]
                .location
                .as_deref()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(|l| (records[i].source.location_priority(), i, l))
        })
        .collect();
    located.sort_by_key(|&(priority, idx, _)| (priority, idx));
    if let Some(&(_, _, location)) = located.first() {
        candidate.location_raw = Some(location.to_string());
        candidate.location_bucket = LocationBucket::classify(location);
    }
    candidate.excluded = candidate.location_bucket.is_excluded();

    // Evidence and demo URLs: union, provenance retained, exact
    // duplicates collapsed onto their first occurrence.
    let mut seen_snippets: HashSet<(String, Option<String>)> = HashSet::new();
    let mut seen_urls: HashSet<String> = HashSet::new();
    for &i in class {
        let record = &records[i];
        for snippet in &record.evidence {
            let key = (normalize_text(&snippet.text), snippet.url.clone());
            if seen_snippets.insert(key) {
                candidate.evidence.push(TaggedEvidence {
                    record: i,
                    snippet: snippet.clone(),
                });
            }
        }
        for url in &record.demo_urls {
            let trimmed = url.trim();
            if !trimmed.is_empty() && seen_urls.insert(trimmed.to_string()) {
                candidate.demo_urls.push(TaggedUrl {
                    url: trimmed.to_string(),
                    source: record.source,
                    record: i,
                });
            }
        }
    }

    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use scout_core::{EvidenceSnippet, Source};

    fn sample_records() -> Vec<RawRecord> {
        vec![
            RawRecord::new(Source::HackerNews)
                .with_handle("adal")
                .with_name("ada l")
                .with_bio("builds things fast")
                .with_location("somewhere nice")
                .with_evidence(EvidenceSnippet::new(Source::HackerNews, "Show HN: shipped an MVP")),
            RawRecord::new(Source::Github)
                .with_handle("ada")
                .with_name("Ada Lovelace")
                .with_email("Ada@Example.com")
                .with_website("https://ada.dev")
                .with_location("San Francisco, CA")
                .with_bio("builds things fast")
                .with_demo_url("https://demo.ada.dev"),
        ]
    }

    #[test]
    fn test_name_prefers_profile_source() {
        let records = sample_records();
        let merged = merge_class(&[0, 1], &records);
        // GitHub outranks HN for names.
        assert_eq!(merged.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(merged.name_source, Some(Source::Github));
    }

    #[test]
    fn test_location_prefers_structured_source() {
        let records = sample_records();
        let merged = merge_class(&[0, 1], &records);
        assert_eq!(merged.location_raw.as_deref(), Some("San Francisco, CA"));
        assert_eq!(merged.location_bucket, LocationBucket::SfBayArea);
        assert!(!merged.excluded);
    }

    #[test]
    fn test_identifiers_unioned() {
        let records = sample_records();
        let merged = merge_class(&[0, 1], &records);
        assert_eq!(merged.handle(Source::HackerNews), Some("adal"));
        assert_eq!(merged.handle(Source::Github), Some("ada"));
        assert_eq!(merged.email.as_deref(), Some("ada@example.com"));
        assert_eq!(merged.website_domain.as_deref(), Some("ada.dev"));
        assert_eq!(merged.sources.len(), 2);
        assert_eq!(merged.id(), "gh:ada");
    }

    #[test]
    fn test_duplicate_bios_collapse() {
        let records = sample_records();
        let merged = merge_class(&[0, 1], &records);
        assert_eq!(merged.bio.as_deref(), Some("builds things fast"));
    }

    #[test]
    fn test_evidence_keeps_provenance() {
        let records = sample_records();
        let merged = merge_class(&[0, 1], &records);
        assert_eq!(merged.evidence.len(), 1);
        assert_eq!(merged.evidence[0].record, 0);
        assert_eq!(merged.evidence[0].snippet.source, Source::HackerNews);
        assert_eq!(merged.demo_urls.len(), 1);
        assert_eq!(merged.demo_urls[0].record, 1);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let records = sample_records();
        let once = merge_class(&[0, 1], &records);
        let twice = merge_class(&[0, 1], &records);
        assert_eq!(serde_json::to_value(&once).unwrap(), serde_json::to_value(&twice).unwrap());
    }

    #[test]
    fn test_last_activity_takes_most_recent() {
        let older = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let newer = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut records = sample_records();
        records[0].last_activity = Some(newer);
        records[1].last_activity = Some(older);
        records[1].stars_total = 150;

        let merged = merge_class(&[0, 1], &records);
        assert_eq!(merged.last_activity, Some(newer));
        assert_eq!(merged.stars_total, 150);
    }

    #[test]
    fn test_singleton_empty_record() {
        let records = vec![RawRecord::new(Source::BraveSearch)];
        let merged = merge_class(&[0], &records);
        assert_eq!(merged.records, vec![0]);
        assert_eq!(merged.location_bucket, LocationBucket::Unknown);
        assert_eq!(merged.id(), "record:0");
    }

    #[test]
    fn test_non_us_location_flags_exclusion() {
        let records = vec![RawRecord::new(Source::Github)
            .with_handle("someone")
            .with_location("London, UK")];
        let merged = merge_class(&[0], &records);
        assert_eq!(merged.location_bucket, LocationBucket::NonUs);
        assert!(merged.excluded);
    }
}
