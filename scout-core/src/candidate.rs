//! Merged candidates - one consolidated profile per equivalence class

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::location::LocationBucket;
use crate::record::{EvidenceSnippet, Source};

/// An evidence snippet tagged with the raw record it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedEvidence {
    /// Index of the originating raw record
    pub record: usize,
    #[serde(flatten)]
    pub snippet: EvidenceSnippet,
}

/// A demo/link URL tagged with its provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedUrl {
    pub url: String,
    pub source: Source,
    /// Index of the originating raw record
    pub record: usize,
}

/// Detailed breakdown of a candidate's score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// 0-30
    pub shipping_velocity: f64,
    /// 0-20
    pub tooling_signals: f64,
    /// 0-25
    pub founder_fit: f64,
    /// 0-15
    pub fintech_relevance: f64,
    /// 0-10
    pub communication: f64,
    /// Sum of subscores, 0-100 by construction
    pub raw_total: f64,
    /// Multiplier applied for the location bucket
    pub location_multiplier: f64,
    /// Per-category `"+N: ..."` audit strings
    #[serde(default)]
    pub explanations: BTreeMap<String, Vec<String>>,
}

/// One consolidated profile per real-world person
///
/// Created by the evidence merger; the scoring engine fills the score
/// fields, the ranker fills `rank`. Never mutated after ranking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergedCandidate {
    /// Smallest member record index; stable discovery order for tie-breaks
    pub first_seen: usize,
    /// Member record indices, ascending
    pub records: Vec<usize>,

    /// Chosen display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Which source the chosen name came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_source: Option<Source>,

    /// One handle per platform, first-non-empty in record order
    #[serde(default)]
    pub handles: BTreeMap<Source, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_domain: Option<String>,

    /// Distinct bios joined with `" | "`, length-capped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    /// Best-available raw location string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_raw: Option<String>,
    pub location_bucket: LocationBucket,

    /// Every source this person was discovered on
    pub sources: BTreeSet<Source>,
    /// All evidence, provenance retained
    #[serde(default)]
    pub evidence: Vec<TaggedEvidence>,
    /// All demo URLs, provenance retained
    #[serde(default)]
    pub demo_urls: Vec<TaggedUrl>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stars_total: u32,
    #[serde(default)]
    pub repo_count: u32,

    /// Filled by the scoring engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<ScoreBreakdown>,
    #[serde(default)]
    pub total_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recruiter_pitch: Option<String>,
    /// Set for NON_US candidates; the ranker drops these
    #[serde(default)]
    pub excluded: bool,
    /// 1-based rank, filled last
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

impl MergedCandidate {
    pub fn handle(&self, source: Source) -> Option<&str> {
        self.handles.get(&source).map(String::as_str)
    }

    /// Stable identifier derived from the best available identity field
    pub fn id(&self) -> String {
        if let Some(h) = self.handle(Source::Github) {
            return format!("gh:{}", h);
        }
        if let Some(h) = self.handle(Source::HackerNews) {
            return format!("hn:{}", h);
        }
        if let Some(h) = self.handle(Source::Reddit) {
            return format!("reddit:{}", h);
        }
        if let Some(domain) = &self.website_domain {
            return format!("web:{}", domain);
        }
        if let Some(email) = &self.email {
            return format!("email:{}", email);
        }
        if let Some(name) = &self.name {
            let slug: String = name
                .to_lowercase()
                .chars()
                .map(|c| if c.is_alphanumeric() { c } else { '-' })
                .collect();
            return format!("name:{}", slug.trim_matches('-'));
        }
        format!("record:{}", self.first_seen)
    }

    /// Name, falling back through handles, for display and pitches
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.handle(Source::Github).map(str::to_string))
            .or_else(|| self.handle(Source::HackerNews).map(str::to_string))
            .or_else(|| self.handles.values().next().cloned())
            .unwrap_or_else(|| "unknown".to_string())
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }
}
