//! Raw candidate records as handed off by source collaborators
//!
//! One `RawRecord` per (source, discovered entity). Records are immutable
//! once produced; everything downstream works over record indices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The public sources a candidate can be discovered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Github,
    HackerNews,
    Reddit,
    Twitter,
    DevTo,
    ProductHunt,
    BraveSearch,
    YCombinator,
}

impl Source {
    /// Short tag used in candidate ids and log lines
    pub fn label(&self) -> &'static str {
        match self {
            Source::Github => "github",
            Source::HackerNews => "hn",
            Source::Reddit => "reddit",
            Source::Twitter => "twitter",
            Source::DevTo => "devto",
            Source::ProductHunt => "producthunt",
            Source::BraveSearch => "brave",
            Source::YCombinator => "yc",
        }
    }

    /// Priority when picking a display name (lower wins).
    /// Launch/professional profiles carry real names more reliably than
    /// forum handles or search snippets.
    pub fn name_priority(&self) -> u8 {
        match self {
            Source::YCombinator => 0,
            Source::ProductHunt => 1,
            Source::Github => 2,
            Source::DevTo => 3,
            Source::Twitter => 4,
            Source::HackerNews => 5,
            Source::Reddit => 6,
            Source::BraveSearch => 7,
        }
    }

    /// Priority when picking a location string (lower wins).
    /// Structured profile fields outrank free-text mentions.
    pub fn location_priority(&self) -> u8 {
        match self {
            Source::Github => 0,
            Source::Twitter => 1,
            Source::DevTo => 2,
            Source::ProductHunt => 3,
            Source::YCombinator => 4,
            Source::HackerNews => 5,
            Source::Reddit => 6,
            Source::BraveSearch => 7,
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A piece of evidence text with its origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSnippet {
    /// The snippet text
    pub text: String,
    /// URL where the snippet was found, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Source that produced the snippet
    pub source: Source,
}

impl EvidenceSnippet {
    pub fn new(source: Source, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: None,
            source,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// A normalized per-source candidate record
///
/// Produced by a source collaborator, consumed by the resolution pipeline.
/// Absent fields mean "the source did not expose this", never empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    /// Which source discovered this entity
    pub source: Source,
    /// Primary handle on that source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    /// Display name as shown on the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Bio / description blob
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Publicly listed email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// LinkedIn profile URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    /// Personal website URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Raw, unparsed location string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Evidence snippets collected by the source
    #[serde(default)]
    pub evidence: Vec<EvidenceSnippet>,
    /// Demo / project URLs
    #[serde(default)]
    pub demo_urls: Vec<String>,
    /// Most recent public activity seen by the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<DateTime<Utc>>,
    /// Total GitHub stars, where applicable
    #[serde(default)]
    pub stars_total: u32,
    /// Public repo count, where applicable
    #[serde(default)]
    pub repo_count: u32,
}

impl Default for Source {
    fn default() -> Self {
        Source::BraveSearch
    }
}

impl RawRecord {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            ..Default::default()
        }
    }

    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_linkedin(mut self, url: impl Into<String>) -> Self {
        self.linkedin_url = Some(url.into());
        self
    }

    pub fn with_website(mut self, url: impl Into<String>) -> Self {
        self.website = Some(url.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_evidence(mut self, snippet: EvidenceSnippet) -> Self {
        self.evidence.push(snippet);
        self
    }

    pub fn with_demo_url(mut self, url: impl Into<String>) -> Self {
        self.demo_urls.push(url.into());
        self
    }

    /// All free text carried by this record, joined for keyword scans
    pub fn all_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(bio) = &self.bio {
            parts.push(bio);
        }
        for snippet in &self.evidence {
            parts.push(&snippet.text);
        }
        parts.join(" ")
    }

    /// True when the record carries nothing to match or score on
    pub fn is_empty(&self) -> bool {
        self.handle.is_none()
            && self.name.is_none()
            && self.email.is_none()
            && self.linkedin_url.is_none()
            && self.website.is_none()
            && self.bio.is_none()
            && self.evidence.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = RawRecord::new(Source::Github)
            .with_handle("octocat")
            .with_name("The Octocat")
            .with_evidence(EvidenceSnippet::new(Source::Github, "shipped a thing"));

        assert_eq!(record.source, Source::Github);
        assert_eq!(record.handle.as_deref(), Some("octocat"));
        assert!(!record.is_empty());
        assert!(record.all_text().contains("shipped"));
    }

    #[test]
    fn test_empty_record() {
        let record = RawRecord::new(Source::BraveSearch);
        assert!(record.is_empty());
        assert_eq!(record.all_text(), "");
    }

    #[test]
    fn test_source_roundtrip() {
        let json = serde_json::to_string(&Source::YCombinator).unwrap();
        assert_eq!(json, "\"y_combinator\"");
        let back: Source = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Source::YCombinator);
    }
}
