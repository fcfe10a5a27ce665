//! Identifier Extractor
//!
//! Reduces a raw record to the set of typed identifiers it carries, each
//! syntactically normalized. Purely deterministic: no network calls, no
//! fuzzy logic. Absent fields map to "no identifier of that type".

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::record::{RawRecord, Source};

static LINKEDIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)linkedin\.com/in/([A-Za-z0-9_-]+)").unwrap());

static DOMAIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:https?://)?(?:www\.)?([^/?#:\s]+)").unwrap());

/// Shared platform domains that never identify an individual
const PLATFORM_DOMAINS: &[&str] = &[
    "github.com",
    "twitter.com",
    "x.com",
    "linkedin.com",
    "medium.com",
    "substack.com",
    "youtube.com",
    "reddit.com",
    "news.ycombinator.com",
    "producthunt.com",
    "dev.to",
];

/// The normalized identifiers carried by one record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentifierSet {
    /// Platform-qualified handle, so identical usernames on different
    /// platforms never collide
    pub handle: Option<(Source, String)>,
    /// Lower-cased, trimmed email
    pub email: Option<String>,
    /// LinkedIn slug (`linkedin.com/in/<slug>`)
    pub linkedin_slug: Option<String>,
    /// Registrable website domain (scheme, `www.` and path stripped)
    pub website_domain: Option<String>,
    /// Lower-cased, punctuation-stripped display name
    pub normalized_name: Option<String>,
}

impl IdentifierSet {
    /// Extract the identifier set from a record. Total over any record.
    pub fn extract(record: &RawRecord) -> Self {
        Self {
            handle: record
                .handle
                .as_deref()
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(|h| (record.source, h.to_lowercase())),
            email: record.email.as_deref().and_then(normalize_email),
            linkedin_slug: record.linkedin_url.as_deref().and_then(normalize_linkedin),
            website_domain: record.website.as_deref().and_then(registrable_domain),
            normalized_name: record.name.as_deref().and_then(normalize_name),
        }
    }

    /// True when the set carries no strong identifier
    pub fn has_strong(&self) -> bool {
        self.handle.is_some()
            || self.email.is_some()
            || self.linkedin_slug.is_some()
            || self.website_domain.is_some()
    }

    /// Typed bucket keys for the match index. Names are deliberately not
    /// included: name similarity is a weak signal handled separately.
    pub fn strong_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        if let Some((source, handle)) = &self.handle {
            keys.push(format!("handle:{}:{}", source.label(), handle));
        }
        if let Some(email) = &self.email {
            keys.push(format!("email:{}", email));
        }
        if let Some(slug) = &self.linkedin_slug {
            keys.push(format!("linkedin:{}", slug));
        }
        if let Some(domain) = &self.website_domain {
            keys.push(format!("domain:{}", domain));
        }
        keys
    }
}

/// Lower-case and trim an email; reject blanks and strings without `@`
pub fn normalize_email(raw: &str) -> Option<String> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return None;
    }
    Some(email)
}

/// Reduce a LinkedIn URL to its lower-cased profile slug
pub fn normalize_linkedin(raw: &str) -> Option<String> {
    LINKEDIN_REGEX
        .captures(raw)
        .map(|c| c[1].to_lowercase())
}

/// Reduce a URL to its registrable domain: scheme, `www.`, port, path and
/// query stripped. Shared platform domains are rejected because they do
/// not identify an individual.
pub fn registrable_domain(raw: &str) -> Option<String> {
    let captures = DOMAIN_REGEX.captures(raw.trim())?;
    let domain = captures[1].to_lowercase();
    if domain.is_empty() || !domain.contains('.') {
        return None;
    }
    if PLATFORM_DOMAINS.iter().any(|p| domain == *p) {
        return None;
    }
    Some(domain)
}

/// Lower-case a display name, strip punctuation, collapse whitespace
pub fn normalize_name(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut last_was_space = true;
    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
            last_was_space = false;
        } else if !last_was_space {
            out.push(' ');
            last_was_space = true;
        }
    }
    let trimmed = out.trim().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_full_set() {
        let record = RawRecord::new(Source::Github)
            .with_handle("OctoCat")
            .with_name("Mona  Lisa-Octocat")
            .with_email("  Mona@Example.COM ")
            .with_linkedin("https://www.linkedin.com/in/Mona-Octocat/?trk=profile")
            .with_website("https://www.monalisa.dev/projects?x=1");

        let ids = IdentifierSet::extract(&record);
        assert_eq!(ids.handle, Some((Source::Github, "octocat".to_string())));
        assert_eq!(ids.email.as_deref(), Some("mona@example.com"));
        assert_eq!(ids.linkedin_slug.as_deref(), Some("mona-octocat"));
        assert_eq!(ids.website_domain.as_deref(), Some("monalisa.dev"));
        assert_eq!(ids.normalized_name.as_deref(), Some("mona lisa octocat"));
        assert!(ids.has_strong());
    }

    #[test]
    fn test_platform_domains_rejected() {
        assert_eq!(registrable_domain("https://github.com/someone"), None);
        assert_eq!(registrable_domain("https://x.com/someone"), None);
        assert_eq!(
            registrable_domain("https://blog.example.io/post").as_deref(),
            Some("blog.example.io")
        );
    }

    #[test]
    fn test_empty_record_has_no_identifiers() {
        let ids = IdentifierSet::extract(&RawRecord::new(Source::BraveSearch));
        assert!(!ids.has_strong());
        assert!(ids.strong_keys().is_empty());
        assert_eq!(ids.normalized_name, None);
    }

    #[test]
    fn test_handle_is_platform_qualified() {
        let gh = IdentifierSet::extract(&RawRecord::new(Source::Github).with_handle("alice"));
        let rd = IdentifierSet::extract(&RawRecord::new(Source::Reddit).with_handle("alice"));
        assert_ne!(gh.strong_keys(), rd.strong_keys());
    }

    #[test]
    fn test_email_requires_at_sign() {
        assert_eq!(normalize_email("not-an-email"), None);
        assert_eq!(normalize_email("   "), None);
    }
}
