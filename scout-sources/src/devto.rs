//! Dev.to collaborator over the Forem articles API
//!
//! The public API has no free-text search, so discovery is tag-driven: walk
//! a fixed tag list, keep articles whose title/description/tags clear a
//! relevance threshold, then fetch the author's profile for identifiers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use scout_core::{EvidenceSnippet, RawRecord, Source};

use crate::{CandidateSource, SourceError};

const DEVTO_BASE: &str = "https://dev.to/api";

/// Tags that surface vibe-coding authors
const SEARCH_TAGS: &[&str] = &[
    "cursor",
    "v0",
    "ai",
    "llm",
    "openai",
    "langchain",
    "gpt",
    "anthropic",
    "claude",
    "copilot",
    "prototype",
    "mvp",
    "startup",
    "sidehustle",
    "buildinpublic",
    "shipping",
    "hackathon",
    "fintech",
    "payments",
];

/// Articles below this relevance are ignored
const MIN_RELEVANCE: f64 = 0.2;

const HIGH_SIGNAL: &[&str] = &[
    "shipped",
    "launched",
    "built",
    "prototype",
    "mvp",
    "demo",
    "weekend project",
];
const TOOL_SIGNAL: &[&str] = &[
    "cursor",
    "v0",
    "replit",
    "copilot",
    "langchain",
    "openai",
    "anthropic",
    "claude",
    "gpt",
];
const FOUNDER_SIGNAL: &[&str] = &["founder", "startup", "yc", "bootstrapped", "indie"];

/// Configuration for the Dev.to crawl
#[derive(Debug, Clone)]
pub struct DevToConfig {
    /// Maximum articles pulled per tag
    pub max_articles_per_tag: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for DevToConfig {
    fn default() -> Self {
        Self {
            max_articles_per_tag: 15,
            timeout_secs: 30,
        }
    }
}

/// Crawls Dev.to articles by tag and resolves their authors
pub struct DevToSource {
    config: DevToConfig,
    http_client: Client,
    seen_authors: std::collections::HashSet<String>,
}

impl DevToSource {
    pub fn new(config: DevToConfig) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(std::time::Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            config,
            seen_authors: std::collections::HashSet::new(),
        }
    }

    async fn articles_for_tag(&self, tag: &str, max_results: usize) -> Vec<DevToArticle> {
        let response = match self
            .http_client
            .get(format!("{DEVTO_BASE}/articles"))
            .header("Accept", "application/json")
            .query(&[
                ("tag", tag),
                ("per_page", &max_results.min(30).to_string()),
            ])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                debug!(tag, error = %e, "devto articles request failed");
                return vec![];
            }
        };

        if !response.status().is_success() {
            debug!(tag, status = %response.status(), "devto api error");
            return vec![];
        }

        match response.json::<Vec<DevToArticle>>().await {
            Ok(mut articles) => {
                articles.truncate(max_results);
                articles
            }
            Err(e) => {
                debug!(tag, error = %e, "failed to parse devto response");
                vec![]
            }
        }
    }

    async fn get_user(&self, username: &str) -> Option<DevToUser> {
        let response = self
            .http_client
            .get(format!("{DEVTO_BASE}/users/by_username"))
            .header("Accept", "application/json")
            .query(&[("url", username)])
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            return None;
        }
        response.json::<DevToUser>().await.ok()
    }

    fn build_record(&self, article: &DevToArticle, profile: Option<&DevToUser>) -> Option<RawRecord> {
        let username = article.user.as_ref()?.username.as_deref()?;
        let article_url = article.url.as_deref();

        let mut record = RawRecord::new(Source::DevTo).with_handle(username);

        if !article.title.is_empty() {
            let mut snippet = EvidenceSnippet::new(Source::DevTo, &article.title);
            if let Some(url) = article_url {
                snippet = snippet.with_url(url);
            }
            record = record.with_evidence(snippet);
        }
        if let Some(description) = article.description.as_deref().filter(|d| !d.is_empty()) {
            let mut snippet = EvidenceSnippet::new(Source::DevTo, description);
            if let Some(url) = article_url {
                snippet = snippet.with_url(url);
            }
            record = record.with_evidence(snippet);
        }
        if !article.tag_list.is_empty() {
            let mut snippet = EvidenceSnippet::new(
                Source::DevTo,
                format!("Tags: {}", article.tag_list.join(", ")),
            );
            if let Some(url) = article_url {
                snippet = snippet.with_url(url);
            }
            record = record.with_evidence(snippet);
        }

        if let Some(url) = article_url {
            record = record.with_demo_url(url);
        }
        if let Some(published) = article.published_at.as_deref() {
            record.last_activity = DateTime::parse_from_rfc3339(published)
                .ok()
                .map(|dt| dt.with_timezone(&Utc));
        }

        record.name = article.user.as_ref().and_then(|u| u.name.clone());
        if let Some(profile) = profile {
            if profile.name.is_some() {
                record.name = profile.name.clone();
            }
            record.bio = profile.summary.clone().filter(|b| !b.is_empty());
            record.location = profile.location.clone().filter(|l| !l.is_empty());
            record.website = profile.website_url.clone().filter(|w| !w.is_empty());
        }

        Some(record)
    }
}

/// Fraction of vibe-coding relevance in an article's visible text and tags
fn article_relevance(article: &DevToArticle) -> f64 {
    let text = format!(
        "{} {}",
        article.title,
        article.description.as_deref().unwrap_or("")
    )
    .to_lowercase();
    let tags: Vec<String> = article.tag_list.iter().map(|t| t.to_lowercase()).collect();

    let mut score: f64 = 0.0;
    for kw in HIGH_SIGNAL {
        if text.contains(kw) {
            score += 0.15;
        }
    }
    for tool in TOOL_SIGNAL {
        if text.contains(tool) || tags.iter().any(|t| t == tool) {
            score += 0.1;
        }
    }
    for signal in FOUNDER_SIGNAL {
        if text.contains(signal) || tags.iter().any(|t| t == signal) {
            score += 0.1;
        }
    }

    match article.positive_reactions_count {
        n if n >= 50 => score += 0.15,
        n if n >= 20 => score += 0.1,
        n if n >= 5 => score += 0.05,
        _ => {}
    }

    score.min(1.0)
}

#[async_trait]
impl CandidateSource for DevToSource {
    fn source(&self) -> Source {
        Source::DevTo
    }

    async fn crawl(&mut self, limit: usize) -> Result<Vec<RawRecord>, SourceError> {
        let mut records = Vec::new();
        info!(tags = SEARCH_TAGS.len(), limit, "starting devto crawl");

        'tags: for tag in SEARCH_TAGS {
            let articles = self
                .articles_for_tag(tag, self.config.max_articles_per_tag)
                .await;
            debug!(tag, articles = articles.len(), "devto tag done");

            for article in articles {
                if records.len() >= limit {
                    break 'tags;
                }

                let Some(username) = article
                    .user
                    .as_ref()
                    .and_then(|u| u.username.clone())
                else {
                    continue;
                };
                if !self.seen_authors.insert(username.clone()) {
                    continue;
                }
                if article_relevance(&article) < MIN_RELEVANCE {
                    continue;
                }

                let profile = self.get_user(&username).await;
                if let Some(record) = self.build_record(&article, profile.as_ref()) {
                    records.push(record);
                }
            }
        }

        info!(records = records.len(), "devto crawl complete");
        Ok(records)
    }
}

// Forem API response types
#[derive(Debug, Clone, Deserialize)]
struct DevToArticle {
    #[serde(default)]
    title: String,
    description: Option<String>,
    url: Option<String>,
    published_at: Option<String>,
    #[serde(default)]
    positive_reactions_count: u32,
    #[serde(default)]
    tag_list: Vec<String>,
    user: Option<DevToArticleUser>,
}

#[derive(Debug, Clone, Deserialize)]
struct DevToArticleUser {
    username: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DevToUser {
    name: Option<String>,
    summary: Option<String>,
    location: Option<String>,
    website_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, description: &str, tags: &[&str], reactions: u32) -> DevToArticle {
        DevToArticle {
            title: title.to_string(),
            description: Some(description.to_string()),
            url: Some("https://dev.to/someone/post".to_string()),
            published_at: Some("2025-07-15T09:30:00Z".to_string()),
            positive_reactions_count: reactions,
            tag_list: tags.iter().map(|t| t.to_string()).collect(),
            user: Some(DevToArticleUser {
                username: Some("someone".to_string()),
                name: Some("Some One".to_string()),
            }),
        }
    }

    #[test]
    fn test_relevance_rewards_shipping_and_tools() {
        let relevant = article(
            "How I shipped an AI agent MVP with Cursor",
            "weekend project, live demo inside",
            &["cursor", "ai"],
            25,
        );
        assert!(article_relevance(&relevant) >= 0.5);

        let irrelevant = article("My favorite keyboard switches", "a review", &["hardware"], 2);
        assert!(article_relevance(&irrelevant) < MIN_RELEVANCE);
    }

    #[test]
    fn test_build_record_merges_profile() {
        let source = DevToSource::new(DevToConfig::default());
        let article = article("Shipped my fintech prototype", "demo", &["fintech"], 10);
        let profile = DevToUser {
            name: Some("Jane Builder".to_string()),
            summary: Some("Indie hacker shipping weekly".to_string()),
            location: Some("Oakland, CA".to_string()),
            website_url: Some("https://janebuilder.dev".to_string()),
        };

        let record = source.build_record(&article, Some(&profile)).unwrap();
        assert_eq!(record.source, Source::DevTo);
        assert_eq!(record.handle.as_deref(), Some("someone"));
        assert_eq!(record.name.as_deref(), Some("Jane Builder"));
        assert_eq!(record.location.as_deref(), Some("Oakland, CA"));
        assert_eq!(record.website.as_deref(), Some("https://janebuilder.dev"));
        assert_eq!(record.demo_urls, vec!["https://dev.to/someone/post"]);
        // title + description + tags
        assert_eq!(record.evidence.len(), 3);
    }

    #[test]
    fn test_build_record_without_profile_keeps_article_name() {
        let source = DevToSource::new(DevToConfig::default());
        let article = article("Launched an LLM app", "", &[], 5);
        let record = source.build_record(&article, None).unwrap();
        assert_eq!(record.name.as_deref(), Some("Some One"));
        assert!(record.bio.is_none());
    }
}
