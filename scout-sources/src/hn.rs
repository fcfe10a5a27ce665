//! Hacker News collaborator over the Algolia HN Search API
//!
//! Walks a fixed list of Show-HN queries, one record per distinct author.
//! Low-engagement stories (under 5 points) are dropped before the author's
//! profile is fetched.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use scout_core::{EvidenceSnippet, RawRecord, Source};

use crate::{CandidateSource, SourceError};

const ALGOLIA_BASE: &str = "https://hn.algolia.com/api/v1";

/// Show-HN queries that surface vibe-coding signals
const SEARCH_QUERIES: &[&str] = &[
    // Tools
    "Show HN Cursor",
    "Show HN v0",
    "Show HN Replit",
    "Show HN prototype",
    "Show HN MVP",
    "Show HN AI agent",
    "Show HN LLM",
    "Show HN OpenAI",
    "Show HN Anthropic",
    "Show HN Claude",
    "Show HN GPT",
    "Show HN LangChain",
    // Shipping signals
    "Show HN weekend project",
    "Show HN demo",
    "Show HN built",
    "Show HN launched",
    // Fintech
    "Show HN fintech",
    "Show HN payments",
    "Show HN banking",
    // Founder signals
    "Show HN YC",
    "Show HN startup",
];

/// Minimum story points before an author is worth a profile fetch
const MIN_STORY_POINTS: u32 = 5;

/// Configuration for the Hacker News crawl
#[derive(Debug, Clone)]
pub struct HnConfig {
    /// Maximum stories pulled per search query
    pub max_results_per_query: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HnConfig {
    fn default() -> Self {
        Self {
            max_results_per_query: 20,
            timeout_secs: 30,
        }
    }
}

/// Crawls Show-HN stories and their authors
pub struct HackerNewsSource {
    config: HnConfig,
    http_client: Client,
    seen_authors: std::collections::HashSet<String>,
}

impl HackerNewsSource {
    pub fn new(config: HnConfig) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(std::time::Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            config,
            seen_authors: std::collections::HashSet::new(),
        }
    }

    /// Search stories for one query, paging until `max_results` or Algolia
    /// runs out of pages
    async fn search(&self, query: &str, max_results: usize) -> Vec<AlgoliaHit> {
        let mut hits = Vec::new();
        let mut page: usize = 0;
        let hits_per_page = max_results.min(20);

        while hits.len() < max_results {
            let response = match self
                .http_client
                .get(format!("{ALGOLIA_BASE}/search"))
                .query(&[
                    ("query", query),
                    ("tags", "show_hn"),
                    ("hitsPerPage", &hits_per_page.to_string()),
                    ("page", &page.to_string()),
                ])
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    debug!(query, error = %e, "hn search request failed");
                    break;
                }
            };

            if !response.status().is_success() {
                debug!(query, status = %response.status(), "hn search error");
                break;
            }

            let data = match response.json::<AlgoliaSearchResponse>().await {
                Ok(d) => d,
                Err(e) => {
                    debug!(query, error = %e, "failed to parse hn response");
                    break;
                }
            };

            if data.hits.is_empty() {
                break;
            }
            hits.extend(data.hits);

            page += 1;
            if page >= data.nb_pages {
                break;
            }
        }

        hits.truncate(max_results);
        hits
    }

    async fn get_user(&self, username: &str) -> Option<AlgoliaUser> {
        let response = self
            .http_client
            .get(format!("{ALGOLIA_BASE}/users/{username}"))
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            return None;
        }
        response.json::<AlgoliaUser>().await.ok()
    }

    fn build_record(&self, hit: &AlgoliaHit, user: Option<&AlgoliaUser>) -> Option<RawRecord> {
        let author = hit.author.as_deref()?;
        let item_url = format!("https://news.ycombinator.com/item?id={}", hit.object_id);

        let mut record = RawRecord::new(Source::HackerNews).with_handle(author);

        if let Some(title) = hit.title.as_deref().filter(|t| !t.is_empty()) {
            record = record.with_evidence(
                EvidenceSnippet::new(Source::HackerNews, title).with_url(&item_url),
            );
        }
        if let Some(text) = hit.story_text.as_deref().filter(|t| !t.is_empty()) {
            let snippet = scout_core::text::truncate_text(text, 280);
            record = record.with_evidence(
                EvidenceSnippet::new(Source::HackerNews, snippet).with_url(&item_url),
            );
        }
        if let Some(url) = hit.url.as_deref().filter(|u| u.starts_with("http")) {
            record = record.with_demo_url(url);
        }
        if let Some(created) = hit.created_at.as_deref() {
            record.last_activity = parse_timestamp(created);
        }
        if let Some(about) = user
            .and_then(|u| u.about.as_deref())
            .filter(|a| !a.is_empty())
        {
            record = record.with_bio(about);
        }

        Some(record)
    }
}

#[async_trait]
impl CandidateSource for HackerNewsSource {
    fn source(&self) -> Source {
        Source::HackerNews
    }

    async fn crawl(&mut self, limit: usize) -> Result<Vec<RawRecord>, SourceError> {
        let mut records = Vec::new();
        info!(queries = SEARCH_QUERIES.len(), limit, "starting hn crawl");

        'queries: for query in SEARCH_QUERIES {
            let hits = self.search(query, self.config.max_results_per_query).await;
            debug!(query, stories = hits.len(), "hn query done");

            for hit in hits {
                if records.len() >= limit {
                    break 'queries;
                }

                let Some(author) = hit.author.clone() else {
                    continue;
                };
                if !self.seen_authors.insert(author.clone()) {
                    continue;
                }
                if hit.points.unwrap_or(0) < MIN_STORY_POINTS {
                    continue;
                }

                let user = self.get_user(&author).await;
                if let Some(record) = self.build_record(&hit, user.as_ref()) {
                    records.push(record);
                }
            }
        }

        info!(records = records.len(), "hn crawl complete");
        Ok(records)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

// Algolia API response types
#[derive(Debug, Deserialize)]
struct AlgoliaSearchResponse {
    hits: Vec<AlgoliaHit>,
    #[serde(rename = "nbPages", default)]
    nb_pages: usize,
}

#[derive(Debug, Clone, Deserialize)]
struct AlgoliaHit {
    #[serde(rename = "objectID")]
    object_id: String,
    title: Option<String>,
    url: Option<String>,
    author: Option<String>,
    points: Option<u32>,
    created_at: Option<String>,
    story_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AlgoliaUser {
    about: Option<String>,
}
