//! GitHub collaborator over the GitHub Search and Users APIs
//!
//! Repo search drives discovery; every hit's owner becomes at most one
//! record, fleshed out from their profile and recent owned repos. Awesome
//! lists, tip collections and license-bypass repos are filtered out up
//! front so they never burn a profile fetch.

use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use scout_core::{EvidenceSnippet, RawRecord, Source};

use crate::{CandidateSource, SourceError};

const GITHUB_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = "vibescout/0.1";

/// Repo searches targeting original vibe-coded projects
const SEARCH_QUERIES: &[&str] = &[
    // Original projects built with AI tools
    "\"built with Cursor\" -awesome -tips -rules",
    "\"made with v0\" OR \"built with v0\" -awesome",
    "\"shipped\" \"prototype\" AI -awesome -list",
    "\"weekend project\" AI OR LLM -awesome",
    "\"hackathon\" \"demo\" AI agent -awesome",
    // Actual AI/LLM applications
    "\"AI agent\" \"deployed\" OR \"live\" -awesome -tips",
    "\"LLM app\" \"demo\" OR \"try it\" -awesome",
    "LangChain \"production\" OR \"deployed\" -awesome",
    // Fintech projects
    "fintech \"prototype\" OR \"MVP\" -awesome",
    "payments \"demo\" stripe OR plaid -awesome",
    // Founder/startup projects
    "\"YC\" OR \"Y Combinator\" \"launched\" -awesome -list",
    "startup \"shipped\" \"prototype\" -awesome",
    // Specific shipping signals
    "\"live demo\" AI OR LLM -awesome",
    "\"try it out\" prototype -awesome",
];

// Tip collections and guides rather than original projects
static SKIP_REPO_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^awesome-",
        r"-awesome$",
        r"^cursor-tips",
        r"^cursor-rules",
        r"-tips$",
        r"-tricks$",
        r"-guide$",
        r"-tutorial$",
        r"-cheatsheet$",
        r"^dotfiles",
        r"^\.cursor",
        r"cursorrules$",
        r"^cursor-free",
        r"machine-?id",
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?i){p}")).unwrap())
    .collect()
});

static SKIP_DESCRIPTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"curated list",
        r"awesome list",
        r"collection of",
        r"tips and tricks",
        r"cheat sheet",
        r"reset.*machine.*id",
        r"bypass.*trial",
        r"free.*vip",
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?i){p}")).unwrap())
    .collect()
});

/// Configuration for the GitHub crawl
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// Personal access token (optional, raises rate limits)
    pub token: Option<String>,
    /// Maximum repos pulled per search query
    pub max_repos_per_query: usize,
    /// How many of a user's own repos to sample for shipping stats
    pub max_user_repos: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: std::env::var("GITHUB_TOKEN").ok(),
            max_repos_per_query: 30,
            max_user_repos: 10,
            timeout_secs: 30,
        }
    }
}

/// Crawls GitHub repo search results and their owners
pub struct GithubSource {
    config: GithubConfig,
    http_client: Client,
    seen_users: std::collections::HashSet<String>,
}

impl GithubSource {
    pub fn new(config: GithubConfig) -> Self {
        if config.token.is_none() {
            warn!("no GITHUB_TOKEN set, api rate limits will be restrictive");
        }
        Self {
            http_client: Client::builder()
                .timeout(std::time::Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            config,
            seen_users: std::collections::HashSet::new(),
        }
    }

    async fn api_get<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Option<T> {
        let mut request = self
            .http_client
            .get(format!("{GITHUB_BASE}{endpoint}"))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .header("User-Agent", USER_AGENT)
            .query(params);

        if let Some(token) = &self.config.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                debug!(endpoint, error = %e, "github request failed");
                return None;
            }
        };

        match response.status().as_u16() {
            200 => response.json::<T>().await.ok(),
            403 => {
                warn!(endpoint, "github rate limit hit or forbidden");
                None
            }
            404 => None,
            status => {
                debug!(endpoint, status, "github api error");
                None
            }
        }
    }

    async fn search_repos(&self, query: &str, max_results: usize) -> Vec<GithubRepo> {
        let params = [
            ("q", query.to_string()),
            ("sort", "updated".to_string()),
            ("order", "desc".to_string()),
            ("per_page", max_results.min(30).to_string()),
        ];

        match self
            .api_get::<GithubSearchResponse>("/search/repositories", &params)
            .await
        {
            Some(data) => data.items.into_iter().take(max_results).collect(),
            None => vec![],
        }
    }

    async fn get_user(&self, login: &str) -> Option<GithubUser> {
        self.api_get(&format!("/users/{login}"), &[]).await
    }

    async fn get_user_repos(&self, login: &str) -> Vec<GithubRepo> {
        let params = [
            ("sort", "updated".to_string()),
            ("direction", "desc".to_string()),
            ("per_page", self.config.max_user_repos.to_string()),
            ("type", "owner".to_string()),
        ];
        let repos: Vec<GithubRepo> = self
            .api_get(&format!("/users/{login}/repos"), &params)
            .await
            .unwrap_or_default();

        repos.into_iter().filter(|r| !r.fork).collect()
    }

    fn build_record(
        &self,
        matched_repo: &GithubRepo,
        user: &GithubUser,
        repos: &[GithubRepo],
    ) -> RawRecord {
        let mut record = RawRecord::new(Source::Github).with_handle(&user.login);

        record.name = user.name.clone().filter(|n| !n.is_empty());
        record.bio = user.bio.clone().filter(|b| !b.is_empty());
        record.location = user.location.clone().filter(|l| !l.is_empty());
        record.email = user
            .email
            .clone()
            .filter(|e| !e.is_empty() && !e.ends_with("@users.noreply.github.com"));
        record.website = user
            .blog
            .clone()
            .filter(|b| b.starts_with("http"));

        let description = matched_repo.description.as_deref().unwrap_or("");
        record = record.with_evidence(
            EvidenceSnippet::new(
                Source::Github,
                format!("{}: {}", matched_repo.name, description),
            )
            .with_url(&matched_repo.html_url),
        );

        for repo in repos {
            if let Some(homepage) = repo.homepage.as_deref().filter(|h| h.starts_with("http")) {
                record = record.with_demo_url(homepage);
            }
        }

        record.stars_total = repos.iter().map(|r| r.stargazers_count).sum();
        record.repo_count = repos.len() as u32;
        record.last_activity = repos
            .iter()
            .filter_map(|r| r.pushed_at.as_deref())
            .filter_map(parse_timestamp)
            .max()
            .or_else(|| matched_repo.pushed_at.as_deref().and_then(parse_timestamp));

        record
    }
}

/// True for repos that are collections or guides rather than projects
fn should_skip_repo(repo: &GithubRepo) -> bool {
    let name = repo.name.to_lowercase();
    if SKIP_REPO_PATTERNS.iter().any(|p| p.is_match(&name)) {
        debug!(repo = %repo.name, "skipping repo, name matches skip pattern");
        return true;
    }

    let description = repo.description.as_deref().unwrap_or("");
    if SKIP_DESCRIPTION_PATTERNS
        .iter()
        .any(|p| p.is_match(description))
    {
        debug!(repo = %repo.name, "skipping repo, description matches skip pattern");
        return true;
    }

    false
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[async_trait]
impl CandidateSource for GithubSource {
    fn source(&self) -> Source {
        Source::Github
    }

    async fn crawl(&mut self, limit: usize) -> Result<Vec<RawRecord>, SourceError> {
        let mut records = Vec::new();
        info!(queries = SEARCH_QUERIES.len(), limit, "starting github crawl");

        'queries: for query in SEARCH_QUERIES {
            let repos = self
                .search_repos(query, self.config.max_repos_per_query)
                .await;
            debug!(query, repos = repos.len(), "github query done");

            for repo in repos {
                if records.len() >= limit {
                    break 'queries;
                }
                if should_skip_repo(&repo) {
                    continue;
                }

                let Some(login) = repo.owner.as_ref().map(|o| o.login.clone()) else {
                    continue;
                };
                if !self.seen_users.insert(login.clone()) {
                    continue;
                }

                let Some(user) = self.get_user(&login).await else {
                    continue;
                };
                let user_repos = self.get_user_repos(&login).await;
                records.push(self.build_record(&repo, &user, &user_repos));
            }
        }

        info!(records = records.len(), "github crawl complete");
        Ok(records)
    }
}

// GitHub API response types
#[derive(Debug, Deserialize)]
struct GithubSearchResponse {
    items: Vec<GithubRepo>,
}

#[derive(Debug, Clone, Deserialize)]
struct GithubRepo {
    name: String,
    #[serde(default)]
    html_url: String,
    description: Option<String>,
    homepage: Option<String>,
    #[serde(default)]
    stargazers_count: u32,
    #[serde(default)]
    fork: bool,
    pushed_at: Option<String>,
    owner: Option<GithubOwner>,
}

#[derive(Debug, Clone, Deserialize)]
struct GithubOwner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    login: String,
    name: Option<String>,
    bio: Option<String>,
    email: Option<String>,
    blog: Option<String>,
    location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, description: Option<&str>) -> GithubRepo {
        GithubRepo {
            name: name.to_string(),
            html_url: format!("https://github.com/u/{name}"),
            description: description.map(|d| d.to_string()),
            homepage: None,
            stargazers_count: 0,
            fork: false,
            pushed_at: None,
            owner: Some(GithubOwner {
                login: "u".to_string(),
            }),
        }
    }

    #[test]
    fn test_skip_patterns_catch_lists_and_bypass_tools() {
        assert!(should_skip_repo(&repo("awesome-cursor", None)));
        assert!(should_skip_repo(&repo("cursor-tips-2024", None)));
        assert!(should_skip_repo(&repo("reset-machine-id", None)));
        assert!(should_skip_repo(&repo(
            "my-project",
            Some("A curated list of AI tools")
        )));
        assert!(!should_skip_repo(&repo(
            "ledger-ai",
            Some("Fintech prototype built with Cursor, live demo")
        )));
    }

    #[test]
    fn test_build_record_aggregates_repo_stats() {
        let source = GithubSource::new(GithubConfig {
            token: Some("t".to_string()),
            ..GithubConfig::default()
        });
        let matched = repo("ledger-ai", Some("Fintech prototype"));
        let user = GithubUser {
            login: "u".to_string(),
            name: Some("Uma Dev".to_string()),
            bio: Some("Shipping AI agents".to_string()),
            email: Some("uma@example.com".to_string()),
            blog: Some("https://uma.dev".to_string()),
            location: Some("San Francisco, CA".to_string()),
        };
        let mut r1 = repo("ledger-ai", None);
        r1.stargazers_count = 40;
        r1.homepage = Some("https://ledger.uma.dev".to_string());
        r1.pushed_at = Some("2025-08-01T00:00:00Z".to_string());
        let mut r2 = repo("sidecar", None);
        r2.stargazers_count = 5;
        r2.pushed_at = Some("2025-05-10T00:00:00Z".to_string());

        let record = source.build_record(&matched, &user, &[r1, r2]);
        assert_eq!(record.handle.as_deref(), Some("u"));
        assert_eq!(record.stars_total, 45);
        assert_eq!(record.repo_count, 2);
        assert_eq!(record.demo_urls, vec!["https://ledger.uma.dev"]);
        assert_eq!(
            record.last_activity.unwrap(),
            parse_timestamp("2025-08-01T00:00:00Z").unwrap()
        );
        assert!(record.evidence[0].text.contains("Fintech prototype"));
    }

    #[test]
    fn test_noreply_email_dropped() {
        let source = GithubSource::new(GithubConfig {
            token: Some("t".to_string()),
            ..GithubConfig::default()
        });
        let user = GithubUser {
            login: "u".to_string(),
            name: None,
            bio: None,
            email: Some("12345+u@users.noreply.github.com".to_string()),
            blog: None,
            location: None,
        };
        let record = source.build_record(&repo("x", None), &user, &[]);
        assert!(record.email.is_none());
    }
}
