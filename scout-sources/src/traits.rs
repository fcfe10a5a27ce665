//! Common interface for source collaborators

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use scout_core::{RawRecord, Source};

/// Errors from source crawls
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error from {src}: status {status}")]
    Api { src: Source, status: u16 },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),
}

/// A crawlable external source of candidate records
///
/// Implementations own their HTTP client, pacing and per-run dedup state.
/// `crawl` returns a best-effort batch: individual request failures are
/// logged and skipped rather than failing the whole crawl.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Which source tag this collaborator emits
    fn source(&self) -> Source;

    /// Crawl up to `limit` candidate records
    async fn crawl(&mut self, limit: usize) -> Result<Vec<RawRecord>, SourceError>;
}

/// Crawl every source in turn, tolerating per-source failures
///
/// A source that errors out contributes nothing but never aborts the run.
pub async fn crawl_all(
    sources: &mut [Box<dyn CandidateSource>],
    limit_per_source: usize,
) -> Vec<RawRecord> {
    let mut records = Vec::new();

    for source in sources.iter_mut() {
        let tag = source.source();
        match source.crawl(limit_per_source).await {
            Ok(batch) => {
                info!(source = %tag, records = batch.len(), "source crawl complete");
                records.extend(batch);
            }
            Err(e) => {
                warn!(source = %tag, error = %e, "source crawl failed, skipping");
            }
        }
    }

    records
}
