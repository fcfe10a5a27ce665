//! VibeScout Sources - external candidate discovery
//!
//! Each collaborator crawls one public source and emits normalized
//! `RawRecord`s for the resolution pipeline:
//! - Hacker News Show-HN stories (Algolia search API)
//! - Dev.to articles by tag (Forem API)
//! - GitHub repo search plus owner profiles (REST API)
//!
//! Crawls are best-effort: a failing request or source degrades the batch,
//! never the run.

pub mod devto;
pub mod github;
pub mod hn;
pub mod traits;

pub use devto::{DevToConfig, DevToSource};
pub use github::{GithubConfig, GithubSource};
pub use hn::{HackerNewsSource, HnConfig};
pub use traits::{crawl_all, CandidateSource, SourceError};
