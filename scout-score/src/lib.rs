//! VibeScout Score - transparent multi-factor scoring and ranking
//!
//! Five independently capped subscores summing to a 0-100 raw score, a
//! location multiplier, a template recruiter pitch, and a deterministic
//! ranker with tie-breaking. Every point awarded carries a `"+N: ..."`
//! explanation string for audit.

pub mod config;
pub mod pipeline;
pub mod pitch;
pub mod rank;
pub mod scorer;

pub use config::ScoreConfig;
pub use pipeline::run_pipeline;
pub use rank::rank_candidates;
pub use scorer::Scorer;
