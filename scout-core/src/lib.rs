//! VibeScout Core - Domain model for cross-source candidate aggregation
//!
//! This crate provides the foundational primitives:
//! - Raw candidate records as produced by source collaborators
//! - The Identifier Extractor (syntactic normalization, no network, no fuzz)
//! - Signal keyword tables shared by resolution and scoring
//! - Location bucket classification

pub mod record;
pub mod candidate;
pub mod identifiers;
pub mod keywords;
pub mod location;
pub mod text;

pub use record::*;
pub use candidate::*;
pub use identifiers::*;
pub use location::*;

/// Default fuzzy name-similarity threshold for identity resolution
pub const DEFAULT_NAME_SIMILARITY: f64 = 0.85;

/// Minimum normalized-name length considered for fuzzy matching
pub const MIN_FUZZY_NAME_LEN: usize = 6;

/// Maximum length of a merged bio before truncation
pub const MAX_MERGED_BIO_LEN: usize = 2000;
