//! VibeScout Resolve - cross-source identity resolution
//!
//! Turns a batch of raw per-source records into one merged candidate per
//! real-world person:
//! - **Match Index**: exact lookups over normalized strong identifiers
//! - **Union-Merge Engine**: disjoint-set grouping over record indices,
//!   exact matches first, then fuzzy name matches with corroboration
//! - **Evidence Merger**: per-field merge policy with provenance
//!
//! The whole pass is synchronous, single-threaded and deterministic:
//! the same records in the same order always produce the same partition.

pub mod index;
pub mod merge;
pub mod resolver;
pub mod union_find;

pub use index::MatchIndex;
pub use merge::merge_class;
pub use resolver::{resolve, ResolveConfig, Resolver};
pub use union_find::UnionFind;
