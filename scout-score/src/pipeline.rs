//! End-to-end batch transformation
//!
//! Raw records in, ranked candidates out. Single-threaded, synchronous,
//! deterministic; invoked once all source collaborators have handed off
//! their immutable record batches. No record can abort the run - the
//! worst a degenerate record does is rank last as a zero-score
//! singleton.

use tracing::info;

use scout_core::{MergedCandidate, RawRecord};
use scout_resolve::{resolve, ResolveConfig};

use crate::rank::rank_candidates;
use crate::scorer::Scorer;

/// Resolve, merge, score and rank a full batch
pub fn run_pipeline(
    records: &[RawRecord],
    resolve_config: &ResolveConfig,
    scorer: &Scorer,
) -> Vec<MergedCandidate> {
    let mut candidates = resolve(records, resolve_config);
    info!(
        records = records.len(),
        unique = candidates.len(),
        "identity resolution complete"
    );

    for candidate in &mut candidates {
        scorer.score(candidate);
    }

    let ranked = rank_candidates(candidates);
    info!(ranked = ranked.len(), "pipeline complete");
    ranked
}
