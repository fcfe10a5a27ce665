//! Ranker
//!
//! Drops excluded (non-US) candidates, orders the rest, assigns 1-based
//! ranks. Tie-break chain: total score desc, distinct source count desc,
//! email presence first, then stable discovery order. Fully
//! deterministic for a given input.

use std::cmp::Ordering;

use tracing::info;

use scout_core::MergedCandidate;

/// Sort, filter and rank scored candidates. Returns the final ordered
/// sequence; dropped candidates are gone from the output entirely.
pub fn rank_candidates(mut candidates: Vec<MergedCandidate>) -> Vec<MergedCandidate> {
    let before = candidates.len();
    candidates.retain(|c| !c.excluded);
    let dropped = before - candidates.len();
    if dropped > 0 {
        info!(dropped, "excluded non-US candidates from ranking");
    }

    candidates.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.source_count().cmp(&a.source_count()))
            .then_with(|| b.email.is_some().cmp(&a.email.is_some()))
            .then_with(|| a.first_seen.cmp(&b.first_seen))
    });

    for (i, candidate) in candidates.iter_mut().enumerate() {
        candidate.rank = Some(i as u32 + 1);
    }
    candidates
}
