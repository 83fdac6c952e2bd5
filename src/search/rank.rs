//! Threshold filter, stable ordering, top-K truncation

use super::SearchResult;
use std::cmp::Ordering;

/// Default number of candidates returned by a search
pub const DEFAULT_TOP_K: usize = 20;

/// Filter to results at or above the threshold (inclusive), sort
/// descending by total score and truncate to `top_k`.
///
/// The sort is stable, so candidates with equal scores keep their
/// traversal order. Pure and deterministic given its inputs.
pub fn rank(mut results: Vec<SearchResult>, top_k: usize, similarity_threshold: f64) -> Vec<SearchResult> {
    results.retain(|r| r.scores.total_score >= similarity_threshold);
    results.sort_by(|a, b| {
        b.scores
            .total_score
            .partial_cmp(&a.scores.total_score)
            .unwrap_or(Ordering::Equal)
    });
    results.truncate(top_k);
    results
}
