//! Match summaries
//!
//! The selector never gates on confidence; callers decide. A summary carries
//! what they usually need for that decision: how many per-field ratios were
//! high, which field drove the score, and whether a minimum count of high
//! fields was reached.

use crate::select::MatchResult;
use serde::Serialize;

/// Default number of high per-field ratios required to accept a match
pub const DEFAULT_MIN_HIGH_MATCHES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    /// Number of candidates considered
    pub candidates_count: usize,
    /// Overall similarity of the winner, 0.0 without one
    pub best_score: f64,
    /// Per-field ratios of the winner above the threshold
    pub high_match_count: usize,
    /// Field with the highest ratio in the winner
    pub top_field: Option<&'static str>,
    /// Whether `high_match_count` reached the caller's minimum
    pub accepted: bool,
}

impl MatchSummary {
    pub fn compute(
        result: Option<&MatchResult<'_>>,
        candidates_count: usize,
        threshold: f64,
        min_high_matches: usize,
    ) -> Self {
        let Some(result) = result else {
            return Self {
                candidates_count,
                best_score: 0.0,
                high_match_count: 0,
                top_field: None,
                accepted: false,
            };
        };

        let high_match_count = result.similarity.count_high_matches(threshold);
        Self {
            candidates_count,
            best_score: result.score,
            high_match_count,
            top_field: result.similarity.top_field(),
            accepted: high_match_count >= min_high_matches,
        }
    }
}
