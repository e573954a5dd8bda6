//! Best-match selection
//!
//! Scores every candidate product against one cutout and picks the winner.
//! Candidates are product records whose nested `analysis` object carries
//! the product analysis; everything else on the record (ids, URLs, ...) is
//! passed back untouched with the result.

use crate::config::MatchConfig;
use crate::explain::MatchSummary;
use crate::fields::ExtractedFields;
use crate::score::SimilarityBreakdown;
use crate::weights::{MatchWeights, WeightsError};
use annotator_core::record::{AnalysisRecord, ANALYSIS_KEY};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};

/// Winning candidate for one cutout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult<'p> {
    /// Overall similarity of the winner
    pub score: f64,
    pub similarity: SimilarityBreakdown,
    /// The candidate record exactly as supplied
    pub product: &'p AnalysisRecord,
}

/// One scored candidate in a ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMatch<'p> {
    /// Position of the candidate in the input list
    pub index: usize,
    pub score: f64,
    pub similarity: SimilarityBreakdown,
    pub product: &'p AnalysisRecord,
}

/// Cutout-to-product matcher
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatchConfig,
}

impl Matcher {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// A copy of this matcher with different weights, normalized to sum to 1.0
    pub fn with_weights(&self, mut weights: MatchWeights) -> Result<Matcher, WeightsError> {
        weights.validate_and_normalize()?;
        let mut config = self.config.clone();
        config.weights = weights;
        Ok(Matcher::new(config))
    }

    pub fn extract(&self, record: &AnalysisRecord) -> ExtractedFields {
        self.config.rules.extract(record)
    }

    pub fn score(&self, product: &ExtractedFields, cutout: &ExtractedFields) -> SimilarityBreakdown {
        self.config.weights.score(product, cutout)
    }

    /// Fields of a candidate's nested analysis; a candidate without one is
    /// an empty product.
    fn candidate_fields(&self, candidate: &AnalysisRecord) -> ExtractedFields {
        match candidate.get(ANALYSIS_KEY) {
            Some(analysis) => self.extract(analysis),
            None => ExtractedFields::default(),
        }
    }

    /// Best-scoring candidate for `cutout`, or `None` when there are no
    /// candidates.
    ///
    /// Candidates are visited in order and only a strictly higher score
    /// replaces the current best, so ties go to the earliest candidate.
    pub fn find_best_match<'p>(
        &self,
        cutout: &AnalysisRecord,
        products: &'p [AnalysisRecord],
    ) -> Option<MatchResult<'p>> {
        if products.is_empty() {
            debug!("no candidate products, nothing to match");
            return None;
        }

        let cutout_fields = self.extract(cutout);
        let mut best_score = -1.0;
        let mut best: Option<MatchResult<'p>> = None;

        for (index, product) in products.iter().enumerate() {
            let similarity = self.score(&self.candidate_fields(product), &cutout_fields);
            trace!(index, score = similarity.overall_similarity, "scored candidate");

            if similarity.overall_similarity > best_score {
                best_score = similarity.overall_similarity;
                best = Some(MatchResult {
                    score: best_score,
                    similarity,
                    product,
                });
            }
        }

        if let Some(result) = &best {
            debug!(
                candidates = products.len(),
                score = result.score,
                "selected best match"
            );
        }
        best
    }

    /// Same result as [`Matcher::find_best_match`], scoring candidates on the
    /// rayon thread pool.
    pub fn find_best_match_par<'p>(
        &self,
        cutout: &AnalysisRecord,
        products: &'p [AnalysisRecord],
    ) -> Option<MatchResult<'p>> {
        let cutout_fields = self.extract(cutout);

        let (index, similarity) = products
            .par_iter()
            .enumerate()
            .map(|(index, product)| (index, self.score(&self.candidate_fields(product), &cutout_fields)))
            .reduce_with(|left, right| {
                let (l, r) = (left.1.overall_similarity, right.1.overall_similarity);
                if r > l || (r == l && right.0 < left.0) {
                    right
                } else {
                    left
                }
            })?;

        debug!(
            candidates = products.len(),
            score = similarity.overall_similarity,
            "selected best match"
        );
        Some(MatchResult {
            score: similarity.overall_similarity,
            similarity,
            product: &products[index],
        })
    }

    /// Every candidate scored, best first. Equal scores keep input order.
    pub fn rank_candidates<'p>(
        &self,
        cutout: &AnalysisRecord,
        products: &'p [AnalysisRecord],
    ) -> Vec<RankedMatch<'p>> {
        let cutout_fields = self.extract(cutout);

        let mut ranked: Vec<RankedMatch<'p>> = products
            .iter()
            .enumerate()
            .map(|(index, product)| {
                let similarity = self.score(&self.candidate_fields(product), &cutout_fields);
                RankedMatch {
                    index,
                    score: similarity.overall_similarity,
                    similarity,
                    product,
                }
            })
            .collect();

        // stable sort keeps input order among equal scores
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    /// Summarize a selection using this matcher's high-match threshold.
    pub fn summarize(
        &self,
        result: Option<&MatchResult<'_>>,
        candidates_count: usize,
        min_high_matches: usize,
    ) -> MatchSummary {
        MatchSummary::compute(
            result,
            candidates_count,
            self.config.high_match_threshold,
            min_high_matches,
        )
    }
}

/// Best match using the default configuration
pub fn find_best_match<'p>(
    cutout: &AnalysisRecord,
    products: &'p [AnalysisRecord],
) -> Option<MatchResult<'p>> {
    Matcher::default().find_best_match(cutout, products)
}
