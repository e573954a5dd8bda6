//! # annotator-match
//!
//! Product-to-cutout matching for image-annotation pipelines.
//!
//! Services in the pipeline analyze product reference images and dataset
//! cutouts with vision/LLM models. This crate decides which product a cutout
//! shows, and turns detections into publishable annotation boxes.
//!
//! ## Quick Start
//!
//! ### As a Command
//!
//! ```bash
//! annotator-match --cutout cutout.json --products products.json
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use annotator_match::prelude::*;
//! use serde_json::json;
//!
//! let cutout = json!({"brand": "Nike", "product_name": "Air Max", "visible_text": "AIR"});
//! let products = vec![
//!     json!({"id": "p1", "analysis": {"brand_name": "Nike", "product": "Air Max 90"}}),
//!     json!({"id": "p2", "analysis": {"brand": "Adidas", "product_name": "Superstar"}}),
//! ];
//!
//! let matcher = Matcher::default();
//! let best = matcher.find_best_match(&cutout, &products).unwrap();
//! assert_eq!(best.product["id"], "p1");
//!
//! let summary = matcher.summarize(Some(&best), products.len(), DEFAULT_MIN_HIGH_MATCHES);
//! println!("score {:.3}, accepted: {}", summary.best_score, summary.accepted);
//! ```
//!
//! ## Crate Structure
//!
//! - `annotator-core` - record access, canonical JSON, annotation geometry, errors
//! - `annotator-matching` - field extraction, sequence-matcher ratio, weighted
//!   scoring and best-match selection

// Re-export core types
pub use annotator_core::{
    filter_overlapping, to_annotation_boxes, AnalysisRecord, Annotation, AnnotationBox,
    BoundingBox, Error, Payload, Result, DEFAULT_OVERLAP_THRESHOLD,
};

// Re-export matching
pub use annotator_matching::{
    calculate_weighted_similarity, count_high_matches, extract_key_fields, find_best_match,
    get_similarity_ratio, ExtractedFields, FieldRules, FieldSource, MatchConfig, MatchResult,
    MatchSummary, MatchWeights, Matcher, RankedMatch, SimilarityBreakdown,
    DEFAULT_HIGH_MATCH_THRESHOLD, DEFAULT_MIN_HIGH_MATCHES,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        count_high_matches, extract_key_fields, find_best_match, Annotation, BoundingBox, Error,
        ExtractedFields, MatchConfig, MatchResult, MatchWeights, Matcher, Result,
        SimilarityBreakdown, DEFAULT_HIGH_MATCH_THRESHOLD, DEFAULT_MIN_HIGH_MATCHES,
    };
}
