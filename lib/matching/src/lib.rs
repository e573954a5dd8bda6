//! # annotator-matching
//!
//! Fuzzy product-to-cutout matching.
//!
//! A cutout's analysis (brand, product name, colors, visible text, material,
//! raw JSON) is compared against each candidate product's analysis. Every
//! field yields a sequence-matcher ratio; a fixed-weight average of the six
//! ratios ranks the candidates and the best one wins.
//!
//! ## Example
//!
//! ```rust
//! use annotator_matching::{find_best_match, count_high_matches, DEFAULT_HIGH_MATCH_THRESHOLD};
//! use serde_json::json;
//!
//! let cutout = json!({"brand": "Nike", "product_name": "Air Max"});
//! let products = vec![
//!     json!({"id": "p1", "analysis": {"brand_name": "Nike", "product": "Air Max 90"}}),
//!     json!({"id": "p2", "analysis": {"brand": "Adidas", "product_name": "Superstar"}}),
//! ];
//!
//! let best = find_best_match(&cutout, &products).unwrap();
//! assert_eq!(best.product["id"], "p1");
//! // brand, product name and the whole-record JSON all clear 0.7
//! assert_eq!(count_high_matches(&best.similarity, DEFAULT_HIGH_MATCH_THRESHOLD), 3);
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Record    │────>│  Extractor  │────>│   Scorer    │
//! │ (any JSON)  │     │ (6 fields)  │     │ (weighted)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                         ┌──────┴──────┐
//!                                         │  Selector   │
//!                                         │ (best/rank) │
//!                                         └─────────────┘
//! ```

pub mod config;
pub mod explain;
pub mod fields;
pub mod score;
pub mod select;
pub mod sequence;
pub mod weights;

pub use config::MatchConfig;
pub use explain::{MatchSummary, DEFAULT_MIN_HIGH_MATCHES};
pub use fields::{extract_key_fields, ExtractedFields, FieldRules, FieldSource, Transform};
pub use score::{
    calculate_weighted_similarity, count_high_matches, SimilarityBreakdown,
    DEFAULT_HIGH_MATCH_THRESHOLD,
};
pub use select::{find_best_match, MatchResult, Matcher, RankedMatch};
pub use sequence::{get_similarity_ratio, SequenceMatcher};
pub use weights::{MatchWeights, WeightsError};
