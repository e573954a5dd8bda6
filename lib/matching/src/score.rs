//! Weighted multi-field similarity between a product and a cutout

use crate::fields::ExtractedFields;
use crate::sequence::get_similarity_ratio;
use crate::weights::MatchWeights;
use serde::{Deserialize, Serialize};

/// Default threshold above which a per-field ratio counts as a high match
pub const DEFAULT_HIGH_MATCH_THRESHOLD: f64 = 0.7;

/// Per-field ratios of one (product, cutout) pair and their weighted average
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarityBreakdown {
    pub overall_similarity: f64,
    pub brand_similarity: f64,
    pub product_similarity: f64,
    pub color_similarity: f64,
    pub visible_text_similarity: f64,
    pub material_similarity: f64,
    pub json_similarity: f64,
}

impl SimilarityBreakdown {
    /// The six per-field ratios, excluding the overall score
    pub fn field_ratios(&self) -> [(&'static str, f64); 6] {
        [
            ("brand_similarity", self.brand_similarity),
            ("product_similarity", self.product_similarity),
            ("color_similarity", self.color_similarity),
            ("visible_text_similarity", self.visible_text_similarity),
            ("material_similarity", self.material_similarity),
            ("json_similarity", self.json_similarity),
        ]
    }

    /// Number of per-field ratios strictly above `threshold`
    pub fn count_high_matches(&self, threshold: f64) -> usize {
        self.field_ratios()
            .iter()
            .filter(|(_, ratio)| *ratio > threshold)
            .count()
    }

    /// Field with the highest ratio; the first listed wins ties. `None` when
    /// every ratio is zero.
    pub fn top_field(&self) -> Option<&'static str> {
        let mut best: Option<(&'static str, f64)> = None;
        for (name, ratio) in self.field_ratios() {
            if ratio > best.map_or(0.0, |(_, r)| r) {
                best = Some((name, ratio));
            }
        }
        best.map(|(name, _)| name)
    }
}

/// Lower-cased ratio, forced to 0.0 unless both sides carry data
fn guarded_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    get_similarity_ratio(&a.to_lowercase(), &b.to_lowercase())
}

impl MatchWeights {
    /// Score a product's fields against a cutout's fields.
    ///
    /// Brand and product are always compared (the ratio itself is 0.0 on an
    /// empty side). Color, visible text, material and JSON are compared only
    /// when both sides are non-empty. JSON keeps its case.
    pub fn score(&self, product: &ExtractedFields, cutout: &ExtractedFields) -> SimilarityBreakdown {
        let brand_similarity = get_similarity_ratio(
            &product.brand.to_lowercase(),
            &cutout.brand.to_lowercase(),
        );
        let product_similarity = get_similarity_ratio(
            &product.product_name.to_lowercase(),
            &cutout.product_name.to_lowercase(),
        );

        let color_similarity = guarded_ratio(&product.color_combined, &cutout.color_combined);
        let visible_text_similarity = guarded_ratio(&product.visible_text, &cutout.visible_text);
        let material_similarity = guarded_ratio(&product.material, &cutout.material);

        let json_similarity = if product.json_string.is_empty() || cutout.json_string.is_empty() {
            0.0
        } else {
            get_similarity_ratio(&product.json_string, &cutout.json_string)
        };

        let overall_similarity = brand_similarity * self.brand
            + product_similarity * self.product
            + color_similarity * self.color
            + visible_text_similarity * self.visible_text
            + material_similarity * self.material
            + json_similarity * self.json;

        SimilarityBreakdown {
            overall_similarity,
            brand_similarity,
            product_similarity,
            color_similarity,
            visible_text_similarity,
            material_similarity,
            json_similarity,
        }
    }
}

/// Score with the default weights
pub fn calculate_weighted_similarity(
    product: &ExtractedFields,
    cutout: &ExtractedFields,
) -> SimilarityBreakdown {
    MatchWeights::default().score(product, cutout)
}

/// Number of per-field ratios strictly above `threshold`
pub fn count_high_matches(breakdown: &SimilarityBreakdown, threshold: f64) -> usize {
    breakdown.count_high_matches(threshold)
}
