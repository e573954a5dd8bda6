//! Field weights
//!
//! Brand and product identity dominate the overall score; color, visible
//! text, material and the whole-record JSON signal refine it. The defaults
//! sum to exactly 1.0 and must stay as they are for scores to remain
//! comparable with previously stored matches.

use serde::{Deserialize, Serialize};

pub const BRAND_WEIGHT: f64 = 0.25;
pub const PRODUCT_WEIGHT: f64 = 0.25;
pub const COLOR_WEIGHT: f64 = 0.15;
pub const VISIBLE_TEXT_WEIGHT: f64 = 0.15;
pub const MATERIAL_WEIGHT: f64 = 0.10;
pub const JSON_WEIGHT: f64 = 0.10;

/// Weight of each per-field ratio in the overall similarity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchWeights {
    pub brand: f64,
    pub product: f64,
    pub color: f64,
    pub visible_text: f64,
    pub material: f64,
    pub json: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            brand: BRAND_WEIGHT,
            product: PRODUCT_WEIGHT,
            color: COLOR_WEIGHT,
            visible_text: VISIBLE_TEXT_WEIGHT,
            material: MATERIAL_WEIGHT,
            json: JSON_WEIGHT,
        }
    }
}

impl MatchWeights {
    fn named(&self) -> [(&'static str, f64); 6] {
        [
            ("brand", self.brand),
            ("product", self.product),
            ("color", self.color),
            ("visible_text", self.visible_text),
            ("material", self.material),
            ("json", self.json),
        ]
    }

    pub fn total(&self) -> f64 {
        self.named().iter().map(|(_, weight)| weight).sum()
    }

    /// Validate the weights
    /// - every weight finite and non-negative
    /// - rescaled to sum to 1.0 if they don't already
    pub fn validate_and_normalize(&mut self) -> Result<(), WeightsError> {
        for (name, weight) in self.named() {
            if !weight.is_finite() {
                return Err(WeightsError::NotFinite(name));
            }
            if weight < 0.0 {
                return Err(WeightsError::Negative(name));
            }
        }

        let total = self.total();
        if total <= 0.0 {
            return Err(WeightsError::ZeroTotal);
        }

        if (total - 1.0).abs() > 1e-9 {
            self.brand /= total;
            self.product /= total;
            self.color /= total;
            self.visible_text /= total;
            self.material /= total;
            self.json /= total;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightsError {
    #[error("Weight '{0}' must be finite")]
    NotFinite(&'static str),

    #[error("Weight '{0}' is negative")]
    Negative(&'static str),

    #[error("Total weight cannot be zero")]
    ZeroTotal,
}
