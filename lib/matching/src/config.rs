//! Matcher configuration
//!
//! Every field is optional in the JSON form; omitted fields take the
//! built-in defaults, so `{}` is the standard configuration.

use crate::fields::FieldRules;
use crate::score::DEFAULT_HIGH_MATCH_THRESHOLD;
use crate::weights::MatchWeights;
use annotator_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub weights: MatchWeights,
    pub rules: FieldRules,
    /// A per-field ratio strictly above this counts as a high match
    pub high_match_threshold: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            weights: MatchWeights::default(),
            rules: FieldRules::default(),
            high_match_threshold: DEFAULT_HIGH_MATCH_THRESHOLD,
        }
    }
}

impl MatchConfig {
    /// Check the threshold range and normalize the weights.
    pub fn validate(&mut self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.high_match_threshold) {
            return Err(Error::InvalidConfig(format!(
                "high_match_threshold must lie in [0, 1], got {}",
                self.high_match_threshold
            )));
        }
        self.weights
            .validate_and_normalize()
            .map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Load and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let mut config: MatchConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        debug!(path = %path.display(), weights = ?config.weights, "loaded match configuration");
        Ok(config)
    }
}
