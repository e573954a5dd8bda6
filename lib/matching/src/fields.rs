//! Field extraction
//!
//! Turns a schema-less analysis record into the six text fields the scorer
//! compares. Upstream producers disagree on field names, so each target
//! field is resolved from an ordered list of [`FieldSource`]s; the first
//! source yielding non-empty text wins. New name variants are added to
//! [`FieldRules`] without touching the scorer.

use annotator_core::record::{
    canonical_object_json, is_truthy, joined_text, lookup, scalar_text, values_text, AnalysisRecord,
    Payload,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How a resolved value is rendered as text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    /// Strings verbatim, numbers/booleans printed, structures as compact JSON
    #[default]
    Scalar,
    /// Object values or array elements joined with spaces
    Join,
    /// Object values joined with spaces; anything else as [`Transform::Scalar`]
    Values,
}

/// One place a field value may be found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSource {
    /// Key path from the record root
    pub path: Vec<String>,
    #[serde(default)]
    pub transform: Transform,
}

impl FieldSource {
    pub fn key(key: &str) -> Self {
        Self::nested(&[key])
    }

    pub fn nested(path: &[&str]) -> Self {
        Self {
            path: path.iter().map(|key| key.to_string()).collect(),
            transform: Transform::Scalar,
        }
    }

    pub fn joined(mut self) -> Self {
        self.transform = Transform::Join;
        self
    }

    pub fn values(mut self) -> Self {
        self.transform = Transform::Values;
        self
    }

    fn resolve(&self, record: &Map<String, Value>) -> String {
        match lookup(record, &self.path) {
            Some(value) if is_truthy(value) => match self.transform {
                Transform::Scalar => scalar_text(value),
                Transform::Join => joined_text(value),
                Transform::Values => values_text(value),
            },
            _ => String::new(),
        }
    }
}

/// Text of the first source that yields any
fn first_match(sources: &[FieldSource], record: &Map<String, Value>) -> String {
    sources
        .iter()
        .map(|source| source.resolve(record))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

/// The six comparable fields of one analysis record. Never absent: missing
/// data is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub brand: String,
    pub product_name: String,
    pub color_combined: String,
    pub visible_text: String,
    pub material: String,
    /// Canonical sorted-key JSON of the whole record
    pub json_string: String,
}

impl ExtractedFields {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Ordered extraction rules per target field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldRules {
    pub brand: Vec<FieldSource>,
    pub product_name: Vec<FieldSource>,
    pub color_primary: Vec<FieldSource>,
    pub color_secondary: Vec<FieldSource>,
    pub visible_text: Vec<FieldSource>,
    pub material: Vec<FieldSource>,
}

impl Default for FieldRules {
    fn default() -> Self {
        Self {
            brand: vec![
                FieldSource::key("brand_name"),
                FieldSource::key("brand"),
                FieldSource::nested(&["analysis_result", "brand"]),
            ],
            product_name: vec![
                FieldSource::key("product_name"),
                FieldSource::key("product"),
                FieldSource::nested(&["analysis_result", "product_name"]),
            ],
            color_primary: vec![
                FieldSource::key("color_primary"),
                FieldSource::nested(&["colors_primary_secondary", "primary"]),
            ],
            color_secondary: vec![FieldSource::key("colors_secondary").joined()],
            visible_text: vec![FieldSource::key("visible_text")],
            material: vec![FieldSource::key("material").values()],
        }
    }
}

impl FieldRules {
    /// Extract the comparable fields of `record`.
    ///
    /// Total over any input: a non-object record yields all-empty fields, and
    /// a string `analysis` entry holding a JSON object is unwrapped first.
    pub fn extract(&self, record: &AnalysisRecord) -> ExtractedFields {
        let Value::Object(outer) = record else {
            return ExtractedFields::default();
        };

        let payload = Payload::resolve(outer);
        let fields = payload.fields();

        let primary = first_match(&self.color_primary, fields);
        let secondary = first_match(&self.color_secondary, fields);
        let color_combined = format!("{primary} {secondary}").trim().to_string();

        // an empty record carries no whole-record signal
        let json_string = if fields.is_empty() {
            String::new()
        } else {
            canonical_object_json(fields)
        };

        ExtractedFields {
            brand: first_match(&self.brand, fields),
            product_name: first_match(&self.product_name, fields),
            color_combined,
            visible_text: first_match(&self.visible_text, fields),
            material: first_match(&self.material, fields),
            json_string,
        }
    }

    /// Append a lower-priority source for the brand field
    pub fn with_brand_source(mut self, source: FieldSource) -> Self {
        self.brand.push(source);
        self
    }

    /// Append a lower-priority source for the product-name field
    pub fn with_product_source(mut self, source: FieldSource) -> Self {
        self.product_name.push(source);
        self
    }
}

/// Extract fields with the default rules
pub fn extract_key_fields(record: &AnalysisRecord) -> ExtractedFields {
    FieldRules::default().extract(record)
}
