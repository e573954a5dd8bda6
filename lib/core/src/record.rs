//! Analysis record access
//!
//! Upstream vision/LLM services emit loosely-shaped JSON. Everything here
//! reads such records without failing: missing keys, wrong nested types and
//! unparseable embedded JSON all degrade to "absent".

use serde::Serialize;
use serde_json::{Map, Value};
use std::io;
use tracing::{debug, trace};

/// A product or cutout analysis as produced upstream. No fixed schema.
pub type AnalysisRecord = Value;

/// Key that may hold a nested, possibly JSON-encoded, analysis payload
pub const ANALYSIS_KEY: &str = "analysis";

/// Record fields after resolving a possibly double-encoded `analysis` entry
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<'a> {
    /// `analysis` held a JSON-encoded object which replaces the outer record
    Decoded(Map<String, Value>),
    /// The record as given
    Original(&'a Map<String, Value>),
}

impl<'a> Payload<'a> {
    /// Resolve the working fields of `record`.
    ///
    /// Only a string-valued `analysis` entry is decoded, and only an object
    /// result is accepted. Anything else keeps the outer record.
    pub fn resolve(record: &'a Map<String, Value>) -> Self {
        let Some(Value::String(encoded)) = record.get(ANALYSIS_KEY) else {
            return Payload::Original(record);
        };

        match serde_json::from_str::<Value>(encoded) {
            Ok(Value::Object(decoded)) => Payload::Decoded(decoded),
            Ok(_) => {
                trace!("embedded analysis is not an object, keeping outer record");
                Payload::Original(record)
            }
            Err(err) => {
                debug!(error = %err, "embedded analysis is not valid JSON, keeping outer record");
                Payload::Original(record)
            }
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        match self {
            Payload::Decoded(fields) => fields,
            Payload::Original(fields) => fields,
        }
    }

    pub fn is_decoded(&self) -> bool {
        matches!(self, Payload::Decoded(_))
    }
}

/// Follow a key path through nested objects.
///
/// Returns `None` for an empty path, a missing key, or a non-object
/// intermediate value.
pub fn lookup<'v, S: AsRef<str>>(record: &'v Map<String, Value>, path: &[S]) -> Option<&'v Value> {
    let (first, rest) = path.split_first()?;
    let mut current = record.get(first.as_ref())?;
    for key in rest {
        current = current.as_object()?.get(key.as_ref())?;
    }
    Some(current)
}

/// Truthiness of a JSON value: null, false, zero, and empty
/// strings/arrays/objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Render a value as plain text. Strings are taken verbatim, structures
/// become compact JSON, falsy values become `""`.
pub fn scalar_text(value: &Value) -> String {
    if !is_truthy(value) {
        return String::new();
    }
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render a value as space-joined text. Truthy object values are joined;
/// array elements are joined as-is, so an empty element still takes its
/// place between separators.
pub fn joined_text(value: &Value) -> String {
    match value {
        Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join(" "),
        other => values_text(other),
    }
}

/// Like [`joined_text`] for objects only: any other value, arrays
/// included, is rendered whole by [`scalar_text`].
pub fn values_text(value: &Value) -> String {
    match value {
        Value::Object(fields) => fields
            .values()
            .map(scalar_text)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        other => scalar_text(other),
    }
}

/// JSON formatter with `", "` and `": "` separators
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(fields) => Value::Object(sorted_object(fields)),
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

fn sorted_object(fields: &Map<String, Value>) -> Map<String, Value> {
    let mut keys: Vec<&String> = fields.keys().collect();
    keys.sort();
    keys.into_iter()
        .map(|key| (key.clone(), sort_keys(&fields[key])))
        .collect()
}

fn to_spaced_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    if value.serialize(&mut serializer).is_err() {
        return String::new();
    }
    String::from_utf8(buf).unwrap_or_default()
}

/// Canonical serialization: keys sorted at every level, non-ASCII left
/// unescaped, `", "` / `": "` separators.
pub fn canonical_json(value: &Value) -> String {
    to_spaced_json(&sort_keys(value))
}

/// [`canonical_json`] for a bare object
pub fn canonical_object_json(fields: &Map<String, Value>) -> String {
    to_spaced_json(&Value::Object(sorted_object(fields)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(fields) => fields,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_payload_decodes_embedded_object() {
        let record = object(json!({"analysis": "{\"brand\": \"X\"}", "id": 7}));
        let payload = Payload::resolve(&record);

        assert!(payload.is_decoded());
        assert_eq!(payload.fields().get("brand"), Some(&json!("X")));
        assert!(payload.fields().get("id").is_none());
    }

    #[test]
    fn test_payload_keeps_original_on_bad_json() {
        let record = object(json!({"analysis": "not json"}));
        let payload = Payload::resolve(&record);

        assert!(!payload.is_decoded());
        assert_eq!(payload.fields(), &record);
    }

    #[test]
    fn test_payload_keeps_original_on_non_object() {
        let record = object(json!({"analysis": "[1, 2, 3]"}));
        assert!(!Payload::resolve(&record).is_decoded());

        let nested = object(json!({"analysis": {"brand": "Nike"}}));
        assert!(!Payload::resolve(&nested).is_decoded());
    }

    #[test]
    fn test_lookup_nested_paths() {
        let record = object(json!({
            "brand": "Nike",
            "analysis_result": {"brand": "Adidas"},
            "broken": "not an object"
        }));

        assert_eq!(lookup(&record, &["brand"]), Some(&json!("Nike")));
        assert_eq!(lookup(&record, &["analysis_result", "brand"]), Some(&json!("Adidas")));
        assert_eq!(lookup(&record, &["broken", "brand"]), None);
        assert_eq!(lookup(&record, &["missing", "brand"]), None);
        assert_eq!(lookup::<&str>(&record, &[]), None);
    }

    #[test]
    fn test_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(3), json!(-0.5), json!("a"), json!([0]), json!({"a": null})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&json!("Nike")), "Nike");
        assert_eq!(scalar_text(&json!(42)), "42");
        assert_eq!(scalar_text(&json!(true)), "true");
        assert_eq!(scalar_text(&json!(null)), "");
        assert_eq!(scalar_text(&json!(0)), "");
        assert_eq!(scalar_text(&json!(["a", "b"])), r#"["a","b"]"#);
    }

    #[test]
    fn test_joined_text() {
        assert_eq!(joined_text(&json!({"upper": "mesh", "sole": "rubber", "lining": ""})), "mesh rubber");
        assert_eq!(joined_text(&json!(["white", null, "black"])), "white  black");
        assert_eq!(joined_text(&json!(["red", "", "blue"])), "red  blue");
        assert_eq!(joined_text(&json!("leather")), "leather");
        assert_eq!(joined_text(&json!({})), "");
    }

    #[test]
    fn test_values_text() {
        assert_eq!(values_text(&json!({"upper": "mesh", "sole": "rubber", "lining": ""})), "mesh rubber");
        assert_eq!(values_text(&json!(["mesh", "rubber"])), r#"["mesh","rubber"]"#);
        assert_eq!(values_text(&json!("leather")), "leather");
        assert_eq!(values_text(&json!(null)), "");
    }

    #[test]
    fn test_canonical_json_sorted_and_spaced() {
        let value = json!({"b": 1, "a": [1, 2, {"z": "é", "y": null}]});
        assert_eq!(
            canonical_json(&value),
            r#"{"a": [1, 2, {"y": null, "z": "é"}], "b": 1}"#
        );
    }

    #[test]
    fn test_canonical_object_json() {
        let fields = object(json!({"product": "Air Max 90", "brand_name": "Nike"}));
        assert_eq!(
            canonical_object_json(&fields),
            r#"{"brand_name": "Nike", "product": "Air Max 90"}"#
        );
    }
}
