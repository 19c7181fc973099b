//! Per-item field bag with typed accessors

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Flat per-item parameter bag
///
/// Wraps the JSON object a host supplies for one input item and exposes
/// typed accessors by field name. Required-field lookups fail with a
/// [`Error::Validation`] naming the missing field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params {
    fields: Map<String, Value>,
}

impl Params {
    /// Create an empty bag
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON object value
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(Error::Validation(
                "item parameters must be a JSON object".to_string(),
            )),
        }
    }

    /// Add a field, builder-style
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Whether a field is present
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Required string field
    pub fn string(&self, name: &str) -> Result<String> {
        match self.fields.get(name) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(Error::Validation(format!(
                "field `{name}` must be a string"
            ))),
            None => Err(Error::Validation(format!(
                "missing required field `{name}`"
            ))),
        }
    }

    /// Optional string field with a default
    #[must_use]
    pub fn string_or(&self, name: &str, default: &str) -> String {
        match self.fields.get(name) {
            Some(Value::String(s)) => s.clone(),
            _ => default.to_string(),
        }
    }

    /// Optional boolean field with a default
    #[must_use]
    pub fn bool_or(&self, name: &str, default: bool) -> bool {
        match self.fields.get(name) {
            Some(Value::Bool(b)) => *b,
            _ => default,
        }
    }

    /// Required numeric field
    ///
    /// Returns the raw JSON number so integers and floats round-trip to the
    /// wire exactly as supplied.
    pub fn number(&self, name: &str) -> Result<Number> {
        match self.fields.get(name) {
            Some(Value::Number(n)) => Ok(n.clone()),
            Some(_) => Err(Error::Validation(format!(
                "field `{name}` must be a number"
            ))),
            None => Err(Error::Validation(format!(
                "missing required field `{name}`"
            ))),
        }
    }

    /// Collection field decoded into typed entries; a missing field yields
    /// an empty list
    pub fn list<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        match self.fields.get(name) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| Error::Validation(format!("invalid `{name}` entries: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_string() {
        let params = Params::new().with("to", "56912345678");
        assert_eq!(params.string("to").unwrap(), "56912345678");

        let err = params.string("message").unwrap_err();
        assert!(err.to_string().contains("missing required field `message`"));
    }

    #[test]
    fn test_string_type_mismatch() {
        let params = Params::new().with("to", 42);
        assert!(params.string("to").is_err());
    }

    #[test]
    fn test_optional_accessors() {
        let params = Params::new().with("preview_url", true);
        assert!(params.bool_or("preview_url", false));
        assert!(!params.bool_or("absent", false));
        assert_eq!(params.string_or("header_text", ""), "");
    }

    #[test]
    fn test_number_passes_through_integers() {
        let params = Params::new().with("latitude", -33).with("longitude", 70.6);
        assert_eq!(json!(params.number("latitude").unwrap()), json!(-33));
        assert_eq!(json!(params.number("longitude").unwrap()), json!(70.6));
    }

    #[test]
    fn test_list_missing_is_empty() {
        let params = Params::new();
        let entries: Vec<Value> = params.list("buttons").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_list_decodes_entries() {
        #[derive(serde::Deserialize)]
        struct Entry {
            id: String,
        }

        let params = Params::new().with("buttons", json!([{"id": "a"}, {"id": "b"}]));
        let entries: Vec<Entry> = params.list("buttons").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "a");
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(Params::from_value(json!([1, 2])).is_err());
        assert!(Params::from_value(json!({"a": 1})).is_ok());
    }
}
