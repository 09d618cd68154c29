//! Field sources probed during back-fill.
//!
//! A [`FieldSource`] is anything that can answer "do you have a field with
//! this name" and "what is its value". Manifest attribute maps, the generated
//! default objects and plain JSON objects all implement it, and tests can use
//! a `serde_json::json!` literal directly.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Read-only named-field access.
pub trait FieldSource {
    /// Whether a field with this name exists, whatever its type.
    fn has_field(&self, name: &str) -> bool;

    /// The value of a field, or `None` when it does not exist.
    fn get_field(&self, name: &str) -> Option<Value>;
}

impl FieldSource for Map<String, Value> {
    fn has_field(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

/// Only JSON objects have fields.
impl FieldSource for Value {
    fn has_field(&self, name: &str) -> bool {
        self.as_object().is_some_and(|map| map.contains_key(name))
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        self.as_object().and_then(|map| map.get(name)).cloned()
    }
}

impl<S: std::hash::BuildHasher> FieldSource for HashMap<String, Value, S> {
    fn has_field(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl FieldSource for IndexMap<String, Value> {
    fn has_field(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl<T: FieldSource + ?Sized> FieldSource for &T {
    fn has_field(&self, name: &str) -> bool {
        (**self).has_field(name)
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        (**self).get_field(name)
    }
}

/// Non-empty string value of a field.
pub fn text_field<S: FieldSource + ?Sized>(source: &S, name: &str) -> Option<String> {
    match source.get_field(name) {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// Render a JSON value the way it reads in documentation text.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_object_source() {
        let source = json!({"label": "Buffer", "count": 3});
        assert!(source.has_field("label"));
        assert!(source.has_field("count"));
        assert!(!source.has_field("missing"));
        assert_eq!(source.get_field("count"), Some(json!(3)));
    }

    #[test]
    fn test_non_object_value_has_no_fields() {
        let source = json!(["label"]);
        assert!(!source.has_field("label"));
        assert!(source.get_field("label").is_none());
    }

    #[test]
    fn test_hash_map_source() {
        let mut source = HashMap::new();
        source.insert("alias".to_string(), json!("tb"));
        assert!(source.has_field("alias"));
        assert_eq!(text_field(&source, "alias").as_deref(), Some("tb"));
    }

    #[test]
    fn test_text_field_skips_empty_and_non_string() {
        let source = json!({"a": "", "b": 1, "c": "x"});
        assert_eq!(text_field(&source, "a"), None);
        assert_eq!(text_field(&source, "b"), None);
        assert_eq!(text_field(&source, "c").as_deref(), Some("x"));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("x")), "x");
        assert_eq!(display_value(&json!(12.5)), "12.5");
        assert_eq!(display_value(&json!(["a", 1])), "a, 1");
        assert_eq!(display_value(&Value::Null), "");
    }
}
