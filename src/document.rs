//! Read-only accessors for the sections of an API description.
//!
//! Missing or non-object sections read as empty.

use serde_json::{Map, Value};

use crate::types::HTTP_METHODS;

/// Component categories of a document (`components.<category>.<name>`).
pub fn component_categories(
    document: &Value,
) -> impl Iterator<Item = (&str, &Map<String, Value>)> {
    object_entries(document.get("components"))
        .filter_map(|(category, entries)| Some((category, entries.as_object()?)))
}

/// Path items of a document, in document order.
pub fn path_items(document: &Value) -> impl Iterator<Item = (&str, &Value)> {
    object_entries(document.get("paths"))
}

/// Operations under a path item, keyed by lowercase HTTP method.
///
/// Path-level keys such as `parameters` or `servers` are skipped.
pub fn operations(path_item: &Value) -> impl Iterator<Item = (&str, &Value)> {
    object_entries(Some(path_item)).filter(|(key, _)| HTTP_METHODS.contains(key))
}

fn object_entries(value: Option<&Value>) -> impl Iterator<Item = (&str, &Value)> {
    value
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(|map| map.iter().map(|(key, value)| (key.as_str(), value)))
}
