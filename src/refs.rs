//! Reference scanning - collects component names reachable through `$ref` pointers.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::types::COMPONENT_REF_PREFIX;

/// Collect the names of all components referenced anywhere under `node`.
///
/// Only internal pointers of the form `#/components/<category>/<name>` count;
/// external files and other fragments are ignored. Pointers are not checked
/// against the document, so dangling references are reported like any other.
pub fn referenced_components(node: &Value) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    collect_refs(node, &mut names);
    names
}

/// Extract the target component name from a pointer string.
///
/// Returns `None` unless the pointer starts with `#/components/`.
/// JSON Pointer escapes in the final segment are decoded.
pub fn component_name(pointer: &str) -> Option<String> {
    let rest = pointer.strip_prefix(COMPONENT_REF_PREFIX)?;
    let name = rest.rsplit('/').next().filter(|s| !s.is_empty())?;
    // Unescape JSON Pointer encoding (~1 = /, ~0 = ~)
    Some(name.replace("~1", "/").replace("~0", "~"))
}

fn collect_refs(value: &Value, names: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                match child {
                    Value::String(pointer) if key == "$ref" => {
                        if let Some(name) = component_name(pointer) {
                            names.insert(name);
                        }
                    }
                    _ => collect_refs(child, names),
                }
            }
        }
        Value::Array(arr) => {
            for item in arr {
                collect_refs(item, names);
            }
        }
        _ => {}
    }
}
