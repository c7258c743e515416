//! Component diffing - detects new and edited reusable components.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::debug;

use crate::document::component_categories;

/// Names of components in `current` that are new or structurally different.
///
/// A component is changed if its category or name is missing from `previous`
/// or its definition is not deeply equal to the previous one. Object key order
/// does not affect equality. Components that exist only in `previous` are not
/// reported: a deleted component does not mark its former users as impacted.
pub fn diff_components(previous: &Value, current: &Value) -> BTreeSet<String> {
    let mut changed = BTreeSet::new();

    for (category, entries) in component_categories(current) {
        let previous_entries = previous
            .get("components")
            .and_then(|c| c.get(category))
            .and_then(Value::as_object);

        for (name, definition) in entries {
            let unchanged = previous_entries
                .and_then(|prev| prev.get(name))
                .is_some_and(|old| old == definition);

            if !unchanged {
                debug!(category, component = %name, "component changed");
                changed.insert(name.clone());
            }
        }
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identical_components_unchanged() {
        let doc = json!({
            "components": {
                "schemas": { "Pet": { "type": "object" } }
            }
        });
        assert!(diff_components(&doc, &doc).is_empty());
    }

    #[test]
    fn new_category_marks_all_members() {
        let previous = json!({ "components": { "schemas": {} } });
        let current = json!({
            "components": {
                "schemas": {},
                "parameters": { "limit": { "in": "query" }, "offset": { "in": "query" } }
            }
        });
        let changed = diff_components(&previous, &current);
        assert!(changed.contains("limit"));
        assert!(changed.contains("offset"));
        assert_eq!(changed.len(), 2);
    }

    #[test]
    fn new_and_edited_components() {
        let previous = json!({
            "components": {
                "schemas": {
                    "Pet": { "type": "object", "properties": { "name": { "type": "string" } } },
                    "Owner": { "type": "object" }
                }
            }
        });
        let current = json!({
            "components": {
                "schemas": {
                    "Pet": { "type": "object", "properties": { "name": { "type": "integer" } } },
                    "Owner": { "type": "object" },
                    "Tag": { "type": "string" }
                }
            }
        });
        let changed = diff_components(&previous, &current);
        let expected: BTreeSet<String> = ["Pet", "Tag"].into_iter().map(String::from).collect();
        assert_eq!(changed, expected);
    }

    #[test]
    fn key_order_is_not_a_change() {
        let previous: Value = serde_json::from_str(
            r#"{"components":{"schemas":{"Pet":{"type":"object","title":"Pet"}}}}"#,
        )
        .unwrap();
        let current: Value = serde_json::from_str(
            r#"{"components":{"schemas":{"Pet":{"title":"Pet","type":"object"}}}}"#,
        )
        .unwrap();
        assert!(diff_components(&previous, &current).is_empty());
    }

    #[test]
    fn removed_components_are_not_reported() {
        let previous = json!({
            "components": { "schemas": { "Pet": {}, "Legacy": {} } }
        });
        let current = json!({
            "components": { "schemas": { "Pet": {} } }
        });
        assert!(diff_components(&previous, &current).is_empty());
    }

    #[test]
    fn missing_components_section() {
        let previous = json!({});
        let current = json!({ "components": { "schemas": { "Pet": {} } } });
        assert_eq!(diff_components(&previous, &current).len(), 1);
        assert!(diff_components(&current, &previous).is_empty());
    }
}
