//! Impact propagation - finds operations that reference changed components.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::document::{operations, path_items};
use crate::refs::{component_name, referenced_components};
use crate::types::{ComponentImpact, UsageLocation, UsageMatching};

/// Find every operation in `current` that references a changed component.
///
/// Returns a map from path to the affected methods and the changed
/// components they reference, in document order. Each method also carries
/// the locations where each component is mentioned, as reported by
/// [`locate_usage`] under the given `matching` policy.
pub fn find_impact(
    current: &Value,
    changed: &BTreeSet<String>,
    matching: UsageMatching,
) -> IndexMap<String, ComponentImpact> {
    let mut impact: IndexMap<String, ComponentImpact> = IndexMap::new();
    if changed.is_empty() {
        return impact;
    }

    for (path, item) in path_items(current) {
        for (method, operation) in operations(item) {
            let hits: Vec<String> = referenced_components(operation)
                .into_iter()
                .filter(|name| changed.contains(name))
                .collect();
            if hits.is_empty() {
                continue;
            }

            debug!(path, method, components = ?hits, "operation impacted");
            let entry = impact.entry(path.to_string()).or_default();
            entry.methods.insert(method.to_string());
            for name in hits {
                let locations = locate_usage(operation, &name, matching);
                entry
                    .usages
                    .entry(method.to_string())
                    .or_default()
                    .insert(name.clone(), locations);
                entry.components.insert(name);
            }
        }
    }

    impact
}

/// Report which structural roles of an operation mention a component.
///
/// Locations are returned in the fixed order `parameters`, `requestBody`,
/// `responses`. With [`UsageMatching::Substring`] any `$ref` string containing
/// the component name counts, so `Pet` also matches `#/components/schemas/PetList`.
/// [`UsageMatching::Exact`] compares against the pointer's final segment.
pub fn locate_usage(
    operation: &Value,
    component: &str,
    matching: UsageMatching,
) -> Vec<UsageLocation> {
    UsageLocation::ALL
        .into_iter()
        .filter(|location| {
            operation
                .get(location.field())
                .is_some_and(|section| mentions(section, component, matching))
        })
        .collect()
}

fn mentions(value: &Value, component: &str, matching: UsageMatching) -> bool {
    match value {
        Value::Object(map) => map.iter().any(|(key, child)| match child {
            Value::String(pointer) if key == "$ref" => {
                pointer_matches(pointer, component, matching)
            }
            _ => mentions(child, component, matching),
        }),
        Value::Array(arr) => arr.iter().any(|item| mentions(item, component, matching)),
        _ => false,
    }
}

fn pointer_matches(pointer: &str, component: &str, matching: UsageMatching) -> bool {
    match matching {
        UsageMatching::Substring => pointer.contains(component),
        UsageMatching::Exact => component_name(pointer).is_some_and(|name| name == component),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn petstore() -> Value {
        json!({
            "paths": {
                "/pets": {
                    "get": {
                        "parameters": [{ "$ref": "#/components/parameters/limit" }],
                        "responses": {
                            "200": {
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/PetList" }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Pet" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Pet" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/owners": {
                    "get": {
                        "responses": { "200": { "description": "ok" } }
                    }
                }
            }
        })
    }

    #[test]
    fn nothing_changed_nothing_impacted() {
        let impact = find_impact(&petstore(), &BTreeSet::new(), UsageMatching::Substring);
        assert!(impact.is_empty());
    }

    #[test]
    fn records_methods_and_components() {
        let impact = find_impact(&petstore(), &names(&["Pet"]), UsageMatching::Substring);

        assert_eq!(impact.len(), 1);
        let pets = &impact["/pets"];
        assert_eq!(pets.methods, names(&["post"]));
        assert_eq!(pets.components, names(&["Pet"]));
        assert_eq!(
            pets.usages["post"]["Pet"],
            vec![UsageLocation::RequestBody, UsageLocation::Responses]
        );
    }

    #[test]
    fn method_listed_once_for_many_components() {
        let impact = find_impact(
            &petstore(),
            &names(&["limit", "PetList"]),
            UsageMatching::Substring,
        );

        let pets = &impact["/pets"];
        assert_eq!(pets.methods, names(&["get"]));
        assert_eq!(pets.components, names(&["PetList", "limit"]));
        assert_eq!(pets.usages["get"]["limit"], vec![UsageLocation::Parameters]);
        assert_eq!(pets.usages["get"]["PetList"], vec![UsageLocation::Responses]);
    }

    #[test]
    fn unrelated_component_has_no_impact() {
        let impact = find_impact(&petstore(), &names(&["Owner"]), UsageMatching::Substring);
        assert!(impact.is_empty());
    }

    #[test]
    fn locate_usage_substring_is_loose() {
        let operation = json!({
            "responses": {
                "200": { "content": { "application/json": {
                    "schema": { "$ref": "#/components/schemas/PetList" }
                } } }
            }
        });
        assert_eq!(
            locate_usage(&operation, "Pet", UsageMatching::Substring),
            vec![UsageLocation::Responses]
        );
        assert!(locate_usage(&operation, "Pet", UsageMatching::Exact).is_empty());
        assert_eq!(
            locate_usage(&operation, "PetList", UsageMatching::Exact),
            vec![UsageLocation::Responses]
        );
    }

    #[test]
    fn locate_usage_ignores_other_fields() {
        let operation = json!({
            "callbacks": { "$ref": "#/components/callbacks/Pet" },
            "description": "#/components/schemas/Pet"
        });
        assert!(locate_usage(&operation, "Pet", UsageMatching::Substring).is_empty());
    }

    #[test]
    fn ref_named_property_is_searched() {
        let operation = json!({
            "requestBody": {
                "content": { "application/json": { "schema": {
                    "properties": {
                        "$ref": { "$ref": "#/components/schemas/Pointer" }
                    }
                } } }
            }
        });
        assert_eq!(
            locate_usage(&operation, "Pointer", UsageMatching::Exact),
            vec![UsageLocation::RequestBody]
        );
    }

    #[test]
    fn impacted_without_location() {
        let current = json!({
            "paths": {
                "/hooks": {
                    "post": { "callbacks": { "onEvent": { "$ref": "#/components/callbacks/Event" } } }
                }
            }
        });
        let impact = find_impact(&current, &names(&["Event"]), UsageMatching::Substring);
        assert!(impact["/hooks"].usages["post"]["Event"].is_empty());
    }
}
