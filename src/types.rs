//! Core types for API description diffing.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys under a path item that denote operations.
pub const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Operation fields compared for `changed_fields`, in reporting order.
pub const TRACKED_FIELDS: &[&str] = &[
    "summary",
    "description",
    "operationId",
    "parameters",
    "requestBody",
    "responses",
];

/// Prefix of internal pointers that target a reusable component.
pub const COMPONENT_REF_PREFIX: &str = "#/components/";

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Lowercase HTTP methods, ordered lexicographically.
pub type MethodSet = BTreeSet<String>;

/// Structural role of an operation in which a component can be referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UsageLocation {
    Parameters,
    RequestBody,
    Responses,
}

impl UsageLocation {
    /// All locations in reporting order.
    pub const ALL: [UsageLocation; 3] = [
        UsageLocation::Parameters,
        UsageLocation::RequestBody,
        UsageLocation::Responses,
    ];

    /// Returns the operation field holding this location.
    pub fn field(&self) -> &'static str {
        match self {
            UsageLocation::Parameters => "parameters",
            UsageLocation::RequestBody => "requestBody",
            UsageLocation::Responses => "responses",
        }
    }
}

impl std::fmt::Display for UsageLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field())
    }
}

/// How `locate_usage` decides that a pointer mentions a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageMatching {
    /// Component name appears anywhere in the pointer string.
    #[default]
    Substring,
    /// Component name equals the pointer's final segment.
    Exact,
}

/// Options for change-set computation.
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Pair removed and added paths that look like renames.
    pub detect_renames: bool,
    /// Matching policy used when locating component usages.
    pub usage_matching: UsageMatching,
}

impl DiffOptions {
    /// Create options with rename detection on and substring usage matching.
    pub fn new() -> Self {
        Self {
            detect_renames: true,
            usage_matching: UsageMatching::Substring,
        }
    }

    /// Enable or disable rename detection.
    pub fn detect_renames(mut self, detect: bool) -> Self {
        self.detect_renames = detect;
        self
    }

    /// Set the usage matching policy.
    pub fn usage_matching(mut self, matching: UsageMatching) -> Self {
        self.usage_matching = matching;
        self
    }
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// A method whose operation definition changed directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedOperation {
    pub method: String,
    /// Tracked fields that differ, in `TRACKED_FIELDS` order.
    pub changed_fields: Vec<String>,
}

/// Operations under one path affected by changed components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentImpact {
    pub methods: MethodSet,
    pub components: BTreeSet<String>,
    /// method -> component -> locations where the component is mentioned.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub usages: BTreeMap<String, BTreeMap<String, Vec<UsageLocation>>>,
}

/// A removed path paired with the added path that replaced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rename {
    pub new_path: String,
    pub methods: MethodSet,
}

/// The structured result of diffing two documents.
///
/// Maps keep the order in which paths appear in the source documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    pub added: IndexMap<String, MethodSet>,
    pub removed: IndexMap<String, MethodSet>,
    pub modified: IndexMap<String, Vec<ModifiedOperation>>,
    pub changed_components: BTreeSet<String>,
    pub component_impact: IndexMap<String, ComponentImpact>,
    #[serde(default)]
    pub renamed: IndexMap<String, Rename>,
}

impl ChangeSet {
    /// Returns true if no operation or component changed.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.modified.is_empty()
            && self.changed_components.is_empty()
            && self.component_impact.is_empty()
            && self.renamed.is_empty()
    }

    /// Count operations per change category.
    pub fn summary(&self) -> Summary {
        let count =
            |map: &IndexMap<String, MethodSet>| -> usize { map.values().map(|m| m.len()).sum() };
        Summary {
            added: count(&self.added),
            removed: count(&self.removed),
            modified: self.modified.values().map(Vec::len).sum(),
            impacted: self
                .component_impact
                .iter()
                .filter(|(path, _)| !self.modified.contains_key(*path))
                .map(|(_, impact)| impact.methods.len())
                .sum(),
            renamed: self.renamed.values().map(|r| r.methods.len()).sum(),
            changed_components: self.changed_components.len(),
        }
    }
}

/// Operation counts per change category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    /// Impacted operations on paths without a direct modification.
    pub impacted: usize,
    pub renamed: usize,
    pub changed_components: usize,
}
