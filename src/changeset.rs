//! Change-set assembly - the single entry point that diffs two documents.

use serde_json::Value;
use tracing::debug;

use crate::components::diff_components;
use crate::impact::find_impact;
use crate::operations::diff_operations;
use crate::rename::detect_renames;
use crate::types::{ChangeSet, DiffOptions};

/// Diff two API descriptions with default options.
///
/// Equivalent to [`compute_change_set_with`] using [`DiffOptions::default`]:
/// renames are detected and usage locations use substring matching.
///
/// # Example
///
/// ```
/// use openapi_changelog::compute_change_set;
/// use serde_json::json;
///
/// let previous = json!({ "paths": { "/items": { "get": {} } } });
/// let current = json!({ "paths": { "/items": { "get": {}, "post": {} } } });
///
/// let changes = compute_change_set(&previous, &current);
/// assert!(changes.added["/items"].contains("post"));
/// assert!(changes.modified.is_empty());
/// ```
pub fn compute_change_set(previous: &Value, current: &Value) -> ChangeSet {
    compute_change_set_with(previous, current, &DiffOptions::default())
}

/// Diff two API descriptions.
///
/// Pure and deterministic: the inputs are only read, and the same pair of
/// documents always yields the same change set.
pub fn compute_change_set_with(
    previous: &Value,
    current: &Value,
    options: &DiffOptions,
) -> ChangeSet {
    let changed_components = diff_components(previous, current);
    let component_impact = find_impact(current, &changed_components, options.usage_matching);
    let operations = diff_operations(previous, current);

    let (added, removed, renamed) = if options.detect_renames {
        let outcome = detect_renames(&operations.added, &operations.removed);
        (outcome.added, outcome.removed, outcome.renamed)
    } else {
        (operations.added, operations.removed, Default::default())
    };

    debug!(
        components = changed_components.len(),
        impacted_paths = component_impact.len(),
        renamed = renamed.len(),
        "change set assembled"
    );

    ChangeSet {
        added,
        removed,
        modified: operations.modified,
        changed_components,
        component_impact,
        renamed,
    }
}
