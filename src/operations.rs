//! Operation diffing - classifies operations as added, removed, or modified.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::document::{operations, path_items};
use crate::types::{MethodSet, ModifiedOperation, TRACKED_FIELDS};

/// Operations that differ between two documents, keyed by path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationDiff {
    pub added: IndexMap<String, MethodSet>,
    pub removed: IndexMap<String, MethodSet>,
    pub modified: IndexMap<String, Vec<ModifiedOperation>>,
}

/// Compare the `paths` sections of two documents operation by operation.
///
/// Operations are matched on path and method. An operation present in both
/// documents is modified when its definitions are not structurally equal;
/// its `changed_fields` lists the tracked fields that differ, including fields
/// present on only one side. Differences confined to untracked fields (such as
/// `tags`) still mark the operation modified, with no changed fields.
pub fn diff_operations(previous: &Value, current: &Value) -> OperationDiff {
    let mut diff = OperationDiff::default();

    for (path, item) in path_items(current) {
        let previous_item = previous.get("paths").and_then(|p| p.get(path));

        for (method, operation) in operations(item) {
            match previous_item.and_then(|p| p.get(method)) {
                None => {
                    diff.added
                        .entry(path.to_string())
                        .or_default()
                        .insert(method.to_string());
                }
                Some(old) if old != operation => {
                    let changed_fields = changed_fields(old, operation);
                    debug!(path, method, fields = ?changed_fields, "operation modified");
                    diff.modified
                        .entry(path.to_string())
                        .or_default()
                        .push(ModifiedOperation {
                            method: method.to_string(),
                            changed_fields,
                        });
                }
                Some(_) => {}
            }
        }
    }

    for (path, item) in path_items(previous) {
        let current_item = current.get("paths").and_then(|p| p.get(path));

        for (method, _) in operations(item) {
            if current_item.and_then(|c| c.get(method)).is_none() {
                diff.removed
                    .entry(path.to_string())
                    .or_default()
                    .insert(method.to_string());
            }
        }
    }

    debug!(
        added = diff.added.len(),
        removed = diff.removed.len(),
        modified = diff.modified.len(),
        "operation diff complete"
    );
    diff
}

/// Tracked fields whose values differ between two operation definitions.
pub fn changed_fields(old: &Value, new: &Value) -> Vec<String> {
    TRACKED_FIELDS
        .iter()
        .filter(|field| old.get(**field) != new.get(**field))
        .map(|field| field.to_string())
        .collect()
}
