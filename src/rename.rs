//! Rename detection - pairs removed and added paths that look like one path moved.
//!
//! The heuristic is deliberately simple and compatible with existing change
//! logs: two paths are paired when they expose exactly the same methods, differ
//! in length by at most one segment, and share enough positionally equal
//! segments. Unrelated paths can coincidentally match; the first qualifying
//! candidate wins.

use indexmap::IndexMap;
use tracing::debug;

use crate::types::{MethodSet, Rename};

/// Minimum segment similarity for a removed/added pair to count as a rename.
pub const RENAME_THRESHOLD: f64 = 0.7;

/// Result of rename detection: pairs found plus the leftover adds and removes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenameOutcome {
    pub renamed: IndexMap<String, Rename>,
    pub added: IndexMap<String, MethodSet>,
    pub removed: IndexMap<String, MethodSet>,
}

/// Pair removed paths with added paths that appear to be renames.
///
/// Removed paths are visited in order; for each, added paths are scanned in
/// order and the first candidate that qualifies is taken. A matched added path
/// is not offered to later removed paths. Matched paths are dropped from the
/// returned `added` and `removed` maps.
///
/// A path that keeps some methods while losing or gaining others exists in
/// both versions and is never part of a rename, on either side.
pub fn detect_renames(
    added: &IndexMap<String, MethodSet>,
    removed: &IndexMap<String, MethodSet>,
) -> RenameOutcome {
    let mut outcome = RenameOutcome {
        renamed: IndexMap::new(),
        added: added.clone(),
        removed: IndexMap::new(),
    };

    for (old_path, old_methods) in removed {
        let candidate = if added.contains_key(old_path) {
            None
        } else {
            outcome
                .added
                .iter()
                .find(|(new_path, new_methods)| {
                    !removed.contains_key(new_path.as_str())
                        && is_rename(old_path, old_methods, new_path, new_methods)
                })
                .map(|(new_path, _)| new_path.clone())
        };

        match candidate {
            Some(new_path) => {
                debug!(from = %old_path, to = %new_path, "detected rename");
                outcome.added.shift_remove(&new_path);
                outcome.renamed.insert(
                    old_path.clone(),
                    Rename {
                        new_path,
                        methods: old_methods.clone(),
                    },
                );
            }
            None => {
                outcome.removed.insert(old_path.clone(), old_methods.clone());
            }
        }
    }

    outcome
}

/// Fraction of positionally equal segments between two paths.
///
/// Segments at indices `0..min(len)` are compared; the count of equal ones is
/// divided by the longer path's segment count. Empty segments are ignored, so
/// `/a//b/` has segments `a` and `b`. Two paths without segments score 0.
pub fn path_similarity(a: &str, b: &str) -> f64 {
    let left = segments(a);
    let right = segments(b);
    let longest = left.len().max(right.len());
    if longest == 0 {
        return 0.0;
    }

    let equal = left.iter().zip(&right).filter(|(l, r)| l == r).count();
    equal as f64 / longest as f64
}

fn is_rename(
    old_path: &str,
    old_methods: &MethodSet,
    new_path: &str,
    new_methods: &MethodSet,
) -> bool {
    segments(old_path).len().abs_diff(segments(new_path).len()) <= 1
        && old_methods == new_methods
        && path_similarity(old_path, new_path) >= RENAME_THRESHOLD
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
