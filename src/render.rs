//! Change-log rendering as Markdown or JSON.
//!
//! # Markdown layout
//!
//! ```text
//! # API Changes
//!
//! ## Added
//!
//! - `POST` `/items`
//!
//! ## Modified
//!
//! - `GET` `/items`: changed description
//! - `GET` `/users`: component `User` changed (responses)
//!
//! ## Removed
//!
//! - `DELETE` `/items/{id}`
//!
//! ## Renamed
//!
//! - `GET` `/api/v1/store/order` → `/api/v1/store/orders`
//! ```
//!
//! Sections are omitted when empty, entries are sorted by path, and method
//! tags are sorted. A path with a direct modification shows only that; the
//! component detail for it is suppressed.

use std::collections::BTreeMap;

use crate::types::{ChangeSet, ComponentImpact, MethodSet, ModifiedOperation};

/// Options for Markdown rendering.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Top-level `#` heading. No heading is written when unset.
    pub title: Option<String>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Render a change set as a Markdown change log.
pub fn render_markdown(changes: &ChangeSet, options: &RenderOptions) -> String {
    let mut out = String::new();
    if let Some(title) = &options.title {
        out.push_str(&format!("# {}\n\n", title));
    }

    let mut sections = vec![
        ("Added", path_lines(&changes.added)),
        ("Modified", modified_lines(changes)),
        ("Removed", path_lines(&changes.removed)),
        ("Renamed", renamed_lines(changes)),
    ];
    sections.retain(|(_, lines)| !lines.is_empty());
    sections.sort_by(|a, b| a.0.cmp(b.0));

    if sections.is_empty() {
        out.push_str("No changes detected.\n");
        return out;
    }

    let body: Vec<String> = sections
        .into_iter()
        .map(|(heading, lines)| format!("## {}\n\n{}\n", heading, lines.join("\n")))
        .collect();
    out.push_str(&body.join("\n"));
    out
}

/// Render a change set as JSON.
///
/// # Errors
///
/// Returns the serializer error, which does not happen for well-formed change sets.
pub fn render_json(changes: &ChangeSet, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(changes)
    } else {
        serde_json::to_string(changes)
    }
}

// One line per path, for `added` and `removed`.
fn path_lines<'a>(
    entries: impl IntoIterator<Item = (&'a String, &'a MethodSet)>,
) -> Vec<String> {
    let sorted: BTreeMap<&String, &MethodSet> = entries.into_iter().collect();
    sorted
        .into_iter()
        .map(|(path, methods)| format!("- {} `{}`", method_tags(methods), path))
        .collect()
}

fn modified_lines(changes: &ChangeSet) -> Vec<String> {
    let mut by_path: BTreeMap<&str, Vec<String>> = BTreeMap::new();

    for (path, operations) in &changes.modified {
        by_path.insert(path, direct_lines(path, operations));
    }
    for (path, impact) in &changes.component_impact {
        by_path
            .entry(path)
            .or_insert_with(|| impact_lines(path, impact));
    }

    by_path.into_values().flatten().collect()
}

fn direct_lines(path: &str, operations: &[ModifiedOperation]) -> Vec<String> {
    let mut sorted: Vec<&ModifiedOperation> = operations.iter().collect();
    sorted.sort_by(|a, b| a.method.cmp(&b.method));
    sorted
        .into_iter()
        .map(|op| {
            if op.changed_fields.is_empty() {
                format!("- {} `{}`: changed", method_tag(&op.method), path)
            } else {
                format!(
                    "- {} `{}`: changed {}",
                    method_tag(&op.method),
                    path,
                    op.changed_fields.join(", ")
                )
            }
        })
        .collect()
}

fn impact_lines(path: &str, impact: &ComponentImpact) -> Vec<String> {
    let mut lines = Vec::new();
    for method in &impact.methods {
        match impact.usages.get(method) {
            Some(usages) => {
                for (component, locations) in usages {
                    let locations: Vec<String> =
                        locations.iter().map(|l| l.to_string()).collect();
                    lines.push(impact_line(method, path, component, &locations));
                }
            }
            None => {
                for component in &impact.components {
                    lines.push(impact_line(method, path, component, &[]));
                }
            }
        }
    }
    lines
}

fn impact_line(method: &str, path: &str, component: &str, locations: &[String]) -> String {
    let mut line = format!(
        "- {} `{}`: component `{}` changed",
        method_tag(method),
        path,
        component
    );
    if !locations.is_empty() {
        line.push_str(&format!(" ({})", locations.join(", ")));
    }
    line
}

fn renamed_lines(changes: &ChangeSet) -> Vec<String> {
    let sorted: BTreeMap<&String, _> = changes.renamed.iter().collect();
    sorted
        .into_iter()
        .map(|(old_path, rename)| {
            format!(
                "- {} `{}` → `{}`",
                method_tags(&rename.methods),
                old_path,
                rename.new_path
            )
        })
        .collect()
}

fn method_tags(methods: &MethodSet) -> String {
    let mut tags: Vec<String> = methods.iter().map(|m| method_tag(m)).collect();
    tags.sort();
    tags.join(" ")
}

fn method_tag(method: &str) -> String {
    format!("`{}`", method.to_uppercase())
}
