//! OpenAPI Change Log
//!
//! Semantic diff of two versions of an API description, rendered as a change log.
//!
//! Besides operations that were added, removed, or edited directly, the diff
//! reports operations whose behavior changed indirectly because a shared
//! component they reference (`#/components/<category>/<name>`) was edited,
//! and pairs removed/added paths that look like renames.
//!
//! # Example
//!
//! ```
//! use openapi_changelog::{compute_change_set, render_markdown, RenderOptions};
//! use serde_json::json;
//!
//! let previous = json!({
//!     "components": { "schemas": { "Pet": { "type": "object" } } },
//!     "paths": {
//!         "/pets": {
//!             "get": {
//!                 "responses": { "200": { "$ref": "#/components/schemas/Pet" } }
//!             }
//!         }
//!     }
//! });
//! let mut current = previous.clone();
//! current["components"]["schemas"]["Pet"]["required"] = json!(["name"]);
//!
//! let changes = compute_change_set(&previous, &current);
//! assert!(changes.changed_components.contains("Pet"));
//! assert!(changes.component_impact["/pets"].methods.contains("get"));
//!
//! let log = render_markdown(&changes, &RenderOptions::new());
//! assert_eq!(
//!     log,
//!     "## Modified\n\n- `GET` `/pets`: component `Pet` changed (responses)\n"
//! );
//! ```
//!
//! # Change categories
//!
//! | Category | Meaning |
//! |----------|---------|
//! | `added` | path + method only in the current document |
//! | `removed` | path + method only in the previous document |
//! | `modified` | operation definition differs, with the tracked fields that changed |
//! | `componentImpact` | operation references a new or edited component |
//! | `renamed` | removed path paired with a similar added path |

mod changeset;
mod components;
mod document;
mod error;
mod impact;
mod loader;
mod operations;
mod refs;
mod rename;
mod render;
mod types;

pub use changeset::{compute_change_set, compute_change_set_with};
pub use components::diff_components;
pub use error::LoadError;
pub use impact::{find_impact, locate_usage};
pub use loader::{is_url, load_document, load_document_auto, load_document_str};
pub use operations::{changed_fields, diff_operations, OperationDiff};
pub use refs::{component_name, referenced_components};
pub use rename::{detect_renames, path_similarity, RenameOutcome, RENAME_THRESHOLD};
pub use render::{render_json, render_markdown, RenderOptions};
pub use types::{
    ChangeSet, ComponentImpact, DiffOptions, MethodSet, ModifiedOperation, Rename, Summary,
    UsageLocation, UsageMatching, HTTP_METHODS, TRACKED_FIELDS,
};

#[cfg(feature = "remote")]
pub use loader::load_document_url;
