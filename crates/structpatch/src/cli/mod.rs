//! Command-line entry logic.
//!
//! Provides the core of the `structpatch` binary: apply a JSON patch set to
//! a JSON document.

use std::fmt;

use serde_json::Value as JsonValue;

use crate::patch::{apply_patch, from_json_patch, ApplyPatchOptions, PatchError};
use crate::value::Value;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum CliError {
    Json(serde_json::Error),
    Patch(PatchError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Json(e)  => write!(f, "{e}"),
            CliError::Patch(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self { CliError::Json(e) }
}

impl From<PatchError> for CliError {
    fn from(e: PatchError) -> Self { CliError::Patch(e) }
}

// ── structpatch ───────────────────────────────────────────────────────────

/// Apply a patch set to a document.
///
/// `doc_json`: the document as a JSON string.
/// `patch_json`: the patches as a JSON array string in the wire format.
///
/// Returns the patched document as a pretty-printed JSON string.
pub fn apply_json_patch(doc_json: &str, patch_json: &str) -> Result<String, CliError> {
    let doc: JsonValue = serde_json::from_str(doc_json)?;
    let raw: JsonValue = serde_json::from_str(patch_json)?;
    let patches = from_json_patch(&raw)?;
    let options = ApplyPatchOptions { mutate: true };
    let result = apply_patch(Value::from(doc), &patches, &options)?;
    Ok(serde_json::to_string_pretty(&JsonValue::from(&result))?)
}
