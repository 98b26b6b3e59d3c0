//! Core types for the patch module.

use std::fmt;
use std::str::FromStr;

use structpatch_pointer::{format_json_pointer, Path, PathStep};
use thiserror::Error;

use crate::value::Value;

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatchError {
    /// The patch path is empty.
    #[error("Illegal state: patch path is empty")]
    IllegalState,
    /// An intermediate path step is missing or is not a container.
    #[error("Cannot apply patch, path doesn't resolve: {path}")]
    PathResolution { path: String },
    #[error("Unsupported patch operation: {0}")]
    UnsupportedOperation(String),
    #[error("Sets cannot have \"replace\" patches.")]
    SetReplace,
    /// A sequence was addressed with a step that is not an index.
    #[error("INVALID_INDEX: {step}")]
    InvalidIndex { step: PathStep },
    #[error("index {index} out of bounds (len: {len})")]
    IndexOutOfBounds { index: usize, len: usize },
    /// Structurally malformed patch data.
    #[error("INVALID_PATCH: {0}")]
    InvalidPatch(String),
}

impl PatchError {
    pub(crate) fn path_resolution(path: &[PathStep]) -> Self {
        PatchError::PathResolution {
            path: format_json_pointer(path),
        }
    }
}

// ── Op ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatchOp {
    Add,
    Replace,
    Remove,
}

impl PatchOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatchOp::Add => "add",
            PatchOp::Replace => "replace",
            PatchOp::Remove => "remove",
        }
    }
}

impl FromStr for PatchOp {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(PatchOp::Add),
            "replace" => Ok(PatchOp::Replace),
            "remove" => Ok(PatchOp::Remove),
            other => Err(PatchError::UnsupportedOperation(other.to_string())),
        }
    }
}

impl fmt::Display for PatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Patch ─────────────────────────────────────────────────────────────────

/// One edit operation at an absolute path.
///
/// `add` and `replace` carry a value. `remove` does not, except when it
/// targets a set: set members have no stable key, so the removed member
/// travels in `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub op: PatchOp,
    pub path: Path,
    pub value: Option<Value>,
}

impl Patch {
    pub fn add(path: Path, value: Value) -> Self {
        Self {
            op: PatchOp::Add,
            path,
            value: Some(value),
        }
    }

    pub fn replace(path: Path, value: Value) -> Self {
        Self {
            op: PatchOp::Replace,
            path,
            value: Some(value),
        }
    }

    pub fn remove(path: Path) -> Self {
        Self {
            op: PatchOp::Remove,
            path,
            value: None,
        }
    }

    /// A set removal, which names the member it removes.
    pub fn remove_member(path: Path, member: Value) -> Self {
        Self {
            op: PatchOp::Remove,
            path,
            value: Some(member),
        }
    }

    pub fn op_name(&self) -> &'static str {
        self.op.as_str()
    }
}

// ── Options ───────────────────────────────────────────────────────────────

/// Options for [`apply_patch`](super::apply::apply_patch).
#[derive(Debug, Clone, Default)]
pub struct ApplyPatchOptions {
    /// If true, apply to the passed document copy-on-write.
    /// If false, detach the document with a deep clone before applying, so
    /// the result shares no storage with anything the input was shared with.
    pub mutate: bool,
}
