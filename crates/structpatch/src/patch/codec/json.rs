//! JSON codec for patches.
//!
//! Wire shape:
//!
//! ```text
//! { "op": "add" | "replace" | "remove",
//!   "path": [ <string|integer>, ... ],
//!   "value"?: <any> }
//! ```
//!
//! Decoding also accepts `path` as an RFC 6901 pointer string.

use serde_json::{json, Map, Value as JsonValue};
use structpatch_pointer::{parse_json_pointer, validate_json_pointer, validate_path, Path, PathStep};

use crate::patch::types::{Patch, PatchError, PatchOp};
use crate::value::Value;

// ── Path helpers ──────────────────────────────────────────────────────────

fn encode_path(path: &[PathStep]) -> JsonValue {
    JsonValue::Array(
        path.iter()
            .map(|step| match step {
                PathStep::Key(k) => JsonValue::String(k.clone()),
                PathStep::Index(i) => json!(i),
            })
            .collect(),
    )
}

fn decode_step(v: &JsonValue) -> Result<PathStep, PatchError> {
    match v {
        JsonValue::String(s) => Ok(PathStep::Key(s.clone())),
        JsonValue::Number(n) => n
            .as_u64()
            .and_then(|i| usize::try_from(i).ok())
            .map(PathStep::Index)
            .ok_or_else(|| PatchError::InvalidPatch(format!("invalid path index: {n}"))),
        _ => Err(PatchError::InvalidPatch(
            "path steps must be strings or integers".into(),
        )),
    }
}

fn decode_path(v: &JsonValue) -> Result<Path, PatchError> {
    let path = match v {
        JsonValue::Array(steps) => steps.iter().map(decode_step).collect::<Result<Path, _>>()?,
        JsonValue::String(pointer) => {
            validate_json_pointer(pointer).map_err(|e| PatchError::InvalidPatch(e.to_string()))?;
            parse_json_pointer(pointer)
        }
        _ => {
            return Err(PatchError::InvalidPatch(
                "path must be an array or a JSON pointer".into(),
            ))
        }
    };
    validate_path(&path).map_err(|e| PatchError::InvalidPatch(e.to_string()))?;
    Ok(path)
}

// ── Serialization ─────────────────────────────────────────────────────────

/// Serialize a `Patch` to a `serde_json::Value` in the wire format.
pub fn to_json(patch: &Patch) -> JsonValue {
    let mut m = Map::new();
    m.insert("op".into(), json!(patch.op.as_str()));
    m.insert("path".into(), encode_path(&patch.path));
    if let Some(value) = &patch.value {
        m.insert("value".into(), JsonValue::from(value));
    }
    JsonValue::Object(m)
}

/// Serialize a list of patches to a JSON array.
pub fn to_json_patch(patches: &[Patch]) -> JsonValue {
    JsonValue::Array(patches.iter().map(to_json).collect())
}

// ── Deserialization ───────────────────────────────────────────────────────

/// Deserialize a `serde_json::Value` into a `Patch`.
///
/// A missing `path` decodes as the root path, which the applier rejects.
pub fn from_json(v: &JsonValue) -> Result<Patch, PatchError> {
    let obj = v
        .as_object()
        .ok_or_else(|| PatchError::InvalidPatch("operation must be an object".into()))?;
    let op: PatchOp = obj
        .get("op")
        .and_then(|v| v.as_str())
        .ok_or_else(|| PatchError::InvalidPatch("missing 'op' field".into()))?
        .parse()?;

    let path = match obj.get("path") {
        Some(p) => decode_path(p)?,
        None => Vec::new(),
    };
    let value = obj.get("value").cloned().map(Value::from);

    match (op, value) {
        (PatchOp::Remove, value) => Ok(Patch {
            op,
            path,
            value,
        }),
        (_, Some(value)) => Ok(Patch {
            op,
            path,
            value: Some(value),
        }),
        (_, None) => Err(PatchError::InvalidPatch(format!("{op} requires 'value'"))),
    }
}

/// Deserialize a JSON array into a list of patches.
pub fn from_json_patch(v: &JsonValue) -> Result<Vec<Patch>, PatchError> {
    let arr = v
        .as_array()
        .ok_or_else(|| PatchError::InvalidPatch("patch must be an array".into()))?;
    arr.iter().map(from_json).collect()
}
