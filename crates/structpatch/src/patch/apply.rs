//! Patch application.
//!
//! Patches are applied in order against a live root. Every payload is deep
//! cloned before it is stored, so a patch set can be replayed any number of
//! times without the documents it produced aliasing each other or the patch.

use std::sync::Arc;

use structpatch_pointer::PathStep;
use tracing::{debug, warn};

use super::types::{ApplyPatchOptions, Patch, PatchError, PatchOp};
use crate::clone::deep_clone;
use crate::value::Value;

// ── Main apply functions ──────────────────────────────────────────────────

/// Applies `patches` to `root` in place, in order.
///
/// Stops at the first failing patch. Patches before it stay applied; wrap the
/// call in your own transaction, or use [`apply_patch`], if that matters.
pub fn apply_patches(root: &mut Value, patches: &[Patch]) -> Result<(), PatchError> {
    debug!(count = patches.len(), "applying patches");
    for (index, patch) in patches.iter().enumerate() {
        if let Err(err) = apply_one(root, patch) {
            warn!(index, op = %patch.op, error = %err, "patch application aborted");
            return Err(err);
        }
    }
    Ok(())
}

/// Applies `patches` to an owned document and returns it.
///
/// On failure the partially patched document is dropped, so callers holding
/// other snapshots of `doc` never observe a half-applied state.
pub fn apply_patch(
    doc: Value,
    patches: &[Patch],
    options: &ApplyPatchOptions,
) -> Result<Value, PatchError> {
    let mut working = if options.mutate { doc } else { deep_clone(&doc) };
    apply_patches(&mut working, patches)?;
    Ok(working)
}

fn apply_one(root: &mut Value, patch: &Patch) -> Result<(), PatchError> {
    let Some((key, parent_path)) = patch.path.split_last() else {
        return Err(PatchError::IllegalState);
    };

    let mut base = root;
    for step in parent_path {
        let next = base
            .get_mut(step)
            .ok_or_else(|| PatchError::path_resolution(&patch.path))?;
        if !next.is_container() {
            return Err(PatchError::path_resolution(&patch.path));
        }
        base = next;
    }

    match patch.op {
        PatchOp::Replace => apply_replace(base, key, payload(patch)?, patch),
        PatchOp::Add => apply_add(base, key, payload(patch)?, patch),
        PatchOp::Remove => apply_remove(base, key, patch),
    }
}

/// Cloned payload of an `add` or `replace`.
fn payload(patch: &Patch) -> Result<Value, PatchError> {
    patch
        .value
        .as_ref()
        .map(deep_clone)
        .ok_or_else(|| PatchError::InvalidPatch(format!("{} requires 'value'", patch.op)))
}

fn array_index(key: &PathStep) -> Result<usize, PatchError> {
    key.as_index()
        .ok_or_else(|| PatchError::InvalidIndex { step: key.clone() })
}

// ── Individual operation applicators ─────────────────────────────────────

fn apply_replace(
    parent: &mut Value,
    key: &PathStep,
    value: Value,
    patch: &Patch,
) -> Result<(), PatchError> {
    match parent {
        Value::Map(entries) => {
            Arc::make_mut(entries).insert(key.clone(), value);
            Ok(())
        }
        Value::Set(_) => Err(PatchError::SetReplace),
        Value::Array(items) => {
            let index = array_index(key)?;
            let len = items.len();
            if index > len {
                return Err(PatchError::IndexOutOfBounds { index, len });
            }
            let items = Arc::make_mut(items);
            if index == len {
                items.push(value);
            } else {
                items[index] = value;
            }
            Ok(())
        }
        Value::Record(entries) => {
            Arc::make_mut(entries).insert(key.to_key().into_owned(), value);
            Ok(())
        }
        _ => Err(PatchError::path_resolution(&patch.path)),
    }
}

fn apply_add(
    parent: &mut Value,
    key: &PathStep,
    value: Value,
    patch: &Patch,
) -> Result<(), PatchError> {
    match parent {
        Value::Array(items) => {
            let index = array_index(key)?;
            let items = Arc::make_mut(items);
            // Out-of-range inserts append, like a splice.
            let index = index.min(items.len());
            items.insert(index, value);
            Ok(())
        }
        Value::Map(entries) => {
            Arc::make_mut(entries).insert(key.clone(), value);
            Ok(())
        }
        Value::Set(members) => {
            let members = Arc::make_mut(members);
            // Replaying the same add twice must not leave two entries behind.
            if let Some(original) = &patch.value {
                members.shift_remove(original);
            }
            members.insert(value);
            Ok(())
        }
        Value::Record(entries) => {
            Arc::make_mut(entries).insert(key.to_key().into_owned(), value);
            Ok(())
        }
        _ => Err(PatchError::path_resolution(&patch.path)),
    }
}

fn apply_remove(parent: &mut Value, key: &PathStep, patch: &Patch) -> Result<(), PatchError> {
    match parent {
        Value::Array(items) => {
            let index = array_index(key)?;
            if index < items.len() {
                Arc::make_mut(items).remove(index);
            }
            Ok(())
        }
        Value::Map(entries) => {
            if entries.contains_key(key) {
                Arc::make_mut(entries).shift_remove(key);
            }
            Ok(())
        }
        Value::Set(members) => {
            if let Some(member) = &patch.value {
                if members.contains(member) {
                    Arc::make_mut(members).shift_remove(member);
                }
            }
            Ok(())
        }
        Value::Record(entries) => {
            let key = key.to_key();
            if entries.contains_key(&*key) {
                Arc::make_mut(entries).shift_remove(&*key);
            }
            Ok(())
        }
        _ => Err(PatchError::path_resolution(&patch.path)),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
