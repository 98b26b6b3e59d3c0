//! Patch generation from change records.
//!
//! One strategy per container kind:
//!
//! - sequences are diffed by trimming the common prefix and suffix, then
//!   emitting replaces for the changed window and adds/removes for the part
//!   that grew or shrank;
//! - records and mappings are diffed over their touched keys only;
//! - sets are diffed by membership.

use indexmap::IndexSet;
use structpatch_pointer::{format_json_pointer, Path, PathStep};
use tracing::{debug, trace};

use super::types::Patch;
use crate::change::{ChangeRecord, TouchState};
use crate::value::{ContainerKind, Value};

// ── Public API ────────────────────────────────────────────────────────────

/// Appends the forward and inverse patches for one changed node.
///
/// `base_path` is the absolute path of the node; emitted paths extend it by
/// one step. Both output vectors are only appended to (the set strategy
/// prepends its inverse patches), so a caller can accumulate a whole tree
/// walk into the same pair.
pub fn generate_patches(
    record: &ChangeRecord,
    base_path: &[PathStep],
    patches: &mut Vec<Patch>,
    inverse_patches: &mut Vec<Patch>,
) {
    let kind = record.kind();
    trace!(?kind, path = %format_json_pointer(base_path), "generating patches");

    let (forward_before, inverse_before) = (patches.len(), inverse_patches.len());
    match kind {
        ContainerKind::Sequence => {
            let base = record.base.as_array().unwrap_or(&[]);
            let copy = record.copy.as_array().unwrap_or(&[]);
            generate_array_patches(record, base, copy, base_path, patches, inverse_patches);
        }
        ContainerKind::Set => {
            let empty = IndexSet::new();
            let base = record.base.as_set().unwrap_or(&empty);
            let copy = record.copy.as_set().unwrap_or(&empty);
            generate_set_patches(base, copy, base_path, patches, inverse_patches);
        }
        ContainerKind::Associative => {
            generate_patches_from_assigned(record, base_path, patches, inverse_patches);
        }
    }

    debug!(
        ?kind,
        forward = patches.len() - forward_before,
        inverse = inverse_patches.len() - inverse_before,
        "generated patches"
    );
}

fn child_path(base_path: &[PathStep], step: PathStep) -> Path {
    let mut path = Vec::with_capacity(base_path.len() + 1);
    path.extend_from_slice(base_path);
    path.push(step);
    path
}

// ── Sequences ─────────────────────────────────────────────────────────────

fn generate_array_patches<'a>(
    record: &ChangeRecord,
    mut base: &'a [Value],
    mut copy: &'a [Value],
    base_path: &[PathStep],
    mut patches: &'a mut Vec<Patch>,
    mut inverse_patches: &'a mut Vec<Patch>,
) {
    // Keep `base` the shorter side. A shrink is then a growth seen backwards,
    // with the forward and inverse channels swapped.
    if copy.len() < base.len() {
        std::mem::swap(&mut base, &mut copy);
        std::mem::swap(&mut patches, &mut inverse_patches);
    }

    let delta = copy.len() - base.len();

    // First replaced index.
    let mut start = 0;
    while start < base.len() && base[start] == copy[start] {
        start += 1;
    }

    // End of the changed window: everything past it is a common suffix once
    // the length difference is accounted for.
    let mut end = base.len();
    while end > start && base[end - 1] == copy[end + delta - 1] {
        end -= 1;
    }

    for i in start..end {
        if record.touch_state(&PathStep::Index(i)) == TouchState::Added && copy[i] != base[i] {
            let path = child_path(base_path, PathStep::Index(i));
            patches.push(Patch::replace(path.clone(), copy[i].clone()));
            inverse_patches.push(Patch::replace(path, base[i].clone()));
        }
    }

    // Inserts replay front to back, removals back to front, so no pending
    // index is shifted by an earlier operation.
    for i in end..end + delta {
        patches.push(Patch::add(child_path(base_path, PathStep::Index(i)), copy[i].clone()));
    }
    for i in (end..end + delta).rev() {
        inverse_patches.push(Patch::remove(child_path(base_path, PathStep::Index(i))));
    }
}

// ── Records and mappings ──────────────────────────────────────────────────

fn generate_patches_from_assigned(
    record: &ChangeRecord,
    base_path: &[PathStep],
    patches: &mut Vec<Patch>,
    inverse_patches: &mut Vec<Patch>,
) {
    let (base, copy) = (&record.base, &record.copy);

    for (key, state) in record.touched() {
        let orig = base.get(key);
        let value = copy.get(key);
        let path = child_path(base_path, key.clone());

        match (state, orig) {
            // Created and deleted inside the same draft.
            (TouchState::Removed, None) => {}
            (TouchState::Removed, Some(orig)) => {
                patches.push(Patch::remove(path.clone()));
                inverse_patches.push(Patch::add(path, orig.clone()));
            }
            (_, Some(orig)) => {
                if value == Some(orig) {
                    continue;
                }
                let value = value.cloned().unwrap_or_default();
                patches.push(Patch::replace(path.clone(), value));
                inverse_patches.push(Patch::replace(path, orig.clone()));
            }
            (_, None) => {
                let value = value.cloned().unwrap_or_default();
                patches.push(Patch::add(path.clone(), value));
                inverse_patches.push(Patch::remove(path));
            }
        }
    }
}

// ── Sets ──────────────────────────────────────────────────────────────────

fn generate_set_patches(
    base: &IndexSet<Value>,
    copy: &IndexSet<Value>,
    base_path: &[PathStep],
    patches: &mut Vec<Patch>,
    inverse_patches: &mut Vec<Patch>,
) {
    // Positions are ordinals in iteration order; the applier ignores them and
    // works from the attached member.
    let mut undo = Vec::new();

    for (i, member) in base.iter().enumerate() {
        if !copy.contains(member) {
            let path = child_path(base_path, PathStep::Index(i));
            patches.push(Patch::remove_member(path.clone(), member.clone()));
            undo.push(Patch::add(path, member.clone()));
        }
    }
    for (i, member) in copy.iter().enumerate() {
        if !base.contains(member) {
            let path = child_path(base_path, PathStep::Index(i));
            patches.push(Patch::add(path.clone(), member.clone()));
            undo.push(Patch::remove_member(path, member.clone()));
        }
    }

    // Each undo patch goes in front of everything already collected.
    undo.reverse();
    undo.append(inverse_patches);
    *inverse_patches = undo;
}

// ── Tests ─────────────────────────────────────────────────────────────────
