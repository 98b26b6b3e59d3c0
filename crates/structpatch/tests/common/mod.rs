#![allow(dead_code)]

pub mod fixtures;
pub mod tracker;

use structpatch::{apply_patches, deep_clone, Patch, Value};

/// Applies `patches` to a detached copy of `start`.
pub fn replay(start: &Value, patches: &[Patch]) -> Value {
    let mut doc = deep_clone(start);
    apply_patches(&mut doc, patches).expect("patches apply");
    doc
}
