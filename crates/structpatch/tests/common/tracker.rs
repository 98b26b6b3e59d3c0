//! Stand-in for a draft tracker.
//!
//! Derives, from two snapshots, the change records a proxy-based tracker
//! would have kept, and walks them through the generator: changed keys whose
//! old and new values are containers of the same shape are descended into,
//! every other change is recorded on the parent.

use std::mem::discriminant;

use structpatch::{generate_patches, ChangeRecord, Patch, Path, PathStep, Value};

pub fn diff(base: &Value, copy: &Value) -> (Vec<Patch>, Vec<Patch>) {
    let mut patches = Vec::new();
    let mut inverse = Vec::new();
    walk(base, copy, &mut Vec::new(), &mut patches, &mut inverse);
    (patches, inverse)
}

fn same_shape(a: &Value, b: &Value) -> bool {
    a.is_container() && discriminant(a) == discriminant(b)
}

fn walk(
    base: &Value,
    copy: &Value,
    path: &mut Path,
    patches: &mut Vec<Patch>,
    inverse: &mut Vec<Patch>,
) {
    if base == copy {
        return;
    }
    let mut record = ChangeRecord::new(base.clone(), copy.clone());

    match (base, copy) {
        (Value::Array(b), Value::Array(c)) => {
            for (i, item) in c.iter().enumerate() {
                if b.get(i) != Some(item) {
                    record = record.assign(i);
                }
            }
        }
        (Value::Set(_), Value::Set(_)) => {}
        (Value::Record(b), Value::Record(c)) => {
            for (key, before) in b.iter() {
                match c.get(key) {
                    None => record = record.delete(key.as_str()),
                    Some(after) if after == before => {}
                    Some(after) if same_shape(before, after) => {
                        path.push(PathStep::from(key.as_str()));
                        walk(before, after, path, patches, inverse);
                        path.pop();
                    }
                    Some(_) => record = record.assign(key.as_str()),
                }
            }
            for key in c.keys().filter(|k| !b.contains_key(*k)) {
                record = record.assign(key.as_str());
            }
        }
        (Value::Map(b), Value::Map(c)) => {
            for (key, before) in b.iter() {
                match c.get(key) {
                    None => record = record.delete(key.clone()),
                    Some(after) if after == before => {}
                    Some(after) if same_shape(before, after) => {
                        path.push(key.clone());
                        walk(before, after, path, patches, inverse);
                        path.pop();
                    }
                    Some(_) => record = record.assign(key.clone()),
                }
            }
            for key in c.keys().filter(|k| !b.contains_key(*k)) {
                record = record.assign(key.clone());
            }
        }
        _ => panic!(
            "tracker needs matching containers, got {} and {}",
            base.type_name(),
            copy.type_name()
        ),
    }

    generate_patches(&record, path, patches, inverse);
}
