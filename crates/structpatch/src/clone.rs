//! Structural deep clone.

use std::sync::Arc;

use crate::value::Value;

/// Rebuilds every container in `value` with fresh allocations.
///
/// `Value::clone` only bumps reference counts; the applier uses this instead
/// so a document never shares storage with the patch payload it came from.
/// Scalars are copied as is. Values are acyclic, so there is no cycle check.
pub fn deep_clone(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(Arc::new(items.iter().map(deep_clone).collect())),
        Value::Record(entries) => Value::Record(Arc::new(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), deep_clone(v)))
                .collect(),
        )),
        Value::Map(entries) => Value::Map(Arc::new(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), deep_clone(v)))
                .collect(),
        )),
        Value::Set(members) => Value::Set(Arc::new(members.iter().map(deep_clone).collect())),
        scalar => scalar.clone(),
    }
}
