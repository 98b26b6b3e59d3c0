//! Dynamic value model.
//!
//! [`Value`] is the closed set of shapes the patch algorithms understand:
//! scalars plus four container kinds (ordered sequence, record, mapping and
//! unordered set). Containers sit behind [`Arc`], so cloning a `Value` is a
//! reference snapshot and untouched subtrees stay shared between a base value
//! and the copy derived from it. Writers go through [`Arc::make_mut`].

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use serde_json::{Number, Value as JsonValue};
use structpatch_pointer::PathStep;

/// A structured value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Index-addressable ordered sequence.
    Array(Arc<Vec<Value>>),
    /// Plain keyed record with string keys.
    Record(Arc<IndexMap<String, Value>>),
    /// Associative mapping keyed by path steps.
    Map(Arc<IndexMap<PathStep, Value>>),
    /// Unordered set with membership-only semantics. Iterates in insertion order.
    Set(Arc<IndexSet<Value>>),
}

/// Container shape that selects a patch strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Sequence,
    Set,
    /// Records, mappings, and anything that is neither a sequence nor a set.
    Associative,
}

impl Value {
    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Array(Arc::new(items.into_iter().map(Into::into).collect()))
    }

    pub fn record<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Record(Arc::new(
            entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        ))
    }

    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<PathStep>,
        V: Into<Value>,
    {
        Value::Map(Arc::new(
            entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        ))
    }

    pub fn set<I, V>(members: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Set(Arc::new(members.into_iter().map(Into::into).collect()))
    }

    /// Container kind used to dispatch patch generation.
    pub fn kind(&self) -> ContainerKind {
        match self {
            Value::Array(_) => ContainerKind::Sequence,
            Value::Set(_) => ContainerKind::Set,
            _ => ContainerKind::Associative,
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Value::Set(_))
    }

    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Value::Array(_) | Value::Record(_) | Value::Map(_) | Value::Set(_)
        )
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&IndexSet<Value>> {
        match self {
            Value::Set(members) => Some(members),
            _ => None,
        }
    }

    /// Reads the child stored under `key`.
    ///
    /// Records are addressed by the step's string form, sequences by its
    /// index form. Sets and scalars have no addressable children.
    pub fn get(&self, key: &PathStep) -> Option<&Value> {
        match self {
            Value::Array(items) => items.get(key.as_index()?),
            Value::Record(entries) => entries.get(&*key.to_key()),
            Value::Map(entries) => entries.get(key),
            _ => None,
        }
    }

    /// Whether `key` exists in this container.
    pub fn has(&self, key: &PathStep) -> bool {
        self.get(key).is_some()
    }

    /// Mutable access to the child under `key`, unsharing this container first.
    pub fn get_mut(&mut self, key: &PathStep) -> Option<&mut Value> {
        match self {
            Value::Array(items) => {
                let index = key.as_index()?;
                Arc::make_mut(items).get_mut(index)
            }
            Value::Record(entries) => Arc::make_mut(entries).get_mut(&*key.to_key()),
            Value::Map(entries) => Arc::make_mut(entries).get_mut(key),
            _ => None,
        }
    }

    /// True when both values are the same allocation (or equal scalars).
    pub fn is_identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => Arc::ptr_eq(a, b),
            (Value::Record(a), Value::Record(b)) => Arc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Arc::ptr_eq(a, b),
            (Value::Set(a), Value::Set(b)) => Arc::ptr_eq(a, b),
            (a, b) if !a.is_container() && !b.is_container() => a == b,
            _ => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Record(_) => "record",
            Value::Map(_) => "map",
            Value::Set(_) => "set",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Arc::ptr_eq(a, b) || a == b,
            (Value::Record(a), Value::Record(b)) => Arc::ptr_eq(a, b) || a == b,
            (Value::Map(a), Value::Map(b)) => Arc::ptr_eq(a, b) || a == b,
            (Value::Set(a), Value::Set(b)) => Arc::ptr_eq(a, b) || a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

/// Order-independent digest of a keyed container or set: the wrapping sum
/// of each entry's own hash.
fn unordered_hash<I: IntoIterator<Item = T>, T: Hash>(entries: I) -> u64 {
    entries.into_iter().fold(0u64, |acc, entry| {
        let mut hasher = DefaultHasher::new();
        entry.hash(&mut hasher);
        acc.wrapping_add(hasher.finish())
    })
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Number(n) => n.hash(state),
            Value::String(s) => s.hash(state),
            Value::Array(items) => items.hash(state),
            Value::Record(entries) => {
                entries.len().hash(state);
                unordered_hash(entries.iter()).hash(state);
            }
            Value::Map(entries) => {
                entries.len().hash(state);
                unordered_hash(entries.iter()).hash(state);
            }
            Value::Set(members) => {
                members.len().hash(state);
                unordered_hash(members.iter()).hash(state);
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

impl From<f64> for Value {
    /// Non-finite floats become `Null`, as in JSON.
    fn from(n: f64) -> Self {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Arc::new(items))
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => Value::Number(n),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => {
                Value::Array(Arc::new(items.into_iter().map(Value::from).collect()))
            }
            JsonValue::Object(map) => Value::Record(Arc::new(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            )),
        }
    }
}

impl From<&Value> for JsonValue {
    /// Maps become objects with stringified keys and sets become arrays, so
    /// this direction is lossy for those two kinds.
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Number(n) => JsonValue::Number(n.clone()),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Array(items) => JsonValue::Array(items.iter().map(JsonValue::from).collect()),
            Value::Record(entries) => JsonValue::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), JsonValue::from(v)))
                    .collect(),
            ),
            Value::Map(entries) => JsonValue::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.to_key().into_owned(), JsonValue::from(v)))
                    .collect(),
            ),
            Value::Set(members) => JsonValue::Array(members.iter().map(JsonValue::from).collect()),
        }
    }
}
