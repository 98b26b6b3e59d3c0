//! Per-node change records handed to the patch generator.
//!
//! A draft tracker records, for every container it modified, the value it
//! started from, the value it ended with, and which keys it touched. The
//! generator only looks at touched keys, which keeps a diff proportional to
//! the change instead of to the container.

use indexmap::IndexMap;
use structpatch_pointer::PathStep;

use crate::value::{ContainerKind, Value};

/// What happened to a key while the draft was mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchState {
    /// The key was written, either inserted or overwritten.
    Added,
    /// The key was deleted.
    Removed,
    #[default]
    Untouched,
}

/// Touched keys in the order they were first touched.
pub type AssignedKeys = IndexMap<PathStep, TouchState>;

/// Change bookkeeping for one container node.
#[derive(Debug, Clone, Default)]
pub struct ChangeRecord {
    pub base: Value,
    pub copy: Value,
    pub assigned: AssignedKeys,
}

impl ChangeRecord {
    pub fn new(base: Value, copy: Value) -> Self {
        Self {
            base,
            copy,
            assigned: AssignedKeys::new(),
        }
    }

    /// Records `state` for `key`. A key keeps its first-touch position.
    ///
    /// On sequences, canonical numeric keys such as `"1"` are stored as
    /// indices, so `assign("1")` and `assign(1)` touch the same element.
    pub fn touch(mut self, key: impl Into<PathStep>, state: TouchState) -> Self {
        let key = self.normalize(key.into());
        self.assigned.insert(key, state);
        self
    }

    pub fn assign(self, key: impl Into<PathStep>) -> Self {
        self.touch(key, TouchState::Added)
    }

    pub fn delete(self, key: impl Into<PathStep>) -> Self {
        self.touch(key, TouchState::Removed)
    }

    /// Kind of the node, decided by the base value's shape.
    pub fn kind(&self) -> ContainerKind {
        self.base.kind()
    }

    pub fn touch_state(&self, key: &PathStep) -> TouchState {
        if let Some(state) = self.assigned.get(key) {
            return *state;
        }
        // `assigned` is public, so a sequence may still carry string keys.
        match (self.kind(), key) {
            (ContainerKind::Sequence, PathStep::Index(i)) => self
                .assigned
                .get(&PathStep::Key(i.to_string()))
                .copied()
                .unwrap_or_default(),
            _ => TouchState::Untouched,
        }
    }

    fn normalize(&self, key: PathStep) -> PathStep {
        match (self.kind(), key.as_index()) {
            (ContainerKind::Sequence, Some(i)) => PathStep::Index(i),
            _ => key,
        }
    }

    /// Touched keys, skipping explicit `Untouched` entries.
    pub fn touched(&self) -> impl Iterator<Item = (&PathStep, TouchState)> + '_ {
        self.assigned
            .iter()
            .filter(|(_, state)| **state != TouchState::Untouched)
            .map(|(key, state)| (key, *state))
    }
}
