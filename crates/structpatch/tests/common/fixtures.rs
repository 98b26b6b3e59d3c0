//! Generator scenarios stored as JSON.

use serde::Deserialize;
use serde_json::Value as JsonValue;
use structpatch::{ChangeRecord, PathStep, TouchState, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Touch {
    Added,
    Removed,
}

#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Read `base` and `copy` arrays as sets.
    #[serde(default)]
    pub set: bool,
    pub base: JsonValue,
    pub copy: JsonValue,
    #[serde(default)]
    pub assigned: Vec<(JsonValue, Touch)>,
    pub patches: JsonValue,
    pub inverse: JsonValue,
}

impl Scenario {
    fn value(&self, raw: &JsonValue) -> Value {
        match (self.set, raw) {
            (true, JsonValue::Array(items)) => Value::set(items.iter().cloned().map(Value::from)),
            _ => Value::from(raw.clone()),
        }
    }

    pub fn base_value(&self) -> Value {
        self.value(&self.base)
    }

    pub fn copy_value(&self) -> Value {
        self.value(&self.copy)
    }

    pub fn change_record(&self) -> ChangeRecord {
        let mut record = ChangeRecord::new(self.base_value(), self.copy_value());
        for (key, touch) in &self.assigned {
            let key = match key {
                JsonValue::String(s) => PathStep::from(s.as_str()),
                JsonValue::Number(n) => PathStep::Index(n.as_u64().expect("index") as usize),
                other => panic!("{}: bad assigned key {other}", self.name),
            };
            let state = match touch {
                Touch::Added => TouchState::Added,
                Touch::Removed => TouchState::Removed,
            };
            record = record.touch(key, state);
        }
        record
    }
}

pub fn load_scenarios() -> Vec<Scenario> {
    serde_json::from_str(include_str!("../fixtures/scenarios.json")).expect("valid fixture file")
}
