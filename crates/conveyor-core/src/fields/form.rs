//! Values read from a resource edit form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Address range of a subnet allocation pool, bounds included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPool {
    pub start: String,
    pub end: String,
}

impl AllocationPool {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// One address input of a port form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedIpInput {
    pub subnet_id: String,
    pub ip_address: String,
    pub original: String,
    /// Pools of the subnet the address must fall in
    pub allocation_pools: Vec<AllocationPool>,
}

/// State of one form control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldInput {
    /// Text input or select box
    Value { current: String, original: String },
    Checked { checked: bool, original: bool },
    /// Key/value table; `dirty` when rows were added or deleted
    Rows {
        rows: Vec<(String, String)>,
        dirty: bool,
    },
    FixedIps { ips: Vec<FixedIpInput> },
    /// Security group rules as loaded, with the ids deleted in the form
    Rules {
        rules: Vec<Value>,
        deleted_ids: Vec<String>,
        changed: bool,
    },
}

/// All controls of an edit form, keyed by control name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSnapshot {
    inputs: BTreeMap<String, FieldInput>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, name: impl Into<String>, input: FieldInput) -> Self {
        self.inputs.insert(name.into(), input);
        self
    }

    pub fn value(self, name: impl Into<String>, current: impl Into<String>, original: impl Into<String>) -> Self {
        self.with_input(
            name,
            FieldInput::Value {
                current: current.into(),
                original: original.into(),
            },
        )
    }

    pub fn checked(self, name: impl Into<String>, checked: bool, original: bool) -> Self {
        self.with_input(name, FieldInput::Checked { checked, original })
    }

    pub fn rows<K, V>(self, name: impl Into<String>, rows: impl IntoIterator<Item = (K, V)>, dirty: bool) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        self.with_input(name, FieldInput::Rows { rows, dirty })
    }

    pub fn get(&self, name: &str) -> Option<&FieldInput> {
        self.inputs.get(name)
    }

    /// Current and original value of a text or select control.
    pub fn text(&self, name: &str) -> Option<(&str, &str)> {
        match self.get(name)? {
            FieldInput::Value { current, original } => Some((current.as_str(), original.as_str())),
            _ => None,
        }
    }
}
