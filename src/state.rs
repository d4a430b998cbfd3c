//! Toggle state store — a flat, ordered mapping from feature key to bool.
//!
//! The key set is fixed at construction (the host derives it from the switch
//! elements present in its markup, in DOM order); only values change for the
//! life of the session. Order matters: status rows and the digit keyboard
//! shortcuts both follow it.

use serde_json::Value;

use crate::error::{PanelError, ParseError};

#[derive(Debug, Clone)]
struct Entry {
    key: String,
    on: bool,
}

/// The toggle mapping. Every key starts false.
#[derive(Debug, Clone)]
pub struct ToggleState {
    entries: Vec<Entry>,
}

impl ToggleState {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ToggleState {
            entries: keys
                .into_iter()
                .map(|k| Entry {
                    key: k.into(),
                    on: false,
                })
                .collect(),
        }
    }

    fn entry_mut(&mut self, key: &str) -> Result<&mut Entry, PanelError> {
        self.entries
            .iter_mut()
            .find(|e| e.key == key)
            .ok_or_else(|| PanelError::UnknownKey {
                key: key.to_string(),
            })
    }

    /// Flip one key; returns the new value.
    pub fn toggle(&mut self, key: &str) -> Result<bool, PanelError> {
        let entry = self.entry_mut(key)?;
        entry.on = !entry.on;
        Ok(entry.on)
    }

    /// Force every key to false.
    pub fn reset_all(&mut self) {
        for entry in &mut self.entries {
            entry.on = false;
        }
    }

    pub fn get(&self, key: &str) -> Option<bool> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.on)
    }

    /// Keys in panel order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// (key, value) pairs in panel order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|e| (e.key.as_str(), e.on))
    }

    /// Count of enabled features.
    pub fn active_count(&self) -> usize {
        self.entries.iter().filter(|e| e.on).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the mapping to formatted JSON for clipboard export.
    pub fn export_json(&self) -> String {
        let map: serde_json::Map<String, Value> = self
            .entries
            .iter()
            .map(|e| (e.key.clone(), Value::Bool(e.on)))
            .collect();
        // A map of plain bools cannot fail to serialize.
        serde_json::to_string_pretty(&Value::Object(map)).unwrap_or_default()
    }

    /// Import a previously exported snapshot. Keys present in both the store
    /// and the input are overwritten with the truthiness of the input value;
    /// unknown input keys are ignored and missing keys are left untouched.
    /// A malformed input changes nothing.
    pub fn import_json(&mut self, text: &str) -> Result<(), PanelError> {
        let value: Value = serde_json::from_str(text).map_err(ParseError::from)?;
        let Value::Object(map) = value else {
            return Err(ParseError::NotAnObject.into());
        };
        for entry in &mut self.entries {
            if let Some(v) = map.get(&entry.key) {
                entry.on = is_truthy(v);
            }
        }
        Ok(())
    }
}

/// JavaScript-style truthiness for imported JSON values: `false`, `0`, `""`
/// and `null` coerce to false; everything else to true.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
