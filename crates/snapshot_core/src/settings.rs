//! Named, typed settings shared between the window and the scene.
//!
//! A setting must be registered before it can be written; writes with a
//! value of a different kind are rejected.  Every accepted write bumps the
//! setting's generation so readers can cheaply tell whether it changed.

use std::collections::HashMap;

/// Name of the setting that receives files dropped onto the window.
pub const INPUT_FILES: &str = "input_files";

#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Paths(Vec<String>),
}

impl SettingValue {
    fn same_kind(&self, other: &SettingValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn as_paths(&self) -> Option<&[String]> {
        match self {
            SettingValue::Paths(p) => Some(p),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    value: SettingValue,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct SettingStore {
    entries: HashMap<String, Entry>,
}

impl SettingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` with an initial value.  Re-registering replaces the
    /// value and keeps counting generations.
    pub fn register(&mut self, name: impl Into<String>, value: SettingValue) {
        let name = name.into();
        let generation = self.entries.get(&name).map_or(0, |e| e.generation + 1);
        self.entries.insert(name, Entry { value, generation });
    }

    pub fn get(&self, name: &str) -> Option<&SettingValue> {
        self.entries.get(name).map(|e| &e.value)
    }

    /// Generation counter of `name`, `None` when unregistered.
    pub fn generation(&self, name: &str) -> Option<u64> {
        self.entries.get(name).map(|e| e.generation)
    }

    /// Writes `value` when `name` is registered with the same kind.
    ///
    /// Returns whether the write happened.
    pub fn set(&mut self, name: &str, value: SettingValue) -> bool {
        match self.entries.get_mut(name) {
            Some(entry) if entry.value.same_kind(&value) => {
                entry.value = value;
                entry.generation += 1;
                true
            }
            Some(_) => {
                log::warn!("setting '{name}' holds a different kind; write ignored");
                false
            }
            None => false,
        }
    }
}
