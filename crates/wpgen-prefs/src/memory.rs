//! In-memory preference store.
//!
//! Useful for unit tests and ephemeral sessions. `commit` is a no-op.

use std::collections::BTreeMap;

use wpgen_types::error::{Result, WpGenError};

use crate::{PrefValue, Prefs};

/// A preference store that never touches disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryPrefs {
    namespace: String,
    values: BTreeMap<String, PrefValue>,
    commits: usize,
}

impl MemoryPrefs {
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            values: BTreeMap::new(),
            commits: 0,
        }
    }

    /// Number of times `commit` has been called.
    pub fn commit_count(&self) -> usize {
        self.commits
    }
}

pub(crate) fn get_int(values: &BTreeMap<String, PrefValue>, key: &str) -> Result<Option<i64>> {
    match values.get(key) {
        Some(PrefValue::Int(v)) => Ok(Some(*v)),
        Some(PrefValue::Str(_)) => Err(WpGenError::Prefs(format!("{key} is not an integer"))),
        None => Ok(None),
    }
}

pub(crate) fn get_string(
    values: &BTreeMap<String, PrefValue>,
    key: &str,
) -> Result<Option<String>> {
    match values.get(key) {
        Some(PrefValue::Str(s)) => Ok(Some(s.clone())),
        Some(PrefValue::Int(_)) => Err(WpGenError::Prefs(format!("{key} is not a string"))),
        None => Ok(None),
    }
}

impl Prefs for MemoryPrefs {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn get_int(&self, key: &str) -> Result<Option<i64>> {
        get_int(&self.values, key)
    }

    fn get_string(&self, key: &str) -> Result<Option<String>> {
        get_string(&self.values, key)
    }

    fn put_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), PrefValue::Int(value));
    }

    fn put_string(&mut self, key: &str, value: &str) {
        self.values
            .insert(key.to_string(), PrefValue::Str(value.to_string()));
    }

    fn remove(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    fn commit(&mut self) -> Result<()> {
        self.commits += 1;
        Ok(())
    }
}
