//! Namespaced key/value preference storage.
//!
//! A [`Prefs`] store maps string keys to integer or string values inside a
//! single namespace. Writes are buffered in memory and made durable by
//! [`Prefs::commit`]. Two backends:
//!
//! - [`MemoryPrefs`] -- nothing leaves the process (tests, throwaway runs).
//! - [`FilePrefs`] -- one TOML file per namespace on disk.

mod file;
mod memory;

pub use file::FilePrefs;
pub use memory::MemoryPrefs;

use serde::{Deserialize, Serialize};

use wpgen_types::error::Result;

/// A stored preference value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Int(i64),
    Str(String),
}

/// Key/value preference store.
pub trait Prefs {
    /// Namespace this store was opened with.
    fn namespace(&self) -> &str;

    /// Integer at `key`, `None` if absent. Errors if the key holds a string.
    fn get_int(&self, key: &str) -> Result<Option<i64>>;

    /// String at `key`, `None` if absent. Errors if the key holds an integer.
    fn get_string(&self, key: &str) -> Result<Option<String>>;

    fn put_int(&mut self, key: &str, value: i64);

    fn put_string(&mut self, key: &str, value: &str);

    /// Remove `key`. Returns whether it was present.
    fn remove(&mut self, key: &str) -> bool;

    fn contains(&self, key: &str) -> bool;

    /// Every stored key, sorted.
    fn keys(&self) -> Vec<String>;

    /// Make pending writes durable.
    fn commit(&mut self) -> Result<()>;
}
