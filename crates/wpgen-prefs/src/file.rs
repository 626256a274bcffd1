//! File-backed preference store.
//!
//! Each namespace lives in `<dir>/<namespace>.toml` as a flat table of
//! integer and string values. The file is read once on open and rewritten
//! in full on every commit. Damaged files open as an empty store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use wpgen_types::error::{Result, WpGenError};

use crate::memory::{get_int, get_string};
use crate::{PrefValue, Prefs};

/// Preference store persisted as a TOML file.
#[derive(Debug)]
pub struct FilePrefs {
    namespace: String,
    path: PathBuf,
    values: BTreeMap<String, PrefValue>,
    dirty: bool,
}

impl FilePrefs {
    /// Open the store for `namespace` under `dir`.
    ///
    /// A missing file opens as an empty store; nothing is created until the
    /// first commit.
    pub fn open(dir: &Path, namespace: &str) -> Result<Self> {
        if namespace.is_empty() || namespace.contains(['/', '\\']) {
            return Err(WpGenError::Prefs(format!(
                "invalid namespace: {namespace:?}"
            )));
        }
        let path = dir.join(format!("{namespace}.toml"));
        let values = match fs::read(&path) {
            Ok(bytes) => parse_values(&path, &bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::debug!(
            "Opened prefs {} ({} keys)",
            path.display(),
            values.len()
        );
        Ok(Self {
            namespace: namespace.to_string(),
            path,
            values,
            dirty: false,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Suffix given to a prefs file that could not be parsed.
const DAMAGED_SUFFIX: &str = "toml.bad";

/// Read the integer and string entries of a prefs file.
///
/// Entries of any other type are skipped. A file that is not UTF-8 TOML is
/// moved aside to `<namespace>.toml.bad` and the store opens empty.
fn parse_values(path: &Path, bytes: &[u8]) -> BTreeMap<String, PrefValue> {
    let parsed = std::str::from_utf8(bytes)
        .map_err(|e| e.to_string())
        .and_then(|text| toml::from_str::<toml::Table>(text).map_err(|e| e.to_string()));
    let table = match parsed {
        Ok(table) => table,
        Err(e) => {
            let aside = path.with_extension(DAMAGED_SUFFIX);
            log::warn!(
                "Unreadable prefs {} ({e}); moving it to {}",
                path.display(),
                aside.display()
            );
            if let Err(e) = fs::rename(path, &aside) {
                log::warn!("Could not move {} aside: {e}", path.display());
            }
            return BTreeMap::new();
        },
    };
    table
        .into_iter()
        .filter_map(|(key, value)| match value {
            toml::Value::Integer(i) => Some((key, PrefValue::Int(i))),
            toml::Value::String(s) => Some((key, PrefValue::Str(s))),
            other => {
                log::warn!(
                    "Skipping pref {key} in {}: unsupported {} value",
                    path.display(),
                    other.type_str()
                );
                None
            },
        })
        .collect()
}

impl Prefs for FilePrefs {
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
        self.dirty = true;
    }

    fn put_string(&mut self, key: &str, value: &str) {
        self.values
            .insert(key.to_string(), PrefValue::Str(value.to_string()));
        self.dirty = true;
    }

    fn remove(&mut self, key: &str) -> bool {
        let removed = self.values.remove(key).is_some();
        self.dirty |= removed;
        removed
    }

    fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    fn commit(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let text = toml::to_string(&self.values)?;
        // Write to a sibling, then rename over the old file.
        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        self.dirty = false;
        log::debug!("Committed prefs {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = FilePrefs::open(dir.path(), "WPGenPrefs").unwrap();
        assert!(!prefs.contains("favorites"));
        assert!(!prefs.path().exists());
    }

    #[test]
    fn commit_then_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut prefs = FilePrefs::open(dir.path(), "WPGenPrefs").unwrap();
            prefs.put_int("favorites", 2);
            prefs.put_string("fav0", "#112233");
            prefs.put_string("fav1", "RED");
            prefs.commit().unwrap();
        }
        let prefs = FilePrefs::open(dir.path(), "WPGenPrefs").unwrap();
        assert_eq!(prefs.get_int("favorites").unwrap(), Some(2));
        assert_eq!(prefs.get_string("fav0").unwrap().as_deref(), Some("#112233"));
        assert_eq!(prefs.get_string("fav1").unwrap().as_deref(), Some("RED"));
        assert!(dir.path().join("WPGenPrefs.toml").is_file());
    }

    #[test]
    fn uncommitted_writes_are_lost() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut prefs = FilePrefs::open(dir.path(), "p").unwrap();
            prefs.put_int("k", 1);
        }
        let prefs = FilePrefs::open(dir.path(), "p").unwrap();
        assert!(!prefs.contains("k"));
    }

    #[test]
    fn removal_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut prefs = FilePrefs::open(dir.path(), "p").unwrap();
        prefs.put_string("a", "x");
        prefs.put_string("b", "y");
        prefs.commit().unwrap();
        assert!(prefs.remove("a"));
        prefs.commit().unwrap();

        let reopened = FilePrefs::open(dir.path(), "p").unwrap();
        assert!(!reopened.contains("a"));
        assert!(reopened.contains("b"));
    }

    #[test]
    fn commit_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        let mut prefs = FilePrefs::open(&nested, "p").unwrap();
        prefs.put_int("k", 7);
        prefs.commit().unwrap();
        assert!(nested.join("p.toml").is_file());
    }

    #[test]
    fn damaged_file_opens_empty_and_is_moved_aside() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("p.toml"), "not [[ toml").unwrap();
        let prefs = FilePrefs::open(dir.path(), "p").unwrap();
        assert!(prefs.keys().is_empty());
        assert!(!dir.path().join("p.toml").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("p.toml.bad")).unwrap(),
            "not [[ toml"
        );
    }

    #[test]
    fn non_utf8_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("p.toml"), [0xFF, 0xFE, 0x00]).unwrap();
        let prefs = FilePrefs::open(dir.path(), "p").unwrap();
        assert!(prefs.keys().is_empty());
        assert!(dir.path().join("p.toml.bad").is_file());
    }

    #[test]
    fn foreign_value_types_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("WPGenPrefs.toml"),
            "favorites = 1\nfav0 = \"RED\"\ntheme = true\nsizes = [1, 2]\n",
        )
        .unwrap();
        let prefs = FilePrefs::open(dir.path(), "WPGenPrefs").unwrap();
        assert_eq!(prefs.get_int("favorites").unwrap(), Some(1));
        assert_eq!(prefs.get_string("fav0").unwrap().as_deref(), Some("RED"));
        assert!(!prefs.contains("theme"));
        assert_eq!(prefs.keys(), vec!["fav0", "favorites"]);
    }

    #[test]
    fn bad_namespace_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FilePrefs::open(dir.path(), "").is_err());
        assert!(FilePrefs::open(dir.path(), "../escape").is_err());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn string_values_survive_reopen(
                entries in proptest::collection::btree_map("[a-z][a-z0-9]{0,8}", "\\PC{0,16}", 0..8),
            ) {
                let dir = tempfile::tempdir().unwrap();
                let mut prefs = FilePrefs::open(dir.path(), "p").unwrap();
                for (k, v) in &entries {
                    prefs.put_string(k, v);
                }
                prefs.commit().unwrap();
                let reopened = FilePrefs::open(dir.path(), "p").unwrap();
                for (k, v) in &entries {
                    let got = reopened.get_string(k).unwrap();
                    prop_assert_eq!(got.as_deref(), Some(v.as_str()));
                }
            }
        }
    }
}
