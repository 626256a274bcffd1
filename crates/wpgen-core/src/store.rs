//! Favorite colors, the derived palette, and the multi-select set.
//!
//! Favorites persist in a [`Prefs`] store as an indexed list:
//!
//! ```text
//! favorites = <count>
//! fav0      = "<color>"
//! fav1      = "<color>"
//! ...
//! ```
//!
//! The palette (favorites first, then builtins not already favorited) is
//! never stored; it is recomputed from the two lists whenever asked for.

use wpgen_prefs::Prefs;
use wpgen_types::color::is_valid_color;
use wpgen_types::error::{Result, WpGenError};

use crate::palette::merge;

/// Preferences namespace holding the favorites.
pub const PREFS_NAMESPACE: &str = "WPGenPrefs";

/// Key holding the number of persisted favorites.
pub const COUNT_KEY: &str = "favorites";

/// Key of the `i`th persisted favorite.
pub fn favorite_key(i: usize) -> String {
    format!("fav{i}")
}

/// Index of a `fav<i>` key.
fn favorite_index(key: &str) -> Option<usize> {
    let digits = key.strip_prefix("fav")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Result of the star button on a palette entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
    /// A multi-selection is active; favorites were left alone.
    Ignored,
}

/// Result of the add-color prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddFavorite {
    /// Stored under this (upper-cased) string.
    Added(String),
    /// Already a favorite under this string.
    AlreadyPresent(String),
    /// Nothing was entered.
    Empty,
}

/// Owns the favorites list, the builtin list, and the current selection.
pub struct ColorStore<P: Prefs> {
    prefs: P,
    favorites: Vec<String>,
    builtins: Vec<String>,
    /// Checked colors in check order.
    selection: Vec<String>,
}

impl<P: Prefs> ColorStore<P> {
    /// Create a store over `prefs` and load the persisted favorites.
    ///
    /// Builtins that do not parse are dropped.
    pub fn open(prefs: P, builtins: Vec<String>) -> Self {
        let builtins = builtins
            .into_iter()
            .filter(|c| {
                let ok = is_valid_color(c);
                if !ok {
                    log::warn!("Skipping invalid builtin color {c:?}");
                }
                ok
            })
            .collect();
        let mut store = Self {
            prefs,
            favorites: Vec::new(),
            builtins,
            selection: Vec::new(),
        };
        store.load();
        store
    }

    /// Replace the in-memory favorites with the persisted ones.
    ///
    /// Unreadable storage loads as an empty list. Empty, unparseable, and
    /// repeated entries are skipped.
    pub fn load(&mut self) {
        self.favorites.clear();
        let stored = match self.prefs.get_int(COUNT_KEY) {
            Ok(Some(n)) => n.max(0),
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Ignoring stored favorites: {e}");
                0
            },
        };
        let limit = self
            .prefs
            .keys()
            .iter()
            .filter_map(|k| favorite_index(k))
            .max()
            .map_or(0, |i| i + 1);
        let count = usize::try_from(stored).unwrap_or(usize::MAX);
        let count = if count > limit {
            log::warn!("Stored favorite count {stored} exceeds the entries present; reading {limit}");
            limit
        } else {
            count
        };
        for i in 0..count {
            let fav = match self.prefs.get_string(&favorite_key(i)) {
                Ok(Some(s)) => s,
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("Skipping favorite {i}: {e}");
                    continue;
                },
            };
            if fav.is_empty() || self.favorites.contains(&fav) {
                continue;
            }
            if !is_valid_color(&fav) {
                log::warn!("Skipping unparseable favorite {fav:?}");
                continue;
            }
            self.favorites.push(fav);
        }
        log::debug!(
            "Loaded {} favorites from {}",
            self.favorites.len(),
            self.prefs.namespace()
        );
    }

    /// Persist the favorites, pruning entries left over from a longer list.
    pub fn save(&mut self) -> Result<()> {
        let len = self.favorites.len();
        self.prefs.put_int(COUNT_KEY, len as i64);
        for (i, fav) in self.favorites.iter().enumerate() {
            self.prefs.put_string(&favorite_key(i), fav);
        }
        for key in self.prefs.keys() {
            if favorite_index(&key).is_some_and(|i| i >= len) {
                log::debug!("Pruning stale favorite {key}");
                self.prefs.remove(&key);
            }
        }
        self.prefs.commit()
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn builtins(&self) -> &[String] {
        &self.builtins
    }

    pub fn is_favorite(&self, color: &str) -> bool {
        self.favorites.iter().any(|f| f == color)
    }

    /// Favorites followed by the builtins that are not favorites.
    pub fn palette(&self) -> Vec<String> {
        merge(&self.favorites, &self.builtins)
    }

    /// Add `color` if it is not a favorite, remove it if it is.
    ///
    /// Does nothing while any color is selected.
    pub fn toggle_favorite(&mut self, color: &str) -> Result<FavoriteToggle> {
        if !self.selection.is_empty() {
            log::debug!("Favorite toggle ignored during selection");
            return Ok(FavoriteToggle::Ignored);
        }
        let outcome = if let Some(pos) = self.favorites.iter().position(|f| f == color) {
            self.favorites.remove(pos);
            log::info!("Removed favorite {color}");
            FavoriteToggle::Removed
        } else {
            if !is_valid_color(color) {
                return Err(WpGenError::InvalidColor(color.to_string()));
            }
            self.favorites.push(color.to_string());
            log::info!("Added favorite {color}");
            FavoriteToggle::Added
        };
        self.save()?;
        Ok(outcome)
    }

    /// Validate `text` as a color and append it, upper-cased, to the favorites.
    pub fn add_favorite(&mut self, text: &str) -> Result<AddFavorite> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(AddFavorite::Empty);
        }
        if !is_valid_color(text) {
            log::warn!("Rejected favorite {text:?}");
            return Err(WpGenError::InvalidColor(text.to_string()));
        }
        let color = text.to_uppercase();
        if self.is_favorite(&color) {
            return Ok(AddFavorite::AlreadyPresent(color));
        }
        self.favorites.push(color.clone());
        self.save()?;
        log::info!("Added favorite {color}");
        Ok(AddFavorite::Added(color))
    }

    // -- Selection --

    /// Checked colors in the order they were checked.
    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn is_selected(&self, color: &str) -> bool {
        self.selection.iter().any(|s| s == color)
    }

    /// Check `color`. Only palette colors can be checked; returns whether
    /// the selection changed.
    pub fn select(&mut self, color: &str) -> bool {
        if self.is_selected(color) || !self.palette().iter().any(|c| c == color) {
            return false;
        }
        self.selection.push(color.to_string());
        true
    }

    /// Uncheck `color`; returns whether it was checked.
    pub fn deselect(&mut self, color: &str) -> bool {
        let before = self.selection.len();
        self.selection.retain(|s| s != color);
        self.selection.len() != before
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn prefs(&self) -> &P {
        &self.prefs
    }
}
