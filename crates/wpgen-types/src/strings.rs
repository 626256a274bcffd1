//! User-facing strings.
//!
//! Every message the palette screen shows goes through [`Strings`] so a
//! `[strings]` table in the config file can relabel or translate them.

use serde::{Deserialize, Serialize};

/// Message and dialog text for the palette screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Strings {
    pub fav_added: String,
    pub fav_removed: String,
    pub fav_already_present: String,
    pub invalid_color: String,
    pub wallpaper_set_to_color: String,
    pub wallpaper_set_to_gradient: String,
    pub wallpaper_failed: String,
    pub save_failed: String,
    pub add_color_title: String,
    pub add_color_message: String,
    /// Selection title for exactly one color.
    pub colors_selected_one: String,
    /// Selection title for any other count; `{n}` is replaced by the count.
    pub colors_selected_other: String,
}

impl Default for Strings {
    fn default() -> Self {
        Self {
            fav_added: "Added to favorites".to_string(),
            fav_removed: "Removed from favorites".to_string(),
            fav_already_present: "Already in favorites".to_string(),
            invalid_color: "Invalid color".to_string(),
            wallpaper_set_to_color: "Wallpaper set to color".to_string(),
            wallpaper_set_to_gradient: "Wallpaper set to gradient".to_string(),
            wallpaper_failed: "Could not set wallpaper".to_string(),
            save_failed: "Could not save favorites".to_string(),
            add_color_title: "Add color".to_string(),
            add_color_message: "Enter a color, e.g. #FF8800 or navy".to_string(),
            colors_selected_one: "1 color selected".to_string(),
            colors_selected_other: "{n} colors selected".to_string(),
        }
    }
}

impl Strings {
    /// Title for the selection bar with `n` colors checked.
    pub fn colors_selected(&self, n: usize) -> String {
        if n == 1 {
            self.colors_selected_one.clone()
        } else {
            self.colors_selected_other.replace("{n}", &n.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plural_selection_title() {
        let s = Strings::default();
        assert_eq!(s.colors_selected(1), "1 color selected");
        assert_eq!(s.colors_selected(0), "0 colors selected");
        assert_eq!(s.colors_selected(3), "3 colors selected");
    }

    #[test]
    fn partial_table_keeps_defaults() {
        let s: Strings = toml::from_str("fav_added = \"Favorito guardado\"").unwrap();
        assert_eq!(s.fav_added, "Favorito guardado");
        assert_eq!(s.invalid_color, Strings::default().invalid_color);
    }
}
