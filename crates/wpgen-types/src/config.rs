//! WPGen configuration, loaded from a TOML file.
//!
//! ```toml
//! prefs_dir = "/home/user/.local/share/wpgen"
//!
//! [display]
//! width = 1920
//! height = 1080
//!
//! [wallpaper]
//! output_path = "wallpaper.png"
//! apply_command = ["feh", "--bg-fill"]
//! solid_size = 512
//!
//! [palette]
//! colors = ["#FF8800", "navy"]
//!
//! [strings]
//! fav_added = "Saved"
//! ```
//!
//! Every section and key is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WpGenError};
use crate::strings::Strings;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WpGenConfig {
    /// Directory holding the preferences file.
    pub prefs_dir: PathBuf,
    pub display: DisplayConfig,
    pub wallpaper: WallpaperConfig,
    pub palette: PaletteConfig,
    pub strings: Strings,
}

/// Display dimensions reported to the gradient sizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Where and how wallpapers are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallpaperConfig {
    /// PNG file written on every wallpaper change.
    pub output_path: PathBuf,
    /// Optional program (plus leading args) run with the PNG path appended.
    pub apply_command: Vec<String>,
    /// Side length of the bitmap rendered for a solid-color wallpaper.
    pub solid_size: u32,
}

impl Default for WallpaperConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("wallpaper.png"),
            apply_command: Vec::new(),
            solid_size: 512,
        }
    }
}

/// Builtin palette override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Replaces the shipped builtin colors when set.
    pub colors: Option<Vec<String>>,
}

impl WpGenConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                log::info!("Loading config from {}", path.display());
                Self::from_toml(&text)
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {} -- using defaults", path.display());
                Ok(Self::default())
            },
            Err(e) => Err(e.into()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.wallpaper.solid_size == 0 {
            return Err(WpGenError::Config(
                "wallpaper.solid_size must be at least 1".into(),
            ));
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err(WpGenError::Config(
                "display width and height must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = WpGenConfig::from_toml("").unwrap();
        assert_eq!(config, WpGenConfig::default());
        assert_eq!(config.wallpaper.solid_size, 512);
        assert!(config.palette.colors.is_none());
    }

    #[test]
    fn sections_override_defaults() {
        let toml = r##"
prefs_dir = "/tmp/wpgen"

[display]
width = 1080
height = 2340

[wallpaper]
output_path = "/tmp/wp.png"
apply_command = ["feh", "--bg-fill"]

[palette]
colors = ["#FF8800", "navy"]

[strings]
invalid_color = "Nope"
"##;
        let config = WpGenConfig::from_toml(toml).unwrap();
        assert_eq!(config.prefs_dir, PathBuf::from("/tmp/wpgen"));
        assert_eq!(config.display.width, 1080);
        assert_eq!(config.wallpaper.output_path, PathBuf::from("/tmp/wp.png"));
        assert_eq!(config.wallpaper.apply_command, vec!["feh", "--bg-fill"]);
        // Unset key in a present section keeps its default.
        assert_eq!(config.wallpaper.solid_size, 512);
        assert_eq!(
            config.palette.colors,
            Some(vec!["#FF8800".to_string(), "navy".to_string()])
        );
        assert_eq!(config.strings.invalid_color, "Nope");
        assert_eq!(config.strings.fav_added, Strings::default().fav_added);
    }

    #[test]
    fn zero_solid_size_rejected() {
        let err = WpGenConfig::from_toml("[wallpaper]\nsolid_size = 0").unwrap_err();
        assert!(matches!(err, WpGenError::Config(_)));
    }

    #[test]
    fn zero_display_rejected() {
        let err = WpGenConfig::from_toml("[display]\nwidth = 0").unwrap_err();
        assert!(matches!(err, WpGenError::Config(_)));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = WpGenConfig::from_toml("[display\nwidth = 1").unwrap_err();
        assert!(matches!(err, WpGenError::TomlParse(_)));
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let config = WpGenConfig::load(Path::new("/nonexistent/wpgen/config.toml")).unwrap();
        assert_eq!(config, WpGenConfig::default());
    }
}
