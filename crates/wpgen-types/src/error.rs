//! Error types for WPGen.

use std::io;

/// Errors produced by WPGen.
#[derive(Debug, thiserror::Error)]
pub enum WpGenError {
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    #[error("no colors given")]
    NoColors,

    #[error("invalid bitmap size: {0}")]
    InvalidSize(u32),

    #[error("prefs error: {0}")]
    Prefs(String),

    #[error("platform error: {0}")]
    Platform(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, WpGenError>;
