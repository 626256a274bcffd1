//! Platform service abstractions for WPGen.
//!
//! The palette screen only talks to the host through these traits: setting
//! the wallpaper, asking for the display size, and showing short notices.

mod services;

pub use services::*;
