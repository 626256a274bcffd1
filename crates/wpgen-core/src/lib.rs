//! WPGen core.
//!
//! Favorites persistence and the favorites-then-builtins palette view
//! ([`store`]), solid and gradient bitmap generation ([`render`]), and the
//! two-mode palette screen state machine ([`controller`]).

// Re-exports from wpgen-types (foundation types).
pub use wpgen_types::bitmap;
pub use wpgen_types::color;
pub use wpgen_types::config;
pub use wpgen_types::error;
pub use wpgen_types::strings;

pub use wpgen_platform as platform;
pub use wpgen_prefs as prefs;

pub mod controller;
pub mod palette;
pub mod render;
pub mod store;

pub use controller::{Mode, Outcome, PaletteController};
pub use store::{AddFavorite, ColorStore, FavoriteToggle};
