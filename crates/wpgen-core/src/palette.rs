//! Builtin palette and the favorites-then-builtins merge.

/// Colors shipped with the application, in display order.
pub const DEFAULT_BUILTINS: &[&str] = &[
    "#F44336", "#E91E63", "#9C27B0", "#673AB7", "#3F51B5", "#2196F3", "#03A9F4", "#00BCD4",
    "#009688", "#4CAF50", "#8BC34A", "#CDDC39", "#FFEB3B", "#FFC107", "#FF9800", "#FF5722",
    "#795548", "#9E9E9E", "#607D8B", "#000000", "#FFFFFF",
];

/// The shipped builtins as owned strings.
pub fn default_builtins() -> Vec<String> {
    DEFAULT_BUILTINS.iter().map(|s| (*s).to_string()).collect()
}

/// `favorites` followed by every builtin not among them.
///
/// Both input orders are preserved. Only favorites are filtered out of
/// `builtins`; a color listed twice there shows twice.
pub fn merge(favorites: &[String], builtins: &[String]) -> Vec<String> {
    let mut all = Vec::with_capacity(favorites.len() + builtins.len());
    all.extend(favorites.iter().cloned());
    all.extend(builtins.iter().filter(|c| !favorites.contains(c)).cloned());
    all
}
