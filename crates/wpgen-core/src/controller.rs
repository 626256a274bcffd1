//! Palette screen state machine.
//!
//! Two modes:
//!
//! - **Browse** -- tapping a color renders a solid bitmap and sets it as the
//!   wallpaper.
//! - **MultiSelect** -- entered by long-press; taps check and uncheck colors,
//!   and the gradient action blends the checked colors into a wallpaper and
//!   returns to Browse.
//!
//! Every user-visible result is reported through the platform's
//! [`NoticeService`](wpgen_platform::NoticeService); methods return an
//! [`Outcome`] describing what happened and never fail.

use wpgen_platform::Platform;
use wpgen_prefs::Prefs;
use wpgen_types::bitmap::Bitmap;
use wpgen_types::error::{Result, WpGenError};
use wpgen_types::strings::Strings;

use crate::render::{self, SOLID_WALLPAPER_SIZE};
use crate::store::{AddFavorite, ColorStore, FavoriteToggle};

/// The UI modes of the palette screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    MultiSelect,
}

/// What a user action resulted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The action does not apply in the current state.
    Ignored,
    WallpaperSet,
    WallpaperFailed,
    InvalidColor,
    FavoriteAdded,
    FavoriteRemoved,
    AlreadyFavorite,
    /// Favorites changed in memory but could not be persisted.
    SaveFailed,
    /// Selection now holds this many colors.
    SelectionChanged(usize),
    SelectionEnded,
    DialogOpened,
    DialogClosed,
}

/// Mediates user actions against the color store, the bitmap generators,
/// and the platform.
pub struct PaletteController<P: Prefs, S: Platform> {
    store: ColorStore<P>,
    platform: S,
    strings: Strings,
    solid_size: u32,
    mode: Mode,
    dialog_open: bool,
}

impl<P: Prefs, S: Platform> PaletteController<P, S> {
    pub fn new(store: ColorStore<P>, platform: S, strings: Strings) -> Self {
        Self {
            store,
            platform,
            strings,
            solid_size: SOLID_WALLPAPER_SIZE,
            mode: Mode::Browse,
            dialog_open: false,
        }
    }

    /// Side length of solid-color wallpapers.
    pub fn with_solid_size(mut self, size: u32) -> Self {
        self.solid_size = size.max(1);
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn store(&self) -> &ColorStore<P> {
        &self.store
    }

    pub fn platform(&self) -> &S {
        &self.platform
    }

    pub fn strings(&self) -> &Strings {
        &self.strings
    }

    /// Current palette: favorites first, then the remaining builtins.
    pub fn palette(&self) -> Vec<String> {
        self.store.palette()
    }

    /// Whether entry `index` is a favorite (favorites lead the palette).
    pub fn is_favorite_at(&self, index: usize) -> bool {
        index < self.store.favorites().len()
    }

    pub fn is_checked_at(&self, index: usize) -> bool {
        self.color_at(index)
            .is_some_and(|c| self.store.is_selected(&c))
    }

    pub fn selection(&self) -> &[String] {
        self.store.selection()
    }

    /// Title for the selection bar.
    pub fn selection_title(&self) -> String {
        self.strings.colors_selected(self.store.selection().len())
    }

    /// The gradient action is only offered with two or more colors checked.
    pub fn can_apply_gradient(&self) -> bool {
        self.mode == Mode::MultiSelect && self.store.selection().len() > 1
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    fn color_at(&self, index: usize) -> Option<String> {
        let color = self.store.palette().into_iter().nth(index);
        if color.is_none() {
            log::warn!("No palette entry at {index}");
        }
        color
    }

    fn notify(&mut self, message: impl AsRef<str>) {
        self.platform.notify(message.as_ref());
    }

    /// Render preview bitmap for entry `index` sized for a grid column.
    pub fn preview(&self, index: usize, column_width: u32) -> Option<Bitmap> {
        let color = self.color_at(index)?;
        match render::solid(&color, render::thumbnail_size(column_width)) {
            Ok(bmp) => Some(bmp),
            Err(e) => {
                log::warn!("No preview for {color}: {e}");
                None
            },
        }
    }

    // -- Browse --

    /// Tap entry `index`: set it as a solid wallpaper in Browse, toggle its
    /// check in MultiSelect.
    pub fn tap(&mut self, index: usize) -> Outcome {
        if self.mode == Mode::MultiSelect {
            let checked = self.is_checked_at(index);
            return self.set_checked(index, !checked);
        }
        let Some(color) = self.color_at(index) else {
            return Outcome::Ignored;
        };
        match render::solid(&color, self.solid_size) {
            Ok(bitmap) => {
                let msg = self.strings.wallpaper_set_to_color.clone();
                self.apply_wallpaper(&bitmap, &msg)
            },
            Err(e) => self.report_render_error(&e),
        }
    }

    fn apply_wallpaper(&mut self, bitmap: &Bitmap, success: &str) -> Outcome {
        match self.platform.set_wallpaper(bitmap) {
            Ok(()) => {
                self.notify(success);
                Outcome::WallpaperSet
            },
            Err(e) => {
                log::error!("Setting wallpaper failed: {e}");
                let msg = self.strings.wallpaper_failed.clone();
                self.notify(msg);
                Outcome::WallpaperFailed
            },
        }
    }

    fn report_render_error(&mut self, e: &WpGenError) -> Outcome {
        log::warn!("Cannot render wallpaper: {e}");
        let msg = self.strings.invalid_color.clone();
        self.notify(msg);
        Outcome::InvalidColor
    }

    // -- MultiSelect --

    /// Long-press entry `index`: enter MultiSelect if needed and check it.
    pub fn long_press(&mut self, index: usize) -> Outcome {
        if self.color_at(index).is_none() {
            return Outcome::Ignored;
        }
        if self.mode == Mode::Browse {
            log::debug!("Entering multi-select");
            self.mode = Mode::MultiSelect;
        }
        self.set_checked(index, true)
    }

    /// Check or uncheck entry `index`. Unchecking the last color ends the
    /// selection mode.
    pub fn set_checked(&mut self, index: usize, checked: bool) -> Outcome {
        if self.mode != Mode::MultiSelect {
            return Outcome::Ignored;
        }
        let Some(color) = self.color_at(index) else {
            return Outcome::Ignored;
        };
        if checked {
            self.store.select(&color);
        } else {
            self.store.deselect(&color);
        }
        if self.store.selection().is_empty() {
            return self.end_selection();
        }
        Outcome::SelectionChanged(self.store.selection().len())
    }

    /// Blend the checked colors into a gradient wallpaper and leave
    /// MultiSelect.
    ///
    /// An invalid color keeps the mode active so it can be unchecked.
    pub fn apply_gradient(&mut self) -> Outcome {
        if !self.can_apply_gradient() {
            return Outcome::Ignored;
        }
        let (w, h) = self.platform.display_size();
        let side = render::wallpaper_side(w, h);
        let result = render::gradient(self.store.selection(), side);
        let outcome = match result {
            Ok(bitmap) => {
                let msg = self.strings.wallpaper_set_to_gradient.clone();
                self.apply_wallpaper(&bitmap, &msg)
            },
            Err(e) => return self.report_render_error(&e),
        };
        self.end_selection();
        outcome
    }

    /// Leave MultiSelect, clearing the selection.
    pub fn end_selection(&mut self) -> Outcome {
        if self.mode != Mode::MultiSelect {
            return Outcome::Ignored;
        }
        self.store.clear_selection();
        self.mode = Mode::Browse;
        log::debug!("Left multi-select");
        Outcome::SelectionEnded
    }

    // -- Favorites --

    /// Star button on entry `index`. Does nothing while colors are checked.
    pub fn toggle_favorite(&mut self, index: usize) -> Outcome {
        let Some(color) = self.color_at(index) else {
            return Outcome::Ignored;
        };
        match self.store.toggle_favorite(&color) {
            Ok(FavoriteToggle::Added) => {
                let msg = self.strings.fav_added.clone();
                self.notify(msg);
                Outcome::FavoriteAdded
            },
            Ok(FavoriteToggle::Removed) => {
                let msg = self.strings.fav_removed.clone();
                self.notify(msg);
                Outcome::FavoriteRemoved
            },
            Ok(FavoriteToggle::Ignored) => Outcome::Ignored,
            Err(e) => self.report_store_error(e),
        }
    }

    /// Open the add-color prompt.
    pub fn open_add_dialog(&mut self) -> Outcome {
        self.dialog_open = true;
        Outcome::DialogOpened
    }

    pub fn cancel_add(&mut self) -> Outcome {
        if !self.dialog_open {
            return Outcome::Ignored;
        }
        self.dialog_open = false;
        Outcome::DialogClosed
    }

    /// Confirm the add-color prompt with `text`.
    pub fn confirm_add(&mut self, text: &str) -> Outcome {
        if !self.dialog_open {
            return Outcome::Ignored;
        }
        self.dialog_open = false;
        match self.store.add_favorite(text) {
            Ok(AddFavorite::Added(_)) => {
                let msg = self.strings.fav_added.clone();
                self.notify(msg);
                Outcome::FavoriteAdded
            },
            Ok(AddFavorite::AlreadyPresent(_)) => {
                let msg = self.strings.fav_already_present.clone();
                self.notify(msg);
                Outcome::AlreadyFavorite
            },
            Ok(AddFavorite::Empty) => Outcome::DialogClosed,
            Err(e) => self.report_store_error(e),
        }
    }

    fn report_store_error(&mut self, e: WpGenError) -> Outcome {
        match e {
            WpGenError::InvalidColor(_) => {
                let msg = self.strings.invalid_color.clone();
                self.notify(msg);
                Outcome::InvalidColor
            },
            other => {
                log::error!("Saving favorites failed: {other}");
                let msg = self.strings.save_failed.clone();
                self.notify(msg);
                Outcome::SaveFailed
            },
        }
    }

    /// Persist favorites explicitly (e.g. on shutdown).
    pub fn save(&mut self) -> Result<()> {
        self.store.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wpgen_platform::{DisplayService, NoticeService, WallpaperService};
    use wpgen_prefs::MemoryPrefs;

    use crate::store::PREFS_NAMESPACE;

    #[derive(Default)]
    struct MockPlatform {
        wallpapers: Vec<Bitmap>,
        notices: Vec<String>,
        fail: bool,
    }

    impl WallpaperService for MockPlatform {
        fn set_wallpaper(&mut self, bitmap: &Bitmap) -> Result<()> {
            if self.fail {
                return Err(WpGenError::Io(std::io::Error::other("disk full")));
            }
            self.wallpapers.push(bitmap.clone());
            Ok(())
        }
    }

    impl DisplayService for MockPlatform {
        fn display_size(&self) -> (u32, u32) {
            (40, 24)
        }
    }

    impl NoticeService for MockPlatform {
        fn notify(&mut self, message: &str) {
            self.notices.push(message.to_string());
        }
    }

    const BUILTINS: [&str; 4] = ["#FF0000", "#00FF00", "#0000FF", "#000000"];

    fn controller() -> PaletteController<MemoryPrefs, MockPlatform> {
        let builtins = BUILTINS.iter().map(|s| s.to_string()).collect();
        let store = ColorStore::open(MemoryPrefs::new(PREFS_NAMESPACE), builtins);
        PaletteController::new(store, MockPlatform::default(), Strings::default())
            .with_solid_size(8)
    }

    fn last_notice(c: &PaletteController<MemoryPrefs, MockPlatform>) -> &str {
        c.platform().notices.last().map(String::as_str).unwrap_or("")
    }

    #[test]
    fn starts_in_browse() {
        let c = controller();
        assert_eq!(c.mode(), Mode::Browse);
        assert_eq!(c.palette().len(), 4);
        assert!(!c.can_apply_gradient());
    }

    #[test]
    fn tap_sets_solid_wallpaper() {
        let mut c = controller();
        assert_eq!(c.tap(0), Outcome::WallpaperSet);
        let wp = &c.platform().wallpapers[0];
        assert_eq!((wp.width(), wp.height()), (8, 8));
        assert!(wp.pixels().iter().all(|&p| p == 0xFFFF_0000));
        assert_eq!(last_notice(&c), Strings::default().wallpaper_set_to_color);
    }

    #[test]
    fn tap_out_of_range_ignored() {
        let mut c = controller();
        assert_eq!(c.tap(99), Outcome::Ignored);
        assert!(c.platform().wallpapers.is_empty());
    }

    #[test]
    fn wallpaper_failure_is_reported_not_fatal() {
        let mut c = controller();
        c.platform.fail = true;
        assert_eq!(c.tap(1), Outcome::WallpaperFailed);
        assert_eq!(last_notice(&c), Strings::default().wallpaper_failed);
        assert_eq!(c.mode(), Mode::Browse);
    }

    #[test]
    fn long_press_enters_multiselect() {
        let mut c = controller();
        assert_eq!(c.long_press(1), Outcome::SelectionChanged(1));
        assert_eq!(c.mode(), Mode::MultiSelect);
        assert!(c.is_checked_at(1));
        assert_eq!(c.selection_title(), "1 color selected");
        assert!(!c.can_apply_gradient());
    }

    #[test]
    fn tap_in_multiselect_toggles_check() {
        let mut c = controller();
        c.long_press(0);
        assert_eq!(c.tap(2), Outcome::SelectionChanged(2));
        assert_eq!(c.selection_title(), "2 colors selected");
        assert!(c.can_apply_gradient());
        assert_eq!(c.tap(2), Outcome::SelectionChanged(1));
        assert!(c.platform().wallpapers.is_empty());
    }

    #[test]
    fn unchecking_last_ends_mode() {
        let mut c = controller();
        c.long_press(0);
        assert_eq!(c.set_checked(0, false), Outcome::SelectionEnded);
        assert_eq!(c.mode(), Mode::Browse);
        assert!(c.selection().is_empty());
    }

    #[test]
    fn set_checked_in_browse_ignored() {
        let mut c = controller();
        assert_eq!(c.set_checked(0, true), Outcome::Ignored);
        assert!(c.selection().is_empty());
    }

    #[test]
    fn apply_gradient_sets_wallpaper_and_ends_mode() {
        let mut c = controller();
        c.long_press(3);
        c.tap(0);
        assert_eq!(c.apply_gradient(), Outcome::WallpaperSet);
        assert_eq!(c.mode(), Mode::Browse);
        assert!(c.selection().is_empty());

        let wp = &c.platform().wallpapers[0];
        // Display is 40x24: half the smaller side.
        assert_eq!((wp.width(), wp.height()), (12, 12));
        // Check order is stop order: black at top-left, red at bottom-right.
        let tl = wp.pixel(0, 0).unwrap();
        let br = wp.pixel(11, 11).unwrap();
        assert!((tl >> 16) & 0xFF < 0x20);
        assert!((br >> 16) & 0xFF > 0xE0);
        assert_eq!(last_notice(&c), Strings::default().wallpaper_set_to_gradient);
    }

    #[test]
    fn apply_gradient_needs_two_colors() {
        let mut c = controller();
        assert_eq!(c.apply_gradient(), Outcome::Ignored);
        c.long_press(0);
        assert_eq!(c.apply_gradient(), Outcome::Ignored);
        assert_eq!(c.mode(), Mode::MultiSelect);
    }

    #[test]
    fn apply_gradient_failure_still_ends_mode() {
        let mut c = controller();
        c.long_press(0);
        c.tap(1);
        c.platform.fail = true;
        assert_eq!(c.apply_gradient(), Outcome::WallpaperFailed);
        assert_eq!(c.mode(), Mode::Browse);
    }

    #[test]
    fn end_selection_clears() {
        let mut c = controller();
        c.long_press(0);
        c.tap(1);
        assert_eq!(c.end_selection(), Outcome::SelectionEnded);
        assert!(c.selection().is_empty());
        assert_eq!(c.end_selection(), Outcome::Ignored);
    }

    #[test]
    fn star_toggles_favorite() {
        let mut c = controller();
        assert_eq!(c.toggle_favorite(2), Outcome::FavoriteAdded);
        assert_eq!(c.palette()[0], "#0000FF");
        assert!(c.is_favorite_at(0));
        assert_eq!(last_notice(&c), Strings::default().fav_added);
        assert_eq!(c.toggle_favorite(0), Outcome::FavoriteRemoved);
        assert!(!c.is_favorite_at(0));
        assert_eq!(c.palette(), BUILTINS.to_vec());
    }

    #[test]
    fn star_ignored_during_selection() {
        let mut c = controller();
        c.long_press(0);
        assert_eq!(c.toggle_favorite(1), Outcome::Ignored);
        assert!(c.store().favorites().is_empty());
    }

    #[test]
    fn add_dialog_flow() {
        let mut c = controller();
        assert_eq!(c.confirm_add("red"), Outcome::Ignored);
        assert_eq!(c.open_add_dialog(), Outcome::DialogOpened);
        assert!(c.is_dialog_open());
        assert_eq!(c.confirm_add("red"), Outcome::FavoriteAdded);
        assert!(!c.is_dialog_open());
        assert_eq!(c.palette()[0], "RED");
        assert_eq!(c.palette().len(), 5);
    }

    #[test]
    fn add_invalid_keeps_palette() {
        let mut c = controller();
        let before = c.palette();
        c.open_add_dialog();
        assert_eq!(c.confirm_add("bogus"), Outcome::InvalidColor);
        assert_eq!(c.palette(), before);
        assert_eq!(last_notice(&c), Strings::default().invalid_color);
    }

    #[test]
    fn add_empty_closes_silently() {
        let mut c = controller();
        c.open_add_dialog();
        assert_eq!(c.confirm_add(""), Outcome::DialogClosed);
        assert!(c.platform().notices.is_empty());
    }

    #[test]
    fn add_existing_reports_already_present() {
        let mut c = controller();
        c.open_add_dialog();
        c.confirm_add("navy");
        c.open_add_dialog();
        assert_eq!(c.confirm_add("NAVY"), Outcome::AlreadyFavorite);
        assert_eq!(c.store().favorites().len(), 1);
    }

    #[test]
    fn cancel_add() {
        let mut c = controller();
        assert_eq!(c.cancel_add(), Outcome::Ignored);
        c.open_add_dialog();
        assert_eq!(c.cancel_add(), Outcome::DialogClosed);
        assert!(c.store().favorites().is_empty());
    }

    #[test]
    fn favoriting_builtin_keeps_selection_in_palette() {
        let mut c = controller();
        c.open_add_dialog();
        c.confirm_add("#00FF00");
        c.long_press(0);
        c.tap(3);
        let palette = c.palette();
        for s in c.selection() {
            assert!(palette.contains(s));
        }
    }

    #[test]
    fn preview_uses_thumbnail_size() {
        let c = controller();
        let bmp = c.preview(0, 100).unwrap();
        assert_eq!((bmp.width(), bmp.height()), (90, 90));
        assert!(c.preview(99, 100).is_none());
    }
}
