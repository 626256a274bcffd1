//! Platform service traits and desktop implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use wpgen_types::bitmap::Bitmap;
use wpgen_types::config::WpGenConfig;
use wpgen_types::error::{Result, WpGenError};

// ---------------------------------------------------------------------------
// Wallpaper service
// ---------------------------------------------------------------------------

/// Abstraction over the host's wallpaper-setting API.
pub trait WallpaperService {
    /// Replace the current wallpaper with a fully rendered bitmap.
    fn set_wallpaper(&mut self, bitmap: &Bitmap) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Display service
// ---------------------------------------------------------------------------

/// Abstraction over display metrics.
pub trait DisplayService {
    /// Display `(width, height)` in pixels.
    fn display_size(&self) -> (u32, u32);
}

// ---------------------------------------------------------------------------
// Notice service
// ---------------------------------------------------------------------------

/// Short, transient user-facing messages.
pub trait NoticeService {
    fn notify(&mut self, message: &str);
}

// ---------------------------------------------------------------------------
// Unified platform trait
// ---------------------------------------------------------------------------

/// Aggregate trait providing access to all platform services.
pub trait Platform: WallpaperService + DisplayService + NoticeService {}

impl<T: WallpaperService + DisplayService + NoticeService> Platform for T {}

// ---------------------------------------------------------------------------
// Desktop implementation
// ---------------------------------------------------------------------------

/// Desktop platform: wallpapers become PNG files, optionally handed to an
/// external setter command; notices go to stdout.
pub struct DesktopPlatform {
    output_path: PathBuf,
    apply_command: Vec<String>,
    display: (u32, u32),
    quiet: bool,
}

impl DesktopPlatform {
    pub fn new(output_path: impl Into<PathBuf>, display: (u32, u32)) -> Self {
        Self {
            output_path: output_path.into(),
            apply_command: Vec::new(),
            display,
            quiet: false,
        }
    }

    pub fn from_config(config: &WpGenConfig) -> Self {
        let mut platform = Self::new(
            config.wallpaper.output_path.clone(),
            (config.display.width, config.display.height),
        );
        platform.apply_command = config.wallpaper.apply_command.clone();
        platform
    }

    /// Run `program args.. <png path>` after each wallpaper write.
    pub fn with_apply_command(mut self, command: Vec<String>) -> Self {
        self.apply_command = command;
        self
    }

    /// Suppress stdout notices (they are still logged).
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn run_apply_command(&self) -> Result<()> {
        let Some((program, args)) = self.apply_command.split_first() else {
            return Ok(());
        };
        log::debug!("Running {program} {args:?} {}", self.output_path.display());
        let status = Command::new(program)
            .args(args)
            .arg(&self.output_path)
            .status()
            .map_err(|e| WpGenError::Platform(format!("cannot run {program}: {e}")))?;
        if !status.success() {
            return Err(WpGenError::Platform(format!("{program} exited with {status}")));
        }
        Ok(())
    }
}

impl WallpaperService for DesktopPlatform {
    fn set_wallpaper(&mut self, bitmap: &Bitmap) -> Result<()> {
        let data = bitmap.encode_png()?;
        if let Some(parent) = self.output_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.output_path, data)?;
        log::info!(
            "Wrote {}x{} wallpaper to {}",
            bitmap.width(),
            bitmap.height(),
            self.output_path.display()
        );
        self.run_apply_command()
    }
}

impl DisplayService for DesktopPlatform {
    fn display_size(&self) -> (u32, u32) {
        self.display
    }
}

impl NoticeService for DesktopPlatform {
    fn notify(&mut self, message: &str) {
        log::info!("Notice: {message}");
        if !self.quiet {
            println!("{message}");
        }
    }
}

// ---------------------------------------------------------------------------
// In-module tests
// ---------------------------------------------------------------------------
