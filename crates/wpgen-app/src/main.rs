//! WPGen desktop entry point.
//!
//! Shows the color palette (favorites first, then builtins) at a command
//! prompt. `tap` sets a solid wallpaper, `hold` starts picking colors for a
//! diagonal gradient, `star` and `add` manage favorites. Type `help` for the
//! full list.

mod commands;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};

use commands::{CommandRegistry, register_builtins};
use wpgen_core::config::WpGenConfig;
use wpgen_core::palette::default_builtins;
use wpgen_core::platform::DesktopPlatform;
use wpgen_core::prefs::FilePrefs;
use wpgen_core::store::PREFS_NAMESPACE;
use wpgen_core::{ColorStore, PaletteController};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Resolve config from CLI arg, WPGEN_CONFIG env var, or the working directory.
    let config_path: PathBuf = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("WPGEN_CONFIG").ok())
        .unwrap_or_else(|| "wpgen.toml".to_string())
        .into();
    let config = WpGenConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    log::info!(
        "Starting WPGen ({}x{} display)",
        config.display.width,
        config.display.height,
    );

    let prefs = FilePrefs::open(&config.prefs_dir, PREFS_NAMESPACE)?;
    let builtins = config
        .palette
        .colors
        .clone()
        .unwrap_or_else(default_builtins);
    let store = ColorStore::open(prefs, builtins);
    log::info!(
        "Palette: {} favorites, {} builtins",
        store.favorites().len(),
        store.builtins().len()
    );

    let platform = DesktopPlatform::from_config(&config);
    log::info!("Wallpaper output: {}", platform.output_path().display());

    let mut controller = PaletteController::new(store, platform, config.strings.clone())
        .with_solid_size(config.wallpaper.solid_size);

    let mut registry = CommandRegistry::new();
    register_builtins(&mut registry);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    session::run(&mut controller, &registry, stdin.lock(), &mut stdout)?;

    log::info!("WPGen shut down cleanly");
    Ok(())
}
