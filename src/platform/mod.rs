// passkeep platform paths
// Resolves per-user config and data directories through the `dirs` crate.
//
// - Linux:   ~/.config/passkeep, ~/.local/share/passkeep (XDG vars honored)
// - macOS:   ~/Library/Application Support/passkeep
// - Windows: %APPDATA%\passkeep

use std::path::PathBuf;

const APP_DIR: &str = "passkeep";

/// Returns the configuration directory for passkeep.
///
/// Falls back to the current directory when the platform reports no home.
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Returns the data directory for passkeep, where exports land by default.
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
