//! Platform-specific directory utilities

use std::path::PathBuf;

/// Get the platform-specific save directory
///
/// Follows platform conventions:
/// - macOS: `~/Library/Application Support/progression/saves`
/// - Linux: `~/.local/share/progression/saves` (or `$XDG_DATA_HOME/progression/saves`)
/// - Windows: `%APPDATA%\progression\saves`
/// - Fallback: `./save_data/saves`
///
/// `SAVE_DATA_DIR` overrides the platform location.
pub fn saves_dir() -> PathBuf {
    match std::env::var_os("SAVE_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => progression_runtime::SessionConfig::default_save_dir(),
    }
}
