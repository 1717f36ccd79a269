//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout:
//!
//! Config dir (settings):
//!   Windows: %APPDATA%\english-coach\
//!   macOS:   ~/Library/Application Support/english-coach/
//!   Linux:   ~/.config/english-coach/
//!
//! Data dir (practice records):
//!   Windows: %LOCALAPPDATA%\english-coach\
//!   macOS:   ~/Library/Application Support/english-coach/
//!   Linux:   ~/.local/share/english-coach/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Full path to `records.json` (users, sessions, rewards).
    pub records_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "english-coach";

    /// Resolves all paths using the `dirs` crate, falling back to the
    /// current directory when the platform has no standard location.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");
        let records_file = data_dir.join("records.json");

        Self {
            settings_file,
            records_file,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
