//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.
//! Every section is `#[serde(default)]`, so a partial `settings.toml` only
//! overrides the keys it names.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::feedback::Mode;

// ---------------------------------------------------------------------------
// FeedbackConfig
// ---------------------------------------------------------------------------

/// Settings for the local feedback pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Seed for score jitter.  `None` draws fresh jitter on every analysis.
    pub seed: Option<u64>,
    /// Mode preselected in the practice window.
    pub default_mode: Mode,
    /// Force the grammar-rule table on (or off) for every mode.  `None`
    /// keeps the per-mode default (on for writing only).
    pub detailed: Option<bool>,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            seed: None,
            default_mode: Mode::Speaking,
            detailed: None,
        }
    }
}

// ---------------------------------------------------------------------------
// ApiConfig
// ---------------------------------------------------------------------------

/// Settings for the remote feedback API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// When `false` only the local pipeline is used.
    pub enabled: bool,
    /// Base URL of an OpenAI-compatible endpoint
    /// (e.g. `http://localhost:11434` for Ollama).
    pub base_url: String,
    /// API key — `None` for local providers.
    pub api_key: Option<String>,
    /// Model identifier sent to the API.
    pub model: String,
    /// Sampling temperature (0.0 – 1.0).
    pub temperature: f32,
    /// Maximum seconds to wait for a response before falling back.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "http://localhost:11434".into(),
            api_key: None,
            model: "qwen2.5:3b".into(),
            temperature: 0.2,
            timeout_secs: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechConfig
// ---------------------------------------------------------------------------

/// Settings for the speech adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// BCP-47 recognition language.
    pub language: String,
    /// How many times a listening session restarts after a recoverable
    /// recognizer error before giving up.
    pub max_restarts: u32,
    /// Read the first suggestion aloud after each analysis.
    pub read_aloud: bool,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            language: "en-US".into(),
            max_restarts: 3,
            read_aloud: false,
        }
    }
}

// ---------------------------------------------------------------------------
// StoreConfig
// ---------------------------------------------------------------------------

/// Settings for the practice record store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Override for the records file.  `None` uses [`AppPaths::records_file`].
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| AppPaths::new().records_file)
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Practice window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Last saved window position `(x, y)` in screen pixels.
    pub window_position: Option<(f32, f32)>,
    /// Initial window size `(width, height)`.
    pub window_size: (f32, f32),
    /// Show the raw transcript while a listening session is running.
    pub show_transcript: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_position: None,
            window_size: (520.0, 640.0),
            show_transcript: true,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use english_coach::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub feedback: FeedbackConfig,
    pub api: ApiConfig,
    pub speech: SpeechConfig,
    pub store: StoreConfig,
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
