//! Configuration system using TOML files.
//!
//! The default config lives in the OS-standard config directory:
//! - Windows: %APPDATA%\song-info\config.toml
//! - macOS: ~/Library/Application Support/song-info/config.toml
//! - Linux: ~/.config/song-info/config.toml
//!
//! Every field is optional. A missing or broken default file falls back to
//! built-in defaults; a file named explicitly on the command line must load.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::metadata::ArtistSource;
use crate::render::Layout;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory scan settings
    pub scan: ScanConfig,

    /// Tag field selection
    pub tags: TagConfig,

    /// Output rendering
    pub output: OutputConfig,
}

/// Directory scan settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Extensions whose read failures end up in the failure list
    pub tracked_extensions: Vec<String>,

    /// Follow symbolic links while walking
    pub follow_links: bool,

    /// Read tags on a worker pool
    pub parallel: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            tracked_extensions: vec!["mp3".to_string()],
            follow_links: false,
            parallel: false,
        }
    }
}

/// Tag field selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    pub artist_source: ArtistSource,
}

/// Output rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Shape of the directory report
    pub layout: Layout,

    /// Text shown for absent fields in the single-file summary
    pub missing: String,

    /// JSON indent width (0 = compact)
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            missing: "unknown".to_string(),
            indent: 4,
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("song-info"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            tracing::warn!("Using default configuration");
            Config::default()
        }
    }
}

/// Load configuration from an explicit file
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    let config =
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),
}

// ============================================================================
// Tests
// ============================================================================
