//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\book-minder\config.toml
//! - macOS: ~/Library/Application Support/book-minder/config.toml
//! - Linux: ~/.config/book-minder/config.toml
//!
//! The config file is human-readable and editable. Every section is
//! optional; missing values fall back to defaults. API keys given on the
//! command line or through the environment override the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials (keep separate for potential future encryption)
    pub credentials: Credentials,

    /// External service settings
    pub sources: SourcesConfig,

    /// Library settings
    pub library: LibraryConfig,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Google Books API key (optional; raises the daily quota)
    pub google_books_api_key: Option<String>,

    /// LibreTranslate API key (required by public instances)
    pub translate_api_key: Option<String>,
}

/// External service endpoints and limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub google_books_url: String,
    pub open_library_url: String,
    pub translate_url: String,

    /// Timeout for each HTTP request
    pub request_timeout_secs: u64,

    /// Deadline for a whole enrichment (lookups, author, translation)
    pub enrich_timeout_secs: u64,

    /// Translate descriptions written in a language other than the book's
    pub translate_descriptions: bool,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            google_books_url: crate::enrichment::googlebooks::DEFAULT_BASE_URL.to_string(),
            open_library_url: crate::enrichment::openlibrary::DEFAULT_BASE_URL.to_string(),
            translate_url: crate::enrichment::translate::DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 10,
            enrich_timeout_secs: 60,
            translate_descriptions: true,
        }
    }
}

impl SourcesConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn enrich_timeout(&self) -> Duration {
        Duration::from_secs(self.enrich_timeout_secs.max(1))
    }
}

/// Library management settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Database file (default: book_minder.db in the working directory)
    pub database: Option<PathBuf>,

    /// How many ISBNs a bulk import enriches at once
    pub import_concurrency: usize,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            database: None,
            import_concurrency: 4,
        }
    }
}

impl Config {
    /// Override credentials with explicitly supplied keys (CLI flags or env).
    ///
    /// Blank values are ignored.
    pub fn with_credentials(
        mut self,
        google_books_api_key: Option<String>,
        translate_api_key: Option<String>,
    ) -> Self {
        if let Some(key) = google_books_api_key.filter(|k| !k.trim().is_empty()) {
            self.credentials.google_books_api_key = Some(key);
        }
        if let Some(key) = translate_api_key.filter(|k| !k.trim().is_empty()) {
            self.credentials.translate_api_key = Some(key);
        }
        self
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("book-minder"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    load_from(&path)
}

/// Load configuration from a specific file, with the same fallbacks as [`load`].
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to the OS config directory
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    Ok(path)
}

/// Save configuration to a specific file
///
/// Creates the parent directory if it doesn't exist.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    // Serialize to pretty TOML
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
