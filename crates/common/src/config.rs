//! Application configuration.
//!
//! A single [`AppConfig`] value is built at startup and passed explicitly
//! to every component. There is no process-wide mutable configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PhotoboothError, PhotoboothResult};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "PHOTOBOOTH_CONFIG";

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where raw captures and composites are written.
    pub storage: StorageConfig,

    /// Read-only static assets (frames, font).
    pub assets: AssetConfig,

    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Storage roots and public URL layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage root. Raw photos live in `<root>/raw`, composites in
    /// `<root>/composite`.
    pub root: PathBuf,

    /// Scheme and host prepended to public paths, e.g. `http://booth.local:5000`.
    pub public_base_url: String,

    /// URL path under which raw captures are served.
    #[serde(default = "default_raw_url_prefix")]
    pub raw_url_prefix: String,

    /// URL path under which composites are served.
    #[serde(default = "default_composite_url_prefix")]
    pub composite_url_prefix: String,
}

/// Static asset locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Directory of frame overlays, addressed by file name.
    pub frames_dir: PathBuf,

    /// TrueType font used for the date stamp.
    pub font_path: PathBuf,

    /// Date stamp size in pixels.
    #[serde(default = "default_date_font_px")]
    pub date_font_px: f32,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind.
    pub bind: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "photobooth_http=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl StorageConfig {
    /// Directory holding one sub-directory per session.
    pub fn raw_dir(&self) -> PathBuf {
        self.root.join("raw")
    }

    /// Directory holding finished composites.
    pub fn composite_dir(&self) -> PathBuf {
        self.root.join("composite")
    }

    /// Absolute public URL for a composite file name.
    pub fn composite_url(&self, file_name: &str) -> String {
        format!(
            "{}{}/{}",
            self.public_base_url.trim_end_matches('/'),
            normalize_prefix(&self.composite_url_prefix),
            file_name
        )
    }

    /// Site-relative URL for a raw capture.
    pub fn raw_url(&self, session_id: &str, file_name: &str) -> String {
        format!(
            "{}/{}/{}",
            normalize_prefix(&self.raw_url_prefix),
            session_id,
            file_name
        )
    }
}

/// Ensure a leading slash and no trailing slash.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

fn default_raw_url_prefix() -> String {
    "/static/photos/raw".to_string()
}

fn default_composite_url_prefix() -> String {
    "/static/photos/composite".to_string()
}

fn default_date_font_px() -> f32 {
    20.0
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            assets: AssetConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("static").join("photos"),
            public_base_url: "http://127.0.0.1:5000".to_string(),
            raw_url_prefix: default_raw_url_prefix(),
            composite_url_prefix: default_composite_url_prefix(),
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            frames_dir: PathBuf::from("static").join("images"),
            font_path: PathBuf::from("fixtures").join("fonts").join("DejaVuSans.ttf"),
            date_font_px: default_date_font_px(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from `$PHOTOBOOTH_CONFIG` or the standard location,
    /// falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load config from an explicit path. Missing or malformed files are errors.
    pub fn load_from(path: impl AsRef<Path>) -> PhotoboothResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PhotoboothError::not_found(format!("config {} unreadable: {e}", path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            PhotoboothError::invalid_input(format!("config {} malformed: {e}", path.display()))
        })
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(config_file_path())
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), std::io::Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    if let Ok(explicit) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(explicit);
    }
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("photobooth").join("config.json")
}
