// Configuration loading and parsing (config/app.toml).

use serde::Deserialize;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::export::ExportFormat;

const APP_CONFIG: &str = "app.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// The assembled application config.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub team: TeamConfig,
    pub champions: ChampionsConfig,
    pub export: ExportConfig,
    pub database: DatabaseConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamConfig {
    /// Fixed RNG seed. When unset, shuffles draw from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChampionsConfig {
    /// File path or http(s) URL of the newline-delimited champion list.
    pub source: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Where saved teams are written. Empty means the user's download
    /// directory.
    #[serde(default)]
    pub directory: String,
    #[serde(default)]
    pub format: ExportFormat,
    /// chrono format string for the `date` field.
    pub date_format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// How long a notification stays on screen.
    pub notification_ms: u64,
}

impl ExportConfig {
    /// Resolve the export directory: the configured one, else the user's
    /// download directory, else `./exports`.
    pub fn resolved_directory(&self) -> PathBuf {
        let configured = self.directory.trim();
        if !configured.is_empty() {
            return PathBuf::from(configured);
        }
        directories::UserDirs::new()
            .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("exports"))
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/app.toml` relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config()` which does.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(APP_CONFIG);
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

/// Seed `config/app.toml` from `defaults/app.toml` on first run.
///
/// An existing `config/app.toml` is never touched. Returns whether a copy was
/// made. Nothing else in `defaults/` is copied.
pub fn ensure_app_config(base_dir: &Path) -> Result<bool, ConfigError> {
    let target = base_dir.join("config").join(APP_CONFIG);
    if target.exists() {
        return Ok(false);
    }

    let default = base_dir.join("defaults").join(APP_CONFIG);
    let content = std::fs::read(&default).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!(
            "no config/{APP_CONFIG} and cannot read {}: {e}",
            default.display()
        ),
    })?;

    let copy_error = |e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("failed to write {}: {e}", target.display()),
    };
    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(copy_error)?;
    }
    // create_new: a config written concurrently since the check wins.
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(mut file) => {
            file.write_all(&content).map_err(copy_error)?;
            info!("Created {} from defaults", target.display());
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(copy_error(e)),
    }
}

/// Load config relative to the current working directory, copying defaults
/// first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_app_config(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let required: &[(&str, &str)] = &[
        ("champions.source", &config.champions.source),
        ("export.date_format", &config.export.date_format),
        ("database.path", &config.database.path),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: field.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    if config.ui.notification_ms == 0 {
        return Err(ConfigError::ValidationError {
            field: "ui.notification_ms".into(),
            message: "must be > 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
