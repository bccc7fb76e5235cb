// Configuration Storage Service
// Handles config file read/write, version backup and environment overrides

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::AnalysisSettings;
use crate::services::detection::sensitivity::{is_valid_sensitivity, MAX_SENSITIVITY};

const CONFIG_VERSION: &str = "2.0.0";
const KEEP_BACKUPS: usize = 10;

pub const ENV_MODE: &str = "DEEPSHIELD_ENV";
pub const ENV_SENSITIVITY: &str = "DEEPSHIELD_SENSITIVITY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config {path}: {message}")]
    Invalid { path: PathBuf, message: String },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: String,
    /// Defaults applied before per-request settings.
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub limits: RequestLimits,
    /// Exposes internal error details in responses.
    #[serde(default)]
    pub development: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            analysis: AnalysisSettings::default(),
            limits: RequestLimits::default(),
            development: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestLimits {
    #[serde(default = "default_min_text_chars")]
    pub min_text_chars: usize,
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
    #[serde(default = "default_max_batch_items")]
    pub max_batch_items: usize,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            min_text_chars: default_min_text_chars(),
            max_text_chars: default_max_text_chars(),
            max_batch_items: default_max_batch_items(),
        }
    }
}

fn default_version() -> String { CONFIG_VERSION.to_string() }
fn default_min_text_chars() -> usize { 10 }
fn default_max_text_chars() -> usize { 50_000 }
fn default_max_batch_items() -> usize { 10 }

impl AppConfig {
    /// Apply `DEEPSHIELD_ENV` and `DEEPSHIELD_SENSITIVITY` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Same as [`with_env_overrides`](Self::with_env_overrides) with an injectable lookup.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup(ENV_MODE) {
            self.development = mode.trim().eq_ignore_ascii_case("development");
        }

        if let Some(raw) = lookup(ENV_SENSITIVITY) {
            match raw.trim().parse::<u32>() {
                Ok(value) if value <= MAX_SENSITIVITY => self.analysis.sensitivity = value,
                _ => warn!(value = %raw, "Ignoring invalid {}", ENV_SENSITIVITY),
            }
        }

        self
    }
}

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join("config.json");
        Self { config_dir, config_file }
    }

    /// Get default config directory
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("deepshield"))
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Ensure config directory exists
    pub fn ensure_dir(&self) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.config_dir).map_err(|source| ConfigError::Io {
            path: self.config_dir.clone(),
            source,
        })
    }

    /// Load configuration from file; a missing file yields defaults.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        load_config_file(&self.config_file)
    }

    /// Save configuration to file
    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        self.ensure_dir()?;

        if self.config_file.exists() {
            self.create_backup()?;
        }

        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_file, content).map_err(|source| ConfigError::Io {
            path: self.config_file.clone(),
            source,
        })?;
        info!(path = %self.config_file.display(), "config.saved");
        Ok(())
    }

    fn create_backup(&self) -> Result<(), ConfigError> {
        let backup_dir = self.config_dir.join("backups");
        fs::create_dir_all(&backup_dir).map_err(|source| ConfigError::Io {
            path: backup_dir.clone(),
            source,
        })?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S%3f");
        let backup_file = backup_dir.join(format!("config_{}.json", timestamp));

        fs::copy(&self.config_file, &backup_file).map_err(|source| ConfigError::Io {
            path: backup_file.clone(),
            source,
        })?;

        cleanup_old_backups(&backup_dir, KEEP_BACKUPS)
    }
}

/// Read a config file from an explicit path; a missing file yields defaults.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config: AppConfig = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let sensitivity = config.analysis.sensitivity;
    if !is_valid_sensitivity(i64::from(sensitivity)) {
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            message: format!("analysis.sensitivity must be between 0 and {} (got {})", MAX_SENSITIVITY, sensitivity),
        });
    }

    Ok(config)
}

/// Remove old backups, keeping only the most recent N
fn cleanup_old_backups(backup_dir: &Path, keep: usize) -> Result<(), ConfigError> {
    let mut entries: Vec<_> = fs::read_dir(backup_dir)
        .map_err(|source| ConfigError::Io {
            path: backup_dir.to_path_buf(),
            source,
        })?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map_or(false, |ext| ext == "json"))
        .collect();

    if entries.len() <= keep {
        return Ok(());
    }

    // Backup names embed the timestamp, so name order is age order.
    entries.sort_by_key(|e| e.file_name());

    let remove_count = entries.len() - keep;
    for entry in entries.iter().take(remove_count) {
        let _ = fs::remove_file(entry.path());
    }

    Ok(())
}
