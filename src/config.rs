use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::models::DEFAULT_LANGUAGE;
use crate::core::update::{DEFAULT_RELEASE_URL, DEFAULT_TIMEOUT};

/// Overrides `data.data_dir`.
pub const DATA_DIR_ENV: &str = "ARCDEX_DATA_DIR";
/// Any non-empty value other than `0`/`false` disables the version check.
pub const NO_UPDATE_CHECK_ENV: &str = "ARCDEX_NO_UPDATE_CHECK";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub update: UpdateConfig,
}

/// Data root and record cache configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
    /// Override the default cache file location.
    pub cache_file: Option<PathBuf>,
    /// Reuse the record cache when it is newer than every data file.
    pub use_cache: bool,
    /// Preferred language for display names.
    pub language: String,
}

/// Release feed version check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateConfig {
    pub enabled: bool,
    pub release_url: String,
    pub timeout_ms: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            cache_file: None,
            use_cache: true,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            release_url: DEFAULT_RELEASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
        }
    }
}

impl UpdateConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/arcdex/config.toml`, then apply
    /// environment overrides.
    pub fn load() -> Self {
        let mut config = Self::load_from(&Self::config_path());
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Returns `Default` if the file is missing or unparseable.
    pub fn load_from(config_path: &Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}; using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}; using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Apply `ARCDEX_*` overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            self.data.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(flag) = lookup(NO_UPDATE_CHECK_ENV) {
            let flag = flag.trim().to_lowercase();
            if !flag.is_empty() && flag != "0" && flag != "false" {
                self.update.enabled = false;
            }
        }
    }

    /// Resolved data directory (override or platform default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .map(|d| d.join("arcdex").join("data"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    /// Resolved cache file, or `None` when caching is disabled.
    pub fn cache_file(&self) -> Option<PathBuf> {
        if !self.data.use_cache {
            return None;
        }
        Some(self.data.cache_file.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .map(|d| d.join("arcdex").join("records.json"))
                .unwrap_or_else(|| PathBuf::from("records.json"))
        }))
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("arcdex").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
