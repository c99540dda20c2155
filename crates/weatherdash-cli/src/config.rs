//! Configuration file management.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use weatherdash_core::TimeRange;
use weatherdash_core::client::DEFAULT_TIMEOUT;

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Station base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Initial time range for the dashboard and `series`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<TimeRange>,

    /// Use Fahrenheit for temperature
    #[serde(default)]
    pub fahrenheit: bool,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,

    /// Theme preference: "dark" or "light"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl Config {
    /// Get the default config file path
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("weatherdash")
            .join("config.toml")
    }

    /// Load config from `path`, or return default if it is missing or invalid
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

/// Resolve the station URL from arg/env var, then config.
pub fn resolve_url(url: Option<String>, config: &Config) -> Option<String> {
    url.filter(|u| !u.trim().is_empty())
        .or_else(|| config.url.clone())
}

/// Like [`resolve_url`], failing with guidance when nothing is configured.
pub fn require_url(url: Option<String>, config: &Config) -> Result<String> {
    resolve_url(url, config).ok_or_else(|| {
        anyhow::anyhow!(
            "No station URL configured. Use --url <URL>, set WEATHERDASH_URL, or run \
             'weatherdash config set url <URL>'."
        )
    })
}

/// Resolve timeout: use provided value, fall back to config, then the loader default.
/// A zero from a hand-edited config file is ignored.
pub fn resolve_timeout(timeout_secs: Option<u64>, config: &Config) -> Duration {
    timeout_secs
        .or(config.timeout)
        .filter(|&secs| secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT)
}

/// Resolve range: use provided value, fall back to config, then last hour
pub fn resolve_range(range: Option<TimeRange>, config: &Config) -> TimeRange {
    range.or(config.range).unwrap_or_default()
}
