//! Configuration - YAML file under the home directory plus CLI overrides
//!
//! Precedence: CLI flag > config file > built-in default. A missing config
//! file is not an error; a malformed one is.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_DIR: &str = ".fraudwatch";
const CONFIG_FILE: &str = "config.yml";

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_refresh_secs() -> u64 {
    30
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_recent_limit() -> usize {
    10
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the monitoring backend
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Seconds between automatic refreshes of the active view
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Row cap for the recent-transactions panel on the transfer form
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            refresh_secs: default_refresh_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            recent_limit: default_recent_limit(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR)
            .join(CONFIG_FILE)
    }

    /// Load from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("malformed config: {}", path.display()))?;
        Ok(config)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/fraudwatch.yml")).unwrap();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.refresh_secs, 30);
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_the_rest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: http://fraud.internal:8080").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.base_url, "http://fraud.internal:8080");
        assert_eq!(config.refresh_secs, 30);
        assert_eq!(config.recent_limit, 10);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "refresh_secs: [not a number").unwrap();

        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn test_refresh_interval_floor() {
        let config = Config {
            refresh_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.refresh_interval(), Duration::from_secs(1));
    }
}
