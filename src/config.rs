//! Configuration management for the news client.
//!
//! Handles loading and saving configuration from JSONC files.
//! Manages the backend location, request timeout and log file.

use anyhow::{Context, Result};
use dirs::{config_dir, data_local_dir};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "news-decoded";

/// Application configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the stories backend (without `/api/...`)
    pub api_base_url: String,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
    /// Log file path (relative to the data dir or absolute)
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 30,
            log_file: "news-decoded.log".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    ///
    /// # Details
    /// Searches for config file in:
    /// 1. Provided path (if given)
    /// 2. `$XDG_CONFIG_HOME/news-decoded/config.jsonc`
    /// 3. `~/.config/news-decoded/config.jsonc`
    ///
    /// If no config file exists, returns default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            Self::default_config_path()?
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = serde_json::from_str(&strip_line_comments(&content))
            .with_context(|| "Failed to deserialize config")?;

        Ok(config)
    }

    /// Save configuration to file.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    ///
    /// # Details
    /// Creates config directory if it doesn't exist.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            Self::default_config_path()?
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, json)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    /// Get default configuration file path.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path to config file or error
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir =
            config_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine config directory"))?;
        Ok(config_dir.join(APP_DIR).join("config.jsonc"))
    }

    /// Get log file path.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path to log file or error
    ///
    /// # Details
    /// If log_file is absolute, returns it as-is.
    /// Otherwise, returns path under `<data dir>/news-decoded/logs/`.
    pub fn log_file_path(&self) -> Result<PathBuf> {
        let log_file = Path::new(&self.log_file);
        if log_file.is_absolute() {
            Ok(log_file.to_path_buf())
        } else {
            let data_dir = data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Failed to determine data directory"))?;
            Ok(data_dir.join(APP_DIR).join("logs").join(log_file))
        }
    }
}

/// Strip `//` line comments that are not inside a string.
///
/// Quote counting is simplified and does not handle escaped quotes.
fn strip_line_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            let mut search_from = 0;
            while let Some(offset) = line[search_from..].find("//") {
                let comment_pos = search_from + offset;
                let quote_count = line[..comment_pos].matches('"').count();
                if quote_count % 2 == 0 {
                    return line[..comment_pos].trim_end();
                }
                search_from = comment_pos + 2;
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
