// Configuration File Support
//
// This module provides configuration file parsing for enchlimit.
// Supports TOML format with environment variable overrides.
// Configuration files are loaded from XDG config directory: ~/.config/enchlimit/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the limits file when `[store] path` is not set
pub const DEFAULT_LIMITS_FILE: &str = "limits.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Limit store configuration
    pub store: StoreConfig,

    /// Text command configuration
    pub command: CommandConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

/// Limit store configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the limits file; defaults to `limits.toml` next to the config file
    pub path: Option<PathBuf>,
}

/// Text command configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CommandConfig {
    /// Command label shown in usage messages
    pub label: String,

    /// Permission node required of players
    pub permission: String,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            label: "enchlimit".to_string(),
            permission: "enchlimit.admin".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default XDG config directory
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    /// If the config file does not exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    ///
    /// A relative `[store] path` is resolved against the config file's
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed, or if
    /// the resulting configuration is invalid.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file from {:?}", path))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file from {:?}", path))?;
            tracing::info!("Loaded configuration from {:?}", path);
            config
        } else {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            Self::default()
        };

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.store.path = Some(match config.store.path.take() {
            Some(p) if p.is_relative() => base.join(p),
            Some(p) => p,
            None => base.join(DEFAULT_LIMITS_FILE),
        });

        let config = config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path
    ///
    /// Returns `~/.config/enchlimit/config.toml` on Linux
    pub fn config_path() -> PathBuf {
        if let Some(proj_dirs) = directories::ProjectDirs::from("com", "enchlimit", "EnchLimit") {
            proj_dirs.config_dir().join("config.toml")
        } else {
            // Fallback if XDG dirs cannot be determined
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home)
                .join(".config")
                .join("enchlimit")
                .join("config.toml")
        }
    }

    /// Location of the limits file
    pub fn limits_path(&self) -> PathBuf {
        self.store
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LIMITS_FILE))
    }

    /// Apply environment variable overrides to the configuration
    ///
    /// Environment variables take precedence over config file values:
    /// - ENCHLIMIT_LOG_LEVEL
    /// - ENCHLIMIT_LOG_FORMAT
    /// - ENCHLIMIT_STORE_PATH
    /// - ENCHLIMIT_PERMISSION
    fn apply_env_overrides(mut self) -> Self {
        if let Ok(level) = std::env::var("ENCHLIMIT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("ENCHLIMIT_LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Ok(path) = std::env::var("ENCHLIMIT_STORE_PATH") {
            if !path.is_empty() {
                self.store.path = Some(PathBuf::from(path));
            }
        }
        if let Ok(permission) = std::env::var("ENCHLIMIT_PERMISSION") {
            self.command.permission = permission;
        }
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            ),
        }

        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" | "compact" => {}
            _ => anyhow::bail!(
                "Invalid log format: {}. Must be one of: json, pretty, compact",
                self.logging.format
            ),
        }

        if self.command.label.trim().is_empty() {
            anyhow::bail!("Command label must not be empty");
        }
        if self.command.permission.trim().is_empty() {
            anyhow::bail!("Command permission must not be empty");
        }

        Ok(())
    }

    /// Convert log level string to tracing::Level
    pub fn log_level(&self) -> Result<tracing::Level> {
        self.logging
            .level
            .to_lowercase()
            .parse()
            .map_err(|e| anyhow::anyhow!("Failed to parse log level: {}", e))
    }
}
