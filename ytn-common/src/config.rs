//! Configuration loading and resolution
//!
//! Every setting is resolved in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing or unreadable config file never aborts startup; it is logged and
//! the compiled defaults are used instead.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "YTN_CONFIG";

/// Environment variable overriding the annotation server URL
pub const SERVER_URL_ENV_VAR: &str = "YTN_SERVER_URL";

/// Logging section of the TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Contents of `config.toml`
///
/// ```toml
/// server_url = "http://localhost:3000"
/// default_author = "Dana"
/// duration_poll_interval_ms = 1000
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server_url: Option<String>,
    pub default_author: Option<String>,
    pub duration_poll_interval_ms: Option<u64>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Compiled defaults used when nothing else supplies a value
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub server_url: String,
    pub duration_poll_interval_ms: u64,
    pub log_level: String,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:3000".to_string(),
            // Player position/duration refresh once per second
            duration_poll_interval_ms: 1000,
            log_level: default_log_level(),
        }
    }
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_url: String,
    pub default_author: Option<String>,
    pub duration_poll_interval_ms: u64,
    pub log_level: String,
}

/// Load and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Default per-user config file location (`<config dir>/ytn/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ytn").join("config.toml"))
}

/// Resolves settings from CLI arguments, environment, TOML and defaults
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    cli_config_path: Option<PathBuf>,
    cli_server_url: Option<String>,
    cli_author: Option<String>,
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit config file from the command line
    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.cli_config_path = path;
        self
    }

    /// Server URL from the command line
    pub fn with_server_url(mut self, url: Option<String>) -> Self {
        self.cli_server_url = url;
        self
    }

    /// Author name from the command line
    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.cli_author = author;
        self
    }

    /// Locate the config file to read, if any
    pub fn config_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.cli_config_path {
            return Some(path.clone());
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        default_config_path().filter(|p| p.exists())
    }

    /// Read the TOML layer, degrading to an empty config on any failure
    fn toml_layer(&self) -> TomlConfig {
        let Some(path) = self.config_path() else {
            debug!("No config file found, using defaults");
            return TomlConfig::default();
        };

        match load_toml_config(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                TomlConfig::default()
            }
        }
    }

    /// Resolve all settings
    pub fn resolve(&self) -> Settings {
        let defaults = CompiledDefaults::default();
        let toml = self.toml_layer();

        let server_url = self
            .cli_server_url
            .clone()
            .or_else(|| std::env::var(SERVER_URL_ENV_VAR).ok().filter(|s| !s.is_empty()))
            .or(toml.server_url)
            .unwrap_or(defaults.server_url);

        let default_author = self
            .cli_author
            .clone()
            .or(toml.default_author)
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        let duration_poll_interval_ms = match toml.duration_poll_interval_ms {
            Some(0) => {
                warn!("duration_poll_interval_ms must be positive, using default");
                defaults.duration_poll_interval_ms
            }
            Some(ms) => ms,
            None => defaults.duration_poll_interval_ms,
        };

        Settings {
            server_url,
            default_author,
            duration_poll_interval_ms,
            log_level: toml.logging.level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: TomlConfig = toml::from_str(
            r#"
            server_url = "http://review.local:8080"
            default_author = "Dana"
            duration_poll_interval_ms = 500

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.server_url.as_deref(), Some("http://review.local:8080"));
        assert_eq!(config.default_author.as_deref(), Some("Dana"));
        assert_eq!(config.duration_poll_interval_ms, Some(500));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_parse_empty_config_uses_logging_default() {
        let config: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_compiled_defaults() {
        let defaults = CompiledDefaults::default();
        assert_eq!(defaults.server_url, "http://localhost:3000");
        assert_eq!(defaults.duration_poll_interval_ms, 1000);
    }
}
