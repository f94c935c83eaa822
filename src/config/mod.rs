//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Display-name lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// When false, names are never looked up and show as "Unknown"
    #[serde(default = "default_identity_enabled")]
    pub enabled: bool,

    /// Profile endpoint; the entity id is appended as the last path segment
    #[serde(default = "default_identity_base_url")]
    pub base_url: String,

    /// Timeout in seconds for a single lookup
    #[serde(default = "default_identity_timeout")]
    pub timeout_seconds: u64,
}

fn default_identity_enabled() -> bool {
    true
}

fn default_identity_base_url() -> String {
    "https://sessionserver.mojang.com/session/minecraft/profile".to_string()
}

fn default_identity_timeout() -> u64 {
    5
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            enabled: default_identity_enabled(),
            base_url: default_identity_base_url(),
            timeout_seconds: default_identity_timeout(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    /// Directory of static site files served for non-API paths
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
            static_dir: None,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub identity: IdentityConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            server: ServerConfig::default(),
            identity: IdentityConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.identity.enabled {
            if self.identity.timeout_seconds == 0 {
                return Err(ConfigError::ValidationError(
                    "Identity timeout must be greater than 0".to_string(),
                ));
            }

            if let Err(e) = url::Url::parse(&self.identity.base_url) {
                return Err(ConfigError::ValidationError(format!(
                    "Identity base_url is not a valid URL: {}",
                    e
                )));
            }
        }

        Ok(())
    }
}
