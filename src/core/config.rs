//! Application configuration management
//!
//! This module handles loading configuration from TOML files. The upstream
//! API key may also come from the GEMINI_API_KEY environment variable,
//! which takes precedence over the file value. A missing key is not a
//! startup failure: the relay reports it per request instead.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default upstream base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model when the request does not name one
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default server port
const DEFAULT_PORT: u16 = 8080;

/// Default status code reported when the API key is missing
const DEFAULT_MISSING_KEY_STATUS: u16 = 500;

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub default_model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            default_model: default_model(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: String,
    #[serde(default = "default_allowed_headers")]
    pub allowed_headers: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_methods: default_allowed_methods(),
            allowed_headers: default_allowed_headers(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_missing_key_status")]
    pub missing_key_status: u16,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            missing_key_status: default_missing_key_status(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_allowed_methods() -> String {
    "GET, HEAD, POST, OPTIONS".to_string()
}

fn default_allowed_headers() -> String {
    "*".to_string()
}

fn default_missing_key_status() -> u16 {
    DEFAULT_MISSING_KEY_STATUS
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub relay: RelayConfig,
}

/// Application configuration
///
/// Immutable after load and handed to the handler state at construction
/// time, so the relay handler stays a pure function of (request, config).
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream API key; absence is a per-request error, not a startup failure
    pub api_key: Option<String>,

    /// Upstream base URL
    pub base_url: String,

    /// Model used when the request does not name one
    pub default_model: String,

    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Logging level
    pub log_level: String,

    /// Value of the Access-Control-Allow-Methods header
    pub allowed_methods: String,

    /// Value of the Access-Control-Allow-Headers header
    pub allowed_headers: String,

    /// Status code reported when the API key is missing
    pub missing_key_status: u16,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// A missing file is not an error: every setting has a default and the
    /// API key can be supplied through the environment instead.
    ///
    /// # Errors
    ///
    /// Returns error if an existing file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: TomlConfig = if path.as_ref().exists() {
            let content =
                fs::read_to_string(path).context("Failed to read configuration file")?;
            toml::from_str(&content).context("Failed to parse TOML configuration")?
        } else {
            TomlConfig::default()
        };

        Ok(Config {
            api_key: config.gemini.api_key.filter(|key| !key.is_empty()),
            base_url: config.gemini.base_url,
            default_model: config.gemini.default_model,
            host: config.server.host,
            port: config.server.port,
            log_level: config.server.log_level,
            allowed_methods: config.cors.allowed_methods,
            allowed_headers: config.cors.allowed_headers,
            missing_key_status: config.relay.missing_key_status,
        })
    }

    /// Load configuration from environment and config file
    ///
    /// Looks for config.toml in the current directory by default; the
    /// GEMINI_API_KEY environment variable overrides the file value.
    pub fn from_env() -> Result<Self> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        let mut config = Self::from_file(config_path)?;

        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                config.api_key = Some(key);
            }
        }

        Ok(config)
    }

    /// True when an upstream API key is available
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}
