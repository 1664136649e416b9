//! Configuration loading for DASOS.
//! Reads dasos.toml from the current directory or the path in DASOS_CONFIG,
//! then applies DASOS_* environment overrides (a `.env` file is honoured).

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// Serve fixed payloads instead of calling the API.
    #[serde(default)]
    pub use_mock_data: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String { "https://web-production-43ff5.up.railway.app/api/v1".to_string() }
fn default_timeout_secs() -> u64 { 30 }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            use_mock_data: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,
    #[serde(default = "default_plan_code")]
    pub plan_code: String,
    /// Serve the bundled sample document when the catalog host fails.
    #[serde(default = "bool_true")]
    pub fallback_to_sample: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_catalog_base_url() -> String { "https://www.upm.es/comun_gauss/publico/api".to_string() }
fn default_plan_code()        -> String { "10II".to_string() }
fn bool_true()                -> bool   { true }

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_base_url(),
            plan_code: default_plan_code(),
            fallback_to_sample: true,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_bind_addr()  -> String { "127.0.0.1:3000".to_string() }
fn default_static_dir() -> String { "crates/dasos-web/static".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: default_bind_addr(), static_dir: default_static_dir() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_max_age_days")]
    pub max_age_days: i64,
}

fn default_cookie_name()  -> String { "user".to_string() }
fn default_max_age_days() -> i64    { 7 }

impl Default for SessionConfig {
    fn default() -> Self {
        Self { cookie_name: default_cookie_name(), max_age_days: default_max_age_days() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 { 300 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: default_debounce_ms() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_recent_subjects")]
    pub recent_subjects: usize,
}

fn default_recent_subjects() -> usize { 6 }

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { recent_subjects: default_recent_subjects() }
    }
}

impl Config {
    /// Load configuration from dasos.toml (defaults when the file is absent)
    /// and apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env is fine.
        let _ = dotenvy::dotenv();

        let path = std::env::var("DASOS_CONFIG").unwrap_or_else(|_| "dasos.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            info!(path = %path, "Loaded configuration file");
            Self::from_toml_str(&content)?
        } else {
            debug!(path = %path, "No configuration file, using defaults");
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `DASOS_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DASOS_API_BASE_URL") {
            self.api.base_url = url;
        }
        if let Some(flag) = lookup("DASOS_USE_MOCK_DATA") {
            self.api.use_mock_data = parse_flag("DASOS_USE_MOCK_DATA", &flag)?;
        }
        if let Some(url) = lookup("DASOS_CATALOG_BASE_URL") {
            self.catalog.base_url = url;
        }
        if let Some(addr) = lookup("DASOS_BIND_ADDR") {
            self.server.bind_addr = addr;
        }
        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key: key.to_string(), value: value.to_string() }),
    }
}
