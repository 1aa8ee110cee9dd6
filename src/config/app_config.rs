use std::collections::HashMap;

use serde::Deserialize;

use crate::infrastructure::observability::ObservabilityConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub permalinks: PermalinksConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Where model servers live
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of a model server, `{model_id}` is replaced by the model id
    #[serde(default = "default_url_template")]
    pub url_template: String,
    /// Base URLs for models that do not follow the template
    #[serde(default)]
    pub overrides: HashMap<String, String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Memoisation of predict / interpret / attack responses
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// How long the `/api/info/` listing is reused
    #[serde(default = "default_info_ttl_secs")]
    pub info_ttl_secs: u64,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PermalinkBackend {
    #[default]
    None,
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PermalinksConfig {
    #[serde(default)]
    pub backend: PermalinkBackend,
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Model card and task card files
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub model_cards_path: Option<String>,
    #[serde(default)]
    pub tasks_path: Option<String>,
}

fn default_url_template() -> String {
    "http://localhost:8000/api/{model_id}".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

fn default_max_capacity() -> u64 {
    1024
}

fn default_ttl_secs() -> u64 {
    3600
}

fn default_info_ttl_secs() -> u64 {
    10
}

fn default_max_connections() -> u32 {
    5
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url_template: default_url_template(),
            overrides: HashMap::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_capacity: default_max_capacity(),
            ttl_secs: default_ttl_secs(),
            info_ttl_secs: default_info_ttl_secs(),
        }
    }
}

impl Default for PermalinksConfig {
    fn default() -> Self {
        Self {
            backend: PermalinkBackend::default(),
            database_url: None,
            max_connections: default_max_connections(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
