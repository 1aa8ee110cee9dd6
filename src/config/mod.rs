//! Configuration module

mod app_config;

pub use app_config::{
    AppConfig, CacheConfig, CatalogConfig, LogFormat, LoggingConfig, PermalinkBackend,
    PermalinksConfig, ServerConfig, UpstreamConfig,
};
