//! NLP demo gateway
//!
//! Serves the demo API in front of a set of model servers:
//! - Model info, predict, interpret and attack calls proxied per model, with
//!   memoised responses
//! - Permalinks for sharing inputs
//! - Model cards, task cards and the demo registry
//!
//! The library also carries the pure pieces the terminal client renders with:
//! tag decoding, verb trees, saliency ranking and the session reducer.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use api::AppState;
use config::PermalinkBackend;
use domain::{Cache, ModelBackend, PermalinkRepository};
use infrastructure::{
    cache::{InMemoryCache, InMemoryCacheConfig},
    catalog::FileCatalogRepository,
    permalink::{InMemoryPermalinkRepository, PostgresPermalinkRepository},
    services::{CatalogService, InfoService, ModelRegistry, PermalinkService, PredictionService},
    upstream::{HttpClient, HttpModelBackend, UrlResolver},
};

/// Wires services from configuration
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let http = HttpClient::with_timeout(Duration::from_secs(config.upstream.timeout_secs))?;
    let backend: Arc<dyn ModelBackend> = Arc::new(HttpModelBackend::new(
        Arc::new(http),
        UrlResolver::from(&config.upstream),
    ));
    let models = ModelRegistry::from_config(&config.upstream);
    info!(models = models.ids().count(), "Model registry ready");

    let mut predictions = PredictionService::new(backend.clone(), models.clone());
    let mut endpoints = InfoService::new(backend, models);

    if config.cache.enabled {
        let cache: Arc<dyn Cache> =
            Arc::new(InMemoryCache::with_config(InMemoryCacheConfig::from(&config.cache)));
        predictions =
            predictions.with_cache(cache.clone(), Duration::from_secs(config.cache.ttl_secs));
        endpoints =
            endpoints.with_cache(cache, Duration::from_secs(config.cache.info_ttl_secs));
        info!(
            max_capacity = config.cache.max_capacity,
            ttl_secs = config.cache.ttl_secs,
            "Response cache enabled"
        );
    }

    let permalinks = create_permalink_service(config).await?;

    let catalog = FileCatalogRepository::load(&config.catalog)
        .await
        .context("Failed to load model and task cards")?;

    Ok(AppState::new(
        predictions,
        permalinks,
        CatalogService::new(Arc::new(catalog)),
        endpoints,
    ))
}

async fn create_permalink_service(config: &AppConfig) -> anyhow::Result<PermalinkService> {
    let repository: Arc<dyn PermalinkRepository> = match config.permalinks.backend {
        PermalinkBackend::None => {
            info!("Permalinks disabled");
            return Ok(PermalinkService::disabled());
        }
        PermalinkBackend::Memory => {
            info!("Using in-memory permalink storage");
            Arc::new(InMemoryPermalinkRepository::new())
        }
        PermalinkBackend::Postgres => {
            let url = config
                .permalinks
                .database_url
                .as_deref()
                .context("permalinks.database_url is required for the postgres backend")?;
            info!("Using PostgreSQL permalink storage");
            Arc::new(
                PostgresPermalinkRepository::connect(url, config.permalinks.max_connections)
                    .await?,
            )
        }
    };

    Ok(PermalinkService::new(repository))
}
