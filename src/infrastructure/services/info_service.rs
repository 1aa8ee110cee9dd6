//! Info service - lists every model endpoint with its info document

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::ModelRegistry;
use crate::domain::cache::{Cache, CacheExt};
use crate::domain::model::{ModelId, ModelInfo};
use crate::domain::prediction::ModelBackend;
use crate::domain::DomainError;

const ENDPOINTS_CACHE_KEY: &str = "info:endpoints";

/// A model endpoint and, when it answered, its info document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: String,
    pub url: String,
    pub info: Option<ModelInfo>,
}

#[derive(Debug)]
pub struct InfoService {
    backend: Arc<dyn ModelBackend>,
    models: ModelRegistry,
    cache: Option<Arc<dyn Cache>>,
    ttl: Duration,
}

impl InfoService {
    pub fn new(backend: Arc<dyn ModelBackend>, models: ModelRegistry) -> Self {
        Self {
            backend,
            models,
            cache: None,
            ttl: Duration::from_secs(10),
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        self.cache = Some(cache);
        self.ttl = ttl;
        self
    }

    /// Fetches all info documents concurrently; endpoints that fail are listed without info
    pub async fn endpoints(&self) -> Result<Vec<Endpoint>, DomainError> {
        if let Some(cache) = &self.cache {
            match cache.get::<Vec<Endpoint>>(ENDPOINTS_CACHE_KEY).await {
                Ok(Some(endpoints)) => return Ok(endpoints),
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Info cache lookup failed"),
            }
        }

        let models: Vec<ModelId> = self
            .models
            .ids()
            .filter_map(|id| ModelId::new(id).ok())
            .collect();

        let requests = models.iter().map(|model| async move {
            let info = match self.backend.info(model).await {
                Ok(info) => Some(info),
                Err(e) => {
                    error!(model = %model, error = %e, "Info request failed");
                    None
                }
            };

            Endpoint {
                id: model.to_string(),
                url: self.backend.endpoint_url(model),
                info,
            }
        });

        let endpoints = join_all(requests).await;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.set(ENDPOINTS_CACHE_KEY, &endpoints, self.ttl).await {
                warn!(error = %e, "Failed to cache endpoint listing");
            }
        }

        Ok(endpoints)
    }
}
