//! Prediction service - forwards predict / interpret / attack calls with response memoisation

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use super::ModelRegistry;
use crate::domain::cache::{body_digest, Cache, CacheExt, CacheKeyParams, ResponseKeyGenerator};
use crate::domain::model::{ModelId, ModelInfo};
use crate::domain::prediction::{ModelAction, ModelBackend};
use crate::domain::DomainError;
use crate::infrastructure::observability::record_cache_lookup;

/// Model output and whether it came from the cache
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionOutcome {
    pub output: Value,
    pub cache_hit: bool,
}

#[derive(Debug)]
pub struct PredictionService {
    backend: Arc<dyn ModelBackend>,
    models: ModelRegistry,
    cache: Option<Arc<dyn Cache>>,
    key_generator: ResponseKeyGenerator,
    ttl: Duration,
}

impl PredictionService {
    pub fn new(backend: Arc<dyn ModelBackend>, models: ModelRegistry) -> Self {
        Self {
            backend,
            models,
            cache: None,
            key_generator: ResponseKeyGenerator::default(),
            ttl: Duration::from_secs(3600),
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        self.cache = Some(cache);
        self.ttl = ttl;
        self
    }

    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    pub fn backend(&self) -> &Arc<dyn ModelBackend> {
        &self.backend
    }

    /// Fetches the info document of a known model
    pub async fn info(&self, model_id: &str) -> Result<ModelInfo, DomainError> {
        let model = self.models.resolve(model_id)?;
        self.backend.info(&model).await
    }

    /// Cache key for a raw request body
    pub fn cache_key(&self, model: &ModelId, action: ModelAction, body: &[u8]) -> String {
        let mut params = CacheKeyParams::new(model.as_str())
            .with_component("verb", action.verb())
            .with_component("body", body_digest(body));

        if let Some(target) = action.target() {
            params = params.with_component("target", target);
        }

        self.key_generator.generate(&params)
    }

    /// Runs `action` on the raw JSON `body`.
    ///
    /// Identical bodies are answered from the cache unless `no_cache` is set;
    /// cache failures are logged and never fail the request.
    pub async fn run(
        &self,
        model_id: &str,
        action: ModelAction,
        body: &[u8],
        no_cache: bool,
    ) -> Result<PredictionOutcome, DomainError> {
        let model = self.models.resolve(model_id)?;

        let input: Value = serde_json::from_slice(body)
            .map_err(|e| DomainError::validation(format!("Invalid JSON body: {}", e)))?;

        let cache = match (&self.cache, no_cache) {
            (Some(cache), false) => Some(cache),
            _ => None,
        };
        let key = self.cache_key(&model, action, body);

        if let Some(cache) = cache {
            match cache.get::<Value>(&key).await {
                Ok(Some(output)) => {
                    record_cache_lookup(model.as_str(), action.verb(), true);
                    debug!(model = %model, action = %action, "Cache hit");
                    return Ok(PredictionOutcome {
                        output,
                        cache_hit: true,
                    });
                }
                Ok(None) => record_cache_lookup(model.as_str(), action.verb(), false),
                Err(e) => warn!(model = %model, error = %e, "Cache lookup failed"),
            }
        }

        let output = self.backend.call(&model, action, &input).await?;

        if let Some(cache) = cache {
            if let Err(e) = cache.set(&key, &output, self.ttl).await {
                warn!(model = %model, error = %e, "Failed to cache model output");
            }
        }

        Ok(PredictionOutcome {
            output,
            cache_hit: false,
        })
    }
}
