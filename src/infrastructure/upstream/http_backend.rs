//! Model backend that forwards to model servers over HTTP

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::{HttpClientTrait, UrlResolver};
use crate::domain::model::{ModelId, ModelInfo};
use crate::domain::prediction::{ModelAction, ModelBackend};
use crate::domain::DomainError;
use crate::infrastructure::observability::{record_upstream_request, UpstreamMetricParams};

#[derive(Debug, Clone)]
pub struct HttpModelBackend {
    client: Arc<dyn HttpClientTrait>,
    resolver: UrlResolver,
}

impl HttpModelBackend {
    pub fn new(client: Arc<dyn HttpClientTrait>, resolver: UrlResolver) -> Self {
        Self { client, resolver }
    }

    /// Attributes client errors to the model they were made for
    fn attribute(model: &ModelId, error: DomainError) -> DomainError {
        match error {
            DomainError::Upstream { message, .. } => DomainError::upstream(model.as_str(), message),
            other => other,
        }
    }

    fn record(model: &ModelId, verb: &str, started: Instant, success: bool) {
        record_upstream_request(UpstreamMetricParams {
            model: model.as_str(),
            verb,
            duration: started.elapsed(),
            success,
        });
    }
}

#[async_trait]
impl ModelBackend for HttpModelBackend {
    fn endpoint_url(&self, model: &ModelId) -> String {
        self.resolver.resolve(model)
    }

    async fn info(&self, model: &ModelId) -> Result<ModelInfo, DomainError> {
        let url = self.endpoint_url(model);
        let started = Instant::now();

        let result = self.client.get_json(&url).await;
        Self::record(model, "info", started, result.is_ok());

        let value = result.map_err(|e| {
            warn!(model = %model, url = %url, error = %e, "Model info request failed");
            Self::attribute(model, e)
        })?;

        serde_json::from_value(value).map_err(|e| {
            DomainError::unexpected_output(format!("Invalid info document for {}: {}", model, e))
        })
    }

    async fn call(
        &self,
        model: &ModelId,
        action: ModelAction,
        input: &Value,
    ) -> Result<Value, DomainError> {
        let url = format!("{}/{}", self.endpoint_url(model), action.path());
        let started = Instant::now();

        debug!(model = %model, action = %action, url = %url, "Forwarding to model server");

        let result = self.client.post_json(&url, input).await;
        Self::record(model, action.verb(), started, result.is_ok());

        result.map_err(|e| {
            warn!(model = %model, action = %action, error = %e, "Model request failed");
            Self::attribute(model, e)
        })
    }
}
