//! Client for a running gateway

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::domain::model::{ModelCard, ModelInfo};
use crate::domain::permalink::{NewPermalink, Permalink};
use crate::domain::prediction::ModelAction;
use crate::domain::DomainError;

#[derive(Debug, Clone)]
pub struct DemoClient {
    base_url: String,
    client: reqwest::Client,
}

impl DemoClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    pub async fn info(&self, model_id: &str) -> Result<ModelInfo, DomainError> {
        let url = self.url(model_id);
        debug!(url = %url, "Fetching model info");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::upstream(model_id, format!("Request failed: {}", e)))?;

        read_json(model_id, response).await
    }

    pub async fn call(
        &self,
        model_id: &str,
        action: ModelAction,
        input: &Value,
    ) -> Result<Value, DomainError> {
        let url = self.url(&format!("{}/{}", model_id, action.path()));
        debug!(url = %url, "Calling model");

        let response = self
            .client
            .post(&url)
            .json(input)
            .send()
            .await
            .map_err(|e| DomainError::upstream(model_id, format!("Request failed: {}", e)))?;

        read_json(model_id, response).await
    }

    pub async fn model_card(&self, card_id: &str) -> Result<ModelCard, DomainError> {
        let response = self
            .client
            .get(self.url(&format!("model-card/{}", card_id)))
            .send()
            .await
            .map_err(|e| DomainError::upstream("model-cards", format!("Request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DomainError::not_found(format!(
                "No model with id {} found.",
                card_id
            )));
        }

        read_json("model-cards", response).await
    }

    pub async fn permalink(&self, slug: &str) -> Result<Permalink, DomainError> {
        let response = self
            .client
            .get(self.url(&format!("permalink/{}", slug)))
            .send()
            .await
            .map_err(|e| DomainError::upstream("permalinks", format!("Request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DomainError::not_found(format!("Permalink not found: {}", slug)));
        }

        read_json("permalinks", response).await
    }

    /// Stores a permalink and returns its slug
    pub async fn create_permalink(&self, permalink: &NewPermalink) -> Result<String, DomainError> {
        let response = self
            .client
            .post(self.url("permalink/"))
            .json(permalink)
            .send()
            .await
            .map_err(|e| DomainError::upstream("permalinks", format!("Request failed: {}", e)))?;

        read_json("permalinks", response).await
    }
}

async fn read_json<T: DeserializeOwned>(
    source: &str,
    response: reqwest::Response,
) -> Result<T, DomainError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DomainError::upstream(
            source,
            format!("HTTP {}: {}", status, body),
        ));
    }

    response
        .json()
        .await
        .map_err(|e| DomainError::unexpected_output(format!("Invalid response: {}", e)))
}
