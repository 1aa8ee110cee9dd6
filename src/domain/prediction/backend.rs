//! Upstream model backend trait

use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::Value;

#[cfg(test)]
use mockall::automock;

use super::ModelAction;
use crate::domain::model::{ModelId, ModelInfo};
use crate::domain::DomainError;

/// A source of model info and model output
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ModelBackend: Send + Sync + Debug {
    /// Base URL the model is served from
    fn endpoint_url(&self, model: &ModelId) -> String;

    /// Fetches the model's info document
    async fn info(&self, model: &ModelId) -> Result<ModelInfo, DomainError>;

    /// Runs `action` on `input` and returns the model's JSON output
    async fn call(
        &self,
        model: &ModelId,
        action: ModelAction,
        input: &Value,
    ) -> Result<Value, DomainError>;
}
