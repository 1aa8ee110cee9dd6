//! Catalog repository trait

use std::fmt::Debug;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::model::{ModelCard, ModelCardsById, TaskCardsById};
use crate::domain::DomainError;

/// Read-only source of model cards and task cards
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync + Debug {
    /// All model cards keyed by pretrained model id
    async fn model_cards(&self) -> Result<ModelCardsById, DomainError>;

    /// A single model card
    async fn model_card(&self, id: &str) -> Result<Option<ModelCard>, DomainError>;

    /// All task cards keyed by task id
    async fn tasks(&self) -> Result<TaskCardsById, DomainError>;
}
