//! Catalog service - model cards and task cards

use std::sync::Arc;

use crate::domain::catalog::CatalogRepository;
use crate::domain::model::{model_card_id, ModelCard, ModelCardsById, ModelInfo, TaskCardsById};
use crate::domain::DomainError;

#[derive(Debug, Clone)]
pub struct CatalogService {
    repository: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    pub async fn model_cards(&self) -> Result<ModelCardsById, DomainError> {
        self.repository.model_cards().await
    }

    pub async fn model_card(&self, id: &str) -> Result<ModelCard, DomainError> {
        self.repository
            .model_card(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("No model with id {} found.", id)))
    }

    /// Card of a served model, if one is published
    pub async fn card_for(&self, info: &ModelInfo) -> Result<Option<ModelCard>, DomainError> {
        let id = model_card_id(info)?;
        self.repository.model_card(&id).await
    }

    pub async fn tasks(&self) -> Result<TaskCardsById, DomainError> {
        self.repository.tasks().await
    }
}
