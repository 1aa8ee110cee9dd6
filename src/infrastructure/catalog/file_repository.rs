//! Catalog repository backed by JSON files

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::CatalogConfig;
use crate::domain::catalog::CatalogRepository;
use crate::domain::model::{ModelCard, ModelCardsById, TaskCardsById};
use crate::domain::DomainError;

/// Reads `model-cards.json` / `tasks.json` style documents.
///
/// Files are loaded once at startup; a source without a configured path is empty.
#[derive(Debug, Clone, Default)]
pub struct FileCatalogRepository {
    model_cards: ModelCardsById,
    tasks: TaskCardsById,
}

impl FileCatalogRepository {
    pub fn new(model_cards: ModelCardsById, tasks: TaskCardsById) -> Self {
        Self { model_cards, tasks }
    }

    pub async fn load(config: &CatalogConfig) -> Result<Self, DomainError> {
        let model_cards: ModelCardsById = match &config.model_cards_path {
            Some(path) => read_json(path).await?,
            None => ModelCardsById::new(),
        };
        let tasks: TaskCardsById = match &config.tasks_path {
            Some(path) => read_json(path).await?,
            None => TaskCardsById::new(),
        };

        info!(
            model_cards = model_cards.len(),
            tasks = tasks.len(),
            "Catalog loaded"
        );

        Ok(Self::new(model_cards, tasks))
    }
}

async fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, DomainError> {
    let path: PathBuf = path.as_ref().to_path_buf();
    debug!(path = %path.display(), "Reading catalog file");

    let contents = tokio::fs::read_to_string(&path).await.map_err(|e| {
        DomainError::configuration(format!("Failed to read {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&contents).map_err(|e| {
        DomainError::configuration(format!("Invalid catalog file {}: {}", path.display(), e))
    })
}

#[async_trait]
impl CatalogRepository for FileCatalogRepository {
    async fn model_cards(&self) -> Result<ModelCardsById, DomainError> {
        Ok(self.model_cards.clone())
    }

    async fn model_card(&self, id: &str) -> Result<Option<ModelCard>, DomainError> {
        Ok(self.model_cards.get(id).cloned())
    }

    async fn tasks(&self) -> Result<TaskCardsById, DomainError> {
        Ok(self.tasks.clone())
    }
}
