//! In-memory permalink repository

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::permalink::{NewPermalink, Permalink, PermalinkRepository};
use crate::domain::DomainError;

/// Permalinks kept for the lifetime of the process; ids are positions, starting at 0
#[derive(Debug, Default)]
pub struct InMemoryPermalinkRepository {
    permalinks: RwLock<Vec<Permalink>>,
}

impl InMemoryPermalinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PermalinkRepository for InMemoryPermalinkRepository {
    async fn insert(&self, permalink: NewPermalink) -> Result<u64, DomainError> {
        let mut permalinks = self.permalinks.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let id = permalinks.len() as u64;
        permalinks.push(permalink.into_permalink());
        Ok(id)
    }

    async fn get(&self, id: u64) -> Result<Option<Permalink>, DomainError> {
        let permalinks = self.permalinks.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let found = usize::try_from(id)
            .ok()
            .and_then(|index| permalinks.get(index))
            .cloned();
        Ok(found)
    }
}
