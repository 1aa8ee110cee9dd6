//! Permalink service - creates and resolves shareable links

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::permalink::{
    int_to_slug, parse_slug, NewPermalink, Permalink, PermalinkRepository,
};
use crate::domain::DomainError;

#[derive(Debug, Clone)]
pub struct PermalinkService {
    repository: Option<Arc<dyn PermalinkRepository>>,
}

impl PermalinkService {
    pub fn new(repository: Arc<dyn PermalinkRepository>) -> Self {
        Self {
            repository: Some(repository),
        }
    }

    /// A service that rejects every call
    pub fn disabled() -> Self {
        Self { repository: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.repository.is_some()
    }

    fn repository(&self) -> Result<&Arc<dyn PermalinkRepository>, DomainError> {
        self.repository
            .as_ref()
            .ok_or_else(|| DomainError::disabled("Permalinks are not enabled"))
    }

    pub async fn get(&self, slug: &str) -> Result<Permalink, DomainError> {
        let repository = self.repository()?;

        let id = parse_slug(slug)
            .map_err(|_| DomainError::validation(format!("Unrecognized permalink: {}", slug)))?;

        let permalink = repository.get(id).await.map_err(|e| {
            error!(slug, error = %e, "Failed to load permalink");
            DomainError::internal("Something went wrong.")
        })?;

        permalink.ok_or_else(|| DomainError::not_found(format!("Permalink not found: {}", slug)))
    }

    /// Stores the permalink and returns its slug
    pub async fn create(&self, permalink: NewPermalink) -> Result<String, DomainError> {
        let repository = self.repository()?;

        if !permalink.has_request_data() {
            return Err(DomainError::validation("Invalid request_data"));
        }

        let id = repository.insert(permalink).await.map_err(|e| {
            error!(error = %e, "Failed to store permalink");
            DomainError::internal("Something went wrong.")
        })?;

        let slug = int_to_slug(id);
        info!(id, slug = %slug, "Permalink created");
        Ok(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::permalink::MockPermalinkRepository;
    use serde_json::json;

    fn stored() -> Permalink {
        Permalink {
            model_name: None,
            request_data: json!({"sentence": "hello"}),
            model_id: Some("glove-sentiment-analysis".to_string()),
            task_name: Some("sentiment-analysis".to_string()),
        }
    }

    #[tokio::test]
    async fn test_disabled() {
        let service = PermalinkService::disabled();
        let err = service.get("MQ==").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Feature disabled: Permalinks are not enabled"
        );
    }

    #[tokio::test]
    async fn test_get_decodes_slug() {
        let mut repo = MockPermalinkRepository::new();
        repo.expect_get()
            .withf(|id| *id == 1052774)
            .returning(|_| Ok(Some(stored())));

        let service = PermalinkService::new(Arc::new(repo));
        let permalink = service.get("MTA1Mjc3NA==").await.unwrap();
        assert_eq!(permalink.task_name.as_deref(), Some("sentiment-analysis"));
    }

    #[tokio::test]
    async fn test_malformed_slug() {
        let service = PermalinkService::new(Arc::new(MockPermalinkRepository::new()));
        let err = service.get("not base64!").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
        assert!(err.to_string().contains("Unrecognized permalink: not base64!"));
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let mut repo = MockPermalinkRepository::new();
        repo.expect_get().returning(|_| Ok(None));

        let service = PermalinkService::new(Arc::new(repo));
        let err = service.get("MQ==").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_storage_failure_is_hidden() {
        let mut repo = MockPermalinkRepository::new();
        repo.expect_get()
            .returning(|_| Err(DomainError::storage("connection reset")));

        let service = PermalinkService::new(Arc::new(repo));
        let err = service.get("MQ==").await.unwrap_err();
        assert_eq!(err.to_string(), "Internal error: Something went wrong.");
    }

    #[tokio::test]
    async fn test_create_returns_slug() {
        let mut repo = MockPermalinkRepository::new();
        repo.expect_insert().times(1).returning(|_| Ok(1));

        let service = PermalinkService::new(Arc::new(repo));
        let slug = service
            .create(NewPermalink::new(json!({"sentence": "hi"})))
            .await
            .unwrap();
        assert_eq!(slug, "MQ==");
    }

    #[tokio::test]
    async fn test_create_requires_request_data() {
        let mut repo = MockPermalinkRepository::new();
        repo.expect_insert().never();

        let service = PermalinkService::new(Arc::new(repo));
        let err = service
            .create(NewPermalink::new(json!({})))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Invalid request_data");
    }
}
