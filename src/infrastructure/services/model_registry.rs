//! Set of model ids the gateway routes to

use std::collections::BTreeSet;

use crate::config::UpstreamConfig;
use crate::domain::demo::known_model_ids;
use crate::domain::{DomainError, ModelId};

/// Models from the demo registry plus any configured upstream overrides
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    ids: BTreeSet<String>,
}

impl ModelRegistry {
    pub fn new(ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self::new(
            known_model_ids()
                .into_iter()
                .map(str::to_string)
                .chain(config.overrides.keys().cloned()),
        )
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Looks up a routable model id
    pub fn resolve(&self, id: &str) -> Result<ModelId, DomainError> {
        if !self.contains(id) {
            return Err(DomainError::not_found(format!("Unknown model {}", id)));
        }
        ModelId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::from_config(&UpstreamConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_contains_demo_models() {
        let registry = ModelRegistry::default();
        assert!(registry.contains("bidaf"));
        assert!(registry.contains("semantic-role-labeling"));
        assert!(!registry.contains("gpt-17"));
    }

    #[test]
    fn test_overrides_are_routable() {
        let mut config = UpstreamConfig::default();
        config
            .overrides
            .insert("my-model".to_string(), "http://localhost:9000".to_string());

        let registry = ModelRegistry::from_config(&config);
        assert_eq!(registry.resolve("my-model").unwrap().as_str(), "my-model");
    }

    #[test]
    fn test_unknown_model_is_not_found() {
        let err = ModelRegistry::default().resolve("nope").unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
