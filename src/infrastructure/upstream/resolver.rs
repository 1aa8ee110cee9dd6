//! Model id to base URL resolution

use std::collections::HashMap;

use crate::config::UpstreamConfig;
use crate::domain::ModelId;

const MODEL_ID_PLACEHOLDER: &str = "{model_id}";

#[derive(Debug, Clone)]
pub struct UrlResolver {
    template: String,
    overrides: HashMap<String, String>,
}

impl UrlResolver {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            overrides: HashMap::new(),
        }
    }

    pub fn with_override(mut self, model: impl Into<String>, url: impl Into<String>) -> Self {
        self.overrides.insert(model.into(), url.into());
        self
    }

    /// Base URL of `model`, without a trailing slash
    pub fn resolve(&self, model: &ModelId) -> String {
        let url = match self.overrides.get(model.as_str()) {
            Some(url) => url.clone(),
            None => self.template.replace(MODEL_ID_PLACEHOLDER, model.as_str()),
        };
        url.trim_end_matches('/').to_string()
    }
}

impl From<&UpstreamConfig> for UrlResolver {
    fn from(config: &UpstreamConfig) -> Self {
        Self {
            template: config.url_template.clone(),
            overrides: config.overrides.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ModelId {
        ModelId::new(s).unwrap()
    }

    #[test]
    fn test_template() {
        let resolver = UrlResolver::new("http://models:8000/api/{model_id}/");
        assert_eq!(resolver.resolve(&id("bidaf")), "http://models:8000/api/bidaf");
    }

    #[test]
    fn test_override_wins() {
        let resolver = UrlResolver::new("http://models/{model_id}")
            .with_override("nmn", "http://legacy-nmn:9000");
        assert_eq!(resolver.resolve(&id("nmn")), "http://legacy-nmn:9000");
        assert_eq!(resolver.resolve(&id("lerc")), "http://models/lerc");
    }
}
