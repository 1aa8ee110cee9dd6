//! Cache key generation for model responses

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

/// Parameters for cache key generation
#[derive(Debug, Clone, Default)]
pub struct CacheKeyParams {
    /// Primary identifier, the model id
    pub primary: String,
    /// Secondary components (sorted for consistency)
    pub components: BTreeMap<String, String>,
}

impl CacheKeyParams {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            components: BTreeMap::new(),
        }
    }

    pub fn with_component(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.components.insert(key.into(), value.into());
        self
    }
}

/// SHA-256 of a request body, hex encoded
pub fn body_digest(body: &[u8]) -> String {
    hex::encode(Sha256::digest(body))
}

/// Builds keys of the form `namespace:model:k=v:...`
#[derive(Debug, Clone)]
pub struct ResponseKeyGenerator {
    namespace: String,
}

impl Default for ResponseKeyGenerator {
    fn default() -> Self {
        Self::new("responses")
    }
}

impl ResponseKeyGenerator {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn generate(&self, params: &CacheKeyParams) -> String {
        let mut parts = vec![self.namespace.clone(), params.primary.clone()];

        for (k, v) in &params.components {
            parts.push(format!("{}={}", k, v));
        }

        parts.join(":")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_digest_is_stable() {
        let a = body_digest(br#"{"sentence": "hi"}"#);
        let b = body_digest(br#"{"sentence": "hi"}"#);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_body_digest_distinguishes_whitespace() {
        assert_ne!(body_digest(b"{\"a\":1}"), body_digest(b"{\"a\": 1}"));
    }

    #[test]
    fn test_generate_sorts_components() {
        let generator = ResponseKeyGenerator::default();
        let params = CacheKeyParams::new("bidaf")
            .with_component("verb", "predict")
            .with_component("body", "abc");

        assert_eq!(generator.generate(&params), "responses:bidaf:body=abc:verb=predict");
    }

    #[test]
    fn test_namespace() {
        let generator = ResponseKeyGenerator::new("test");
        assert_eq!(generator.generate(&CacheKeyParams::new("m")), "test:m");
    }
}
