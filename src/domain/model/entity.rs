//! Model identifiers and the info document served for each model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::card::ModelCard;
use super::validation::{validate_model_id, ModelValidationError};

/// Model identifier - lowercase alphanumerics + hyphens, max 64 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModelId(String);

impl ModelId {
    /// Create a new ModelId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, ModelValidationError> {
        let id = id.into();
        validate_model_id(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ModelId {
    type Error = ModelValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ModelId> for String {
    fn from(id: ModelId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Details about an individual model, as returned by `GET /api/{model_id}`.
///
/// Fields the gateway does not know about are kept in `extra` so the document
/// round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allennlp: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pretrained_model_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predictor_name: Option<String>,

    #[serde(default)]
    pub interpreters: Vec<String>,

    #[serde(default)]
    pub attackers: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<Value>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ModelInfo {
    /// Minimal info document for a model id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            allennlp: None,
            archive_file: None,
            pretrained_model_id: None,
            predictor_name: None,
            interpreters: Vec::new(),
            attackers: Vec::new(),
            overrides: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_pretrained_model_id(mut self, id: impl Into<String>) -> Self {
        self.pretrained_model_id = Some(id.into());
        self
    }

    pub fn with_interpreters(mut self, interpreters: Vec<String>) -> Self {
        self.interpreters = interpreters;
        self
    }

    pub fn with_attackers(mut self, attackers: Vec<String>) -> Self {
        self.attackers = attackers;
        self
    }

    pub fn supports_interpreter(&self, id: &str) -> bool {
        self.interpreters.iter().any(|i| i == id)
    }

    pub fn supports_attacker(&self, id: &str) -> bool {
        self.attackers.iter().any(|a| a == id)
    }
}

/// A selectable model: its info document and, when available, its card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub info: ModelInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<ModelCard>,
}

impl Model {
    pub fn new(info: ModelInfo) -> Self {
        Self { info, card: None }
    }

    pub fn with_card(mut self, card: ModelCard) -> Self {
        self.card = Some(card);
        self
    }

    pub fn id(&self) -> &str {
        &self.info.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_id_roundtrip() {
        let id = ModelId::new("bidaf-elmo").unwrap();
        assert_eq!(id.as_str(), "bidaf-elmo");
        assert_eq!(id.to_string(), "bidaf-elmo");

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"bidaf-elmo\"");
    }

    #[test]
    fn test_model_id_rejects_invalid_on_deserialize() {
        let result: Result<ModelId, _> = serde_json::from_str("\"Not Valid\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_model_info_keeps_unknown_fields() {
        let json = serde_json::json!({
            "id": "bidaf",
            "allennlp": "1.0.0",
            "archive_file": "https://example.org/bidaf.tar.gz",
            "interpreters": ["simple_gradient"],
            "attackers": ["hotflip"],
            "use_old_load_method": false
        });

        let info: ModelInfo = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(info.id, "bidaf");
        assert!(info.supports_interpreter("simple_gradient"));
        assert!(!info.supports_attacker("input_reduction"));
        assert_eq!(info.extra.get("use_old_load_method"), Some(&Value::Bool(false)));

        let back = serde_json::to_value(&info).unwrap();
        assert_eq!(back["use_old_load_method"], Value::Bool(false));
    }

    #[test]
    fn test_model_info_defaults() {
        let info: ModelInfo = serde_json::from_str(r#"{"id": "nmn"}"#).unwrap();
        assert!(info.interpreters.is_empty());
        assert!(info.pretrained_model_id.is_none());
    }
}
