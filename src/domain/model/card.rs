//! Model cards and task cards

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entity::ModelInfo;
use crate::domain::DomainError;

/// Metadata document describing a pretrained model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCard {
    pub display_name: String,
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_dataset: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_predictor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_dataset: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_motivation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_preprocessing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// A demo task and its examples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCard {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_inputs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_outputs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_and_limitations: Option<String>,
    /// Either a flat list of examples or examples grouped by title
    #[serde(default)]
    pub examples: Value,
}

pub type ModelCardsById = BTreeMap<String, ModelCard>;
pub type TaskCardsById = BTreeMap<String, TaskCard>;

/// Returns the id used to look up a model's card.
///
/// Models served with a `pretrained_model_id` use it directly; a few older
/// models predate that field and are mapped by hand.
pub fn model_card_id(info: &ModelInfo) -> Result<String, DomainError> {
    if let Some(id) = &info.pretrained_model_id {
        return Ok(id.clone());
    }

    match info.id.as_str() {
        "nmn" => Ok("rc-nmn".to_string()),
        "vilbert-vqa" => Ok("ve-vilbert".to_string()),
        other => Err(DomainError::not_found(format!(
            "Unable to determine id to use for fetching a model card for model {}",
            other
        ))),
    }
}
