//! Actions accepted by the session reducer

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::model::Model;

/// Identity of one model-list load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one submitted input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputId(Uuid);

impl InputId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InputId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    pub id: RequestId,
    pub model_ids: Vec<String>,
}

impl LoadRequest {
    pub fn new(model_ids: Vec<String>) -> Self {
        Self {
            id: RequestId::new(),
            model_ids,
        }
    }
}

/// A form submission. Two inputs with equal bodies are still distinct.
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    pub id: InputId,
    pub body: Value,
}

impl Input {
    pub fn new(body: Value) -> Self {
        Self {
            id: InputId::new(),
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub input: Input,
    pub output: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Loading { request: LoadRequest },
    Loaded { request: RequestId, models: Vec<Model> },
    LoadError { request: RequestId, cause: String },
    Select { model_id: String },
    Predicting { input: Input },
    ReceivedPrediction { prediction: Prediction },
    PredictError { input: InputId, cause: String },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading { .. } => "Loading",
            Self::Loaded { .. } => "Loaded",
            Self::LoadError { .. } => "LoadError",
            Self::Select { .. } => "Select",
            Self::Predicting { .. } => "Predicting",
            Self::ReceivedPrediction { .. } => "ReceivedPrediction",
            Self::PredictError { .. } => "PredictError",
        }
    }
}
