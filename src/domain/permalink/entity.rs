//! Permalink entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored input, as returned by `GET /api/permalink/{slug}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permalink {
    /// Only sent by older model pages
    pub model_name: Option<String>,
    pub request_data: Value,
    pub model_id: Option<String>,
    pub task_name: Option<String>,
}

/// Body of `POST /api/permalink/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPermalink {
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub request_data: Value,
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default)]
    pub task_name: Option<String>,
    #[serde(skip, default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl NewPermalink {
    pub fn new(request_data: Value) -> Self {
        Self {
            model_name: None,
            request_data,
            model_id: None,
            task_name: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn with_task_name(mut self, task_name: impl Into<String>) -> Self {
        self.task_name = Some(task_name.into());
        self
    }

    /// `request_data` must be present and non-empty
    pub fn has_request_data(&self) -> bool {
        match &self.request_data {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::String(s) => !s.is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Object(o) => !o.is_empty(),
            Value::Number(n) => n.as_f64() != Some(0.0),
        }
    }

    pub fn into_permalink(self) -> Permalink {
        Permalink {
            model_name: self.model_name,
            request_data: self.request_data,
            model_id: self.model_id,
            task_name: self.task_name,
        }
    }
}
