//! Session states

use crate::domain::model::Model;

use super::action::{Input, LoadRequest, Prediction};

/// Loaded models and the one currently selected
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    models: Vec<Model>,
    selected: usize,
}

impl Selection {
    /// Selects the first model; `None` when there are no models
    pub fn first(models: Vec<Model>) -> Option<Self> {
        if models.is_empty() {
            return None;
        }
        Some(Self {
            models,
            selected: 0,
        })
    }

    /// Same models with `model_id` selected; `None` when it is not loaded
    pub fn select(&self, model_id: &str) -> Option<Self> {
        let selected = self.models.iter().position(|m| m.id() == model_id)?;
        Some(Self {
            models: self.models.clone(),
            selected,
        })
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn selected(&self) -> &Model {
        &self.models[self.selected]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum State {
    Loading {
        request: LoadRequest,
    },
    Loaded(Selection),
    FailedToLoad {
        request: LoadRequest,
        cause: String,
    },
    Predicting {
        selection: Selection,
        input: Input,
    },
    HasPrediction {
        selection: Selection,
        prediction: Prediction,
    },
    FailedToPredict {
        selection: Selection,
        input: Input,
        cause: String,
    },
}

impl State {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading { .. } => "Loading",
            Self::Loaded(_) => "Loaded",
            Self::FailedToLoad { .. } => "FailedToLoad",
            Self::Predicting { .. } => "Predicting",
            Self::HasPrediction { .. } => "HasPrediction",
            Self::FailedToPredict { .. } => "FailedToPredict",
        }
    }

    /// Selection of any state that has loaded models
    pub fn selection(&self) -> Option<&Selection> {
        match self {
            Self::Loaded(selection)
            | Self::Predicting { selection, .. }
            | Self::HasPrediction { selection, .. }
            | Self::FailedToPredict { selection, .. } => Some(selection),
            Self::Loading { .. } | Self::FailedToLoad { .. } => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn has_models(&self) -> bool {
        self.selection().is_some()
    }

    pub fn is_predicting(&self) -> bool {
        matches!(self, Self::Predicting { .. })
    }

    pub fn prediction(&self) -> Option<&Prediction> {
        match self {
            Self::HasPrediction { prediction, .. } => Some(prediction),
            _ => None,
        }
    }

    pub fn selected_model(&self) -> Option<&Model> {
        self.selection().map(Selection::selected)
    }

    pub fn models(&self) -> &[Model] {
        self.selection().map(Selection::models).unwrap_or_default()
    }

    /// Cause of a failed load or prediction
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::FailedToLoad { cause, .. } | Self::FailedToPredict { cause, .. } => Some(cause),
            _ => None,
        }
    }
}
