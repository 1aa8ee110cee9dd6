use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Current state is {actual}, which is unexpected")]
    InvalidState { actual: &'static str },

    #[error("No models to select from.")]
    NoModels,

    #[error("Model with id {model_id} not found.")]
    ModelNotFound { model_id: String },
}
