//! Model domain - identifiers, info documents, cards and the tools a model offers

mod card;
mod entity;
mod tools;
mod validation;

pub use card::{model_card_id, ModelCard, ModelCardsById, TaskCard, TaskCardsById};
pub use entity::{Model, ModelId, ModelInfo};
pub use tools::{AttackerId, InterpreterId};
pub use validation::{validate_model_id, ModelValidationError, MAX_MODEL_ID_LENGTH};
