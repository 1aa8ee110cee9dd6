//! Model identifier validation

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length for model IDs
pub const MAX_MODEL_ID_LENGTH: usize = 64;

/// Lowercase alphanumerics and hyphens, no leading or trailing hyphen
static MODEL_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*[a-z0-9]$|^[a-z0-9]$").unwrap());

/// Model validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ModelValidationError {
    /// Model ID is empty
    EmptyId,
    /// Model ID exceeds maximum length
    IdTooLong { length: usize, max: usize },
    /// Model ID contains invalid characters
    InvalidIdFormat { id: String },
}

impl fmt::Display for ModelValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Model ID cannot be empty"),
            Self::IdTooLong { length, max } => {
                write!(f, "Model ID too long: {} characters (max {})", length, max)
            }
            Self::InvalidIdFormat { id } => {
                write!(
                    f,
                    "Invalid model ID format '{}': must be lowercase alphanumeric with hyphens, cannot start or end with hyphen",
                    id
                )
            }
        }
    }
}

impl std::error::Error for ModelValidationError {}

/// Validates a model ID
pub fn validate_model_id(id: &str) -> Result<(), ModelValidationError> {
    if id.is_empty() {
        return Err(ModelValidationError::EmptyId);
    }

    if id.len() > MAX_MODEL_ID_LENGTH {
        return Err(ModelValidationError::IdTooLong {
            length: id.len(),
            max: MAX_MODEL_ID_LENGTH,
        });
    }

    if !MODEL_ID_PATTERN.is_match(id) {
        return Err(ModelValidationError::InvalidIdFormat { id: id.to_string() });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_model_ids() {
        assert!(validate_model_id("bidaf").is_ok());
        assert!(validate_model_id("bidaf-elmo").is_ok());
        assert!(validate_model_id("semantic-role-labeling").is_ok());
        assert!(validate_model_id("a").is_ok());
    }

    #[test]
    fn test_empty_model_id() {
        assert_eq!(validate_model_id(""), Err(ModelValidationError::EmptyId));
    }

    #[test]
    fn test_model_id_too_long() {
        let long_id = "a".repeat(MAX_MODEL_ID_LENGTH + 1);
        assert!(matches!(
            validate_model_id(&long_id),
            Err(ModelValidationError::IdTooLong { .. })
        ));
    }

    #[test]
    fn test_invalid_model_id_format() {
        assert!(validate_model_id("-bidaf").is_err());
        assert!(validate_model_id("bidaf-").is_err());
        assert!(validate_model_id("Bidaf").is_err());
        assert!(validate_model_id("bidaf_elmo").is_err());
        assert!(validate_model_id("model-cards/").is_err());
    }
}
