//! API request and response types

pub mod error;
pub mod json;

pub use error::{ApiError, ApiErrorResponse, GENERIC_ERROR_MESSAGE};
pub use json::Json;
