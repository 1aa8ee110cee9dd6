//! Permalink slugs: URL-safe base64 of the decimal row id

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlugError {
    #[error("Slug is not valid base64")]
    Encoding,

    #[error("Slug does not encode an id")]
    NotAnId,
}

pub fn int_to_slug(id: u64) -> String {
    URL_SAFE.encode(id.to_string())
}

pub fn parse_slug(slug: &str) -> Result<u64, SlugError> {
    let bytes = URL_SAFE.decode(slug).map_err(|_| SlugError::Encoding)?;
    let text = std::str::from_utf8(&bytes).map_err(|_| SlugError::NotAnId)?;
    text.trim().parse::<u64>().map_err(|_| SlugError::NotAnId)
}

/// Id encoded by `slug`, or `None` when the slug is malformed
pub fn slug_to_int(slug: &str) -> Option<u64> {
    match parse_slug(slug) {
        Ok(id) => Some(id),
        Err(e) => {
            warn!(slug = %slug, error = %e, "Unable to interpret slug");
            None
        }
    }
}
