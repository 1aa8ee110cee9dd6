//! Detection of old-style permalink URLs
//!
//! Old permalinks looked like `/reading-comprehension/MTA1Mjc3NA==`, where the
//! last segment is a base64 encoded row id. The same segment now holds a model
//! id, so a segment is a legacy permalink when it is not one of the demo's
//! models and decodes to an integer.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub fn is_legacy_permalink(segment: &str, model_ids: &[&str]) -> bool {
    if model_ids.contains(&segment) {
        return false;
    }

    let Ok(bytes) = STANDARD.decode(segment) else {
        return false;
    };

    std::str::from_utf8(&bytes)
        .ok()
        .map(|s| s.trim().parse::<u64>().is_ok())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_permalink() {
        assert!(is_legacy_permalink("MTA1Mjc3NA==", &["bidaf"]));
    }

    #[test]
    fn test_model_id_is_not_legacy() {
        // "bidaf" is not valid base64 anyway, but model ids win regardless
        assert!(!is_legacy_permalink("bidaf", &["bidaf"]));
        assert!(!is_legacy_permalink("MTA1Mjc3NA==", &["MTA1Mjc3NA=="]));
    }

    #[test]
    fn test_non_numeric_payload() {
        // base64 of "hello"
        assert!(!is_legacy_permalink("aGVsbG8=", &[]));
        assert!(!is_legacy_permalink("not base64!", &[]));
    }
}
