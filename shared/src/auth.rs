//! Shared-secret authentication.

use lambda_http::http::HeaderMap;

use crate::{Error, Result};

/// Header carrying the caller's shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Check the `x-api-key` header against the configured secret.
///
/// With no secret configured every request passes.
pub fn verify_api_key(expected: Option<&str>, headers: &HeaderMap) -> Result<()> {
    let Some(expected) = expected else {
        return Ok(());
    };

    let provided = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty());

    match provided {
        Some(value) if value == expected => Ok(()),
        _ => Err(Error::Unauthorized),
    }
}
