//! AWS Secrets Manager integration.

use aws_sdk_secretsmanager::Client as SecretsClient;
use std::collections::HashMap;
use std::sync::OnceLock;
use tokio::sync::RwLock;

use crate::{Error, Result};

/// JSON keys checked, in order, when the secret is stored as an object.
const API_KEY_FIELDS: [&str; 2] = ["apiKey", "GEMINI_API_KEY"];

/// Gemini keys already resolved in this container, by secret ARN.
static API_KEY_CACHE: OnceLock<RwLock<HashMap<String, String>>> = OnceLock::new();

fn api_key_cache() -> &'static RwLock<HashMap<String, String>> {
    API_KEY_CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Resolve the Gemini credential stored under `secret_arn`.
///
/// The parsed key is cached, so warm invocations never call Secrets Manager.
pub async fn get_gemini_api_key(client: &SecretsClient, secret_arn: &str) -> Result<String> {
    if let Some(key) = api_key_cache().read().await.get(secret_arn) {
        return Ok(key.clone());
    }

    let response = client
        .get_secret_value()
        .secret_id(secret_arn)
        .send()
        .await
        .map_err(|e| Error::Aws(format!("Failed to fetch Gemini API key secret: {}", e)))?;

    let secret_string = response
        .secret_string()
        .ok_or_else(|| Error::Aws("Gemini API key secret is binary, expected a string".to_string()))?;

    let key = parse_api_key(secret_string)?;

    api_key_cache()
        .write()
        .await
        .insert(secret_arn.to_string(), key.clone());

    Ok(key)
}

/// Extract an API key from a secret string.
///
/// Accepts either the bare key or a JSON object carrying it under one of
/// [`API_KEY_FIELDS`].
pub fn parse_api_key(secret_string: &str) -> Result<String> {
    let trimmed = secret_string.trim();

    if trimmed.starts_with('{') {
        let value: serde_json::Value = serde_json::from_str(trimmed)
            .map_err(|e| Error::Aws(format!("Failed to parse API key secret: {}", e)))?;

        return API_KEY_FIELDS
            .iter()
            .find_map(|field| value.get(field).and_then(|v| v.as_str()))
            .filter(|key| !key.is_empty())
            .map(String::from)
            .ok_or_else(|| Error::Aws("API key secret has no apiKey field".to_string()));
    }

    if trimmed.is_empty() {
        return Err(Error::Aws("API key secret is empty".to_string()));
    }

    Ok(trimmed.to_string())
}
