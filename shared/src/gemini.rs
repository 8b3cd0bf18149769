//! Gemini client for generating structured advisory copy.
//!
//! Only the non-streaming `generateContent` call is used. The handler makes a
//! single attempt per request, so there is no retry or timeout policy here.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::advice;
use crate::{Config, Error, Result};

/// Sampling temperature for advisory copy.
pub const ADVICE_TEMPERATURE: f32 = 0.4;

/// Output token ceiling for advisory copy.
pub const ADVICE_MAX_OUTPUT_TOKENS: i32 = 700;

/// Generation settings for one model call.
#[derive(Debug, Clone)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_output_tokens: i32,
    /// JSON Schema the response must follow; also switches the MIME type to JSON
    pub response_schema: Option<Value>,
}

impl GenerationParams {
    /// Conservative settings with the advice schema attached.
    pub fn for_advice() -> Self {
        Self {
            temperature: ADVICE_TEMPERATURE,
            max_output_tokens: ADVICE_MAX_OUTPUT_TOKENS,
            response_schema: Some(advice::response_schema()),
        }
    }
}

/// Text generation backend.
#[async_trait]
pub trait AdviceGenerator: Send + Sync {
    /// Returns the model's raw text for `prompt`.
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String>;
}

/// Gemini REST client.
pub struct GeminiClient {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(
        client: Client,
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Build a client from configuration, or `None` when no credential is set.
    pub fn from_config(client: Client, config: &Config) -> Option<Self> {
        config.gemini_api_key.as_ref().map(|key| {
            Self::new(
                client,
                config.gemini_api_base.clone(),
                key.clone(),
                config.gemini_model.clone(),
            )
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn api_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

#[async_trait]
impl AdviceGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                    thought: None,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: params.temperature,
                max_output_tokens: params.max_output_tokens,
                response_mime_type: params
                    .response_schema
                    .as_ref()
                    .map(|_| "application/json".to_string()),
                response_json_schema: params.response_schema.clone(),
            },
        };

        tracing::debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(Error::Generation("Gemini rate limited".to_string()));
            }

            return Err(Error::Generation(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(format!("Failed to parse Gemini response: {}", e)))?;

        if let Some(usage) = &api_response.usage_metadata {
            tracing::debug!(
                input_tokens = usage.prompt_token_count.unwrap_or(0),
                output_tokens = usage.candidates_token_count.unwrap_or(0),
                "Gemini usage"
            );
        }

        if let Some(reason) = api_response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(Error::Generation(format!("Prompt blocked: {}", reason)));
        }

        let candidate = api_response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| Error::Generation("Gemini returned no candidates".to_string()))?;

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(Error::Generation("Response blocked by safety filter".to_string()));
        }

        Ok(candidate_text(candidate.content))
    }
}

/// Concatenate the answer parts of a candidate, skipping thought summaries.
fn candidate_text(content: Option<Content>) -> String {
    content
        .map(|c| {
            c.parts
                .into_iter()
                .filter(|p| !p.thought.unwrap_or(false))
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default()
}

// Gemini wire types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_json_schema: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<i32>,
    candidates_token_count: Option<i32>,
}
