//! Generative-model client. The rest of the crate talks to an abstract
//! [`GenerativeModel`]; the concrete implementation calls Gemini's
//! `generateContent` API over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Sends a single prompt and returns the model's text reply.
    async fn generate_content(&self, prompt: &str) -> AppResult<String>;
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiTextPart>,
}

#[derive(Serialize)]
struct GeminiTextPart {
    text: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: String,
}

// ============================================================================
// Gemini implementation
// ============================================================================

pub struct GeminiModel {
    client: Client,
    api_key: SecretString,
    model_name: String,
}

impl GeminiModel {
    pub fn new(api_key: SecretString, model_name: &str) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            model_name: model_name.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", GEMINI_API_BASE, self.model_name)
    }
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    async fn generate_content(&self, prompt: &str) -> AppResult<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiTextPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.expose_secret())])
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::AiError(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Gemini API returned {}: {}", status, body);
            return Err(AppError::AiError(format!(
                "model API returned status {}",
                status
            )));
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AppError::AiError(format!("unreadable model response: {}", e)))?;

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AppError::AiError("model returned no candidates".to_string()))?;

        let text = candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect::<Vec<_>>()
            .join("");

        Ok(text)
    }
}

/// Stand-in used when no API key is configured. Every call fails with the
/// same error the handlers surface for a missing model.
pub struct DisabledModel;

#[async_trait]
impl GenerativeModel for DisabledModel {
    async fn generate_content(&self, _prompt: &str) -> AppResult<String> {
        Err(AppError::AiError("AI model not available".to_string()))
    }
}
