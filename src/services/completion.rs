use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::{CompletionSettings, GenerationSettings};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Errors that can occur when requesting a completion
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("No API key configured for the completion provider")]
    MissingCredential,

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Completion provider returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Completion provider returned no text")]
    EmptyCompletion,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl CompletionError {
    /// Whether the fallback set should always stand in for this failure
    pub fn is_fallback_eligible(&self) -> bool {
        matches!(self, CompletionError::EmptyCompletion | CompletionError::InvalidResponse(_))
    }
}

/// Source of completion text for a prompt
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Single-shot completion. Failures are returned once, never retried.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Whether the provider has the credentials it needs
    fn is_configured(&self) -> bool {
        true
    }
}

/// `generateContent` request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl From<GenerationSettings> for GenerationConfig {
    fn from(settings: GenerationSettings) -> Self {
        Self {
            temperature: settings.temperature,
            top_k: settings.top_k,
            top_p: settings.top_p,
            max_output_tokens: settings.max_output_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SafetySetting {
    pub category: &'static str,
    pub threshold: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
    #[serde(default)]
    safety_ratings: Vec<SafetyRating>,
}

#[derive(Debug, Deserialize)]
struct SafetyRating {
    category: String,
    probability: String,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderError,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    message: String,
}

/// Gemini `generateContent` client
pub struct GeminiClient {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    generation: GenerationSettings,
    client: Client,
}

impl GeminiClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        generation: GenerationSettings,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
            generation,
            client,
        })
    }

    pub fn from_settings(settings: &CompletionSettings) -> Result<Self, CompletionError> {
        Self::new(
            settings.endpoint.clone(),
            settings.model.clone(),
            settings.api_key.clone(),
            settings.generation,
            Duration::from_secs(settings.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        )
    }

    /// Wrap a prompt in the provider's request envelope
    pub fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: self.generation.into(),
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: SAFETY_THRESHOLD,
                })
                .collect(),
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }
}

#[async_trait]
impl CompletionProvider for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let api_key = self.api_key().ok_or(CompletionError::MissingCredential)?;
        let url = self.url();

        tracing::debug!("Requesting completion from {} ({} prompt chars)", url, prompt.len());

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&self.build_request(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ProviderErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            tracing::error!("Completion request failed: {} - {}", status, message);
            return Err(CompletionError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| CompletionError::InvalidResponse(format!("Failed to parse completion: {}", e)))?;

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or(CompletionError::EmptyCompletion)?;

        if let Some(reason) = &candidate.finish_reason {
            tracing::debug!("Completion finished: {}", reason);
        }
        for rating in &candidate.safety_ratings {
            tracing::trace!("Safety rating {}: {}", rating.category, rating.probability);
        }

        let text: String = candidate
            .content
            .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(CompletionError::EmptyCompletion);
        }

        Ok(text)
    }

    fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }
}
