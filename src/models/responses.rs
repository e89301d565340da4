use serde::{Deserialize, Serialize};
use crate::models::domain::{RecommendationResponse, ResponseSource};

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub analysis_id: uuid::Uuid,
    pub source: ResponseSource,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    #[serde(flatten)]
    pub recommendations: RecommendationResponse,
}

/// Assembled prompt, returned for previewing what the model will see
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptPreviewResponse {
    pub prompt: String,
    pub length: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "completionConfigured")]
    pub completion_configured: bool,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
