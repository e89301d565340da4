use std::sync::Arc;

use crate::core::{build_prompt, fallback_response, parse_completion};
use crate::models::{RecommendationRequest, RecommendationResponse, ResponseSource};
use crate::services::completion::{CompletionError, CompletionProvider};

/// Recommendation set tagged with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub source: ResponseSource,
    pub response: RecommendationResponse,
}

/// Runs the pipeline: build prompt, request completion, parse.
pub struct Recommender {
    provider: Arc<dyn CompletionProvider>,
    fallback_on_error: bool,
}

impl Recommender {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            fallback_on_error: true,
        }
    }

    /// When disabled, only empty or undecodable completions fall back;
    /// transport, upstream and credential failures are returned to the caller.
    pub fn with_fallback_on_error(mut self, fallback_on_error: bool) -> Self {
        self.fallback_on_error = fallback_on_error;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_configured()
    }

    /// Build the prompt, request one completion and parse it.
    /// Errors from the provider are returned unchanged.
    pub async fn analyze(&self, request: &RecommendationRequest) -> Result<RecommendationResponse, CompletionError> {
        let prompt = build_prompt(request);
        tracing::debug!(
            "Built prompt ({} chars, {} candidate activities)",
            prompt.len(),
            request.candidate_activities.len()
        );

        let text = self.provider.complete(&prompt).await?;
        let response = parse_completion(&text);

        tracing::info!(
            "Parsed completion into {} suggestions and {} tips",
            response.suggestions.len(),
            response.tips.len()
        );

        Ok(response)
    }

    /// Like [`analyze`](Self::analyze), but substitutes the fallback set when
    /// the failure is one that falls back under the current policy.
    pub async fn analyze_or_fallback(&self, request: &RecommendationRequest) -> Result<Recommendation, CompletionError> {
        match self.analyze(request).await {
            Ok(response) => Ok(Recommendation {
                source: ResponseSource::Completion,
                response,
            }),
            Err(e) if self.falls_back_on(&e) => {
                tracing::warn!("Completion failed, using fallback recommendations: {}", e);
                Ok(Recommendation {
                    source: ResponseSource::Fallback,
                    response: fallback_response(),
                })
            }
            Err(e) => Err(e),
        }
    }

    fn falls_back_on(&self, error: &CompletionError) -> bool {
        self.fallback_on_error || error.is_fallback_eligible()
    }
}
