use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{build_prompt, parse_completion};
use crate::models::{
    AnalyzeResponse, ErrorResponse, HealthResponse, ParseCompletionRequest, PromptPreviewResponse,
    RecommendationRequest,
};
use crate::services::{CompletionError, Recommender};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(analyze))
        .route("/recommendations/parse", web::post().to(parse))
        .route("/recommendations/prompt", web::post().to(preview_prompt));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let configured = state.recommender.is_configured();
    let status = if configured { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        completion_configured: configured,
    })
}

/// Generate recommendations
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "health": { "stepCount": 8432, "activeCalories": 420.0, "workoutMinutes": 35, "timestamp": "..." },
///   "recentWorkouts": [],
///   "dailyTrends": [],
///   "preferences": ["Running"],
///   "candidateActivities": []
/// }
/// ```
async fn analyze(
    state: web::Data<AppState>,
    req: web::Json<RecommendationRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendation request: {}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.recommender.analyze_or_fallback(&req).await {
        Ok(result) => {
            let response = AnalyzeResponse {
                analysis_id: uuid::Uuid::new_v4(),
                source: result.source,
                generated_at: chrono::Utc::now(),
                recommendations: result.response,
            };

            tracing::info!(
                "Returning {} suggestions ({:?}) for analysis {}",
                response.recommendations.suggestions.len(),
                response.source,
                response.analysis_id
            );

            HttpResponse::Ok().json(response)
        }
        Err(CompletionError::MissingCredential) => {
            HttpResponse::ServiceUnavailable().json(ErrorResponse {
                error: "Completion provider not configured".to_string(),
                message: CompletionError::MissingCredential.to_string(),
                status_code: 503,
            })
        }
        Err(e) => {
            tracing::error!("Recommendation request failed: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Completion request failed".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
    }
}

/// Parse raw completion text into a recommendation set
///
/// POST /api/v1/recommendations/parse
async fn parse(req: web::Json<ParseCompletionRequest>) -> impl Responder {
    HttpResponse::Ok().json(parse_completion(&req.text))
}

/// Show the prompt that would be sent for a request
///
/// POST /api/v1/recommendations/prompt
async fn preview_prompt(req: web::Json<RecommendationRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let prompt = build_prompt(&req);
    HttpResponse::Ok().json(PromptPreviewResponse {
        length: prompt.chars().count(),
        prompt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{CompletionProvider, Recommender};
    use actix_web::{test, App};
    use async_trait::async_trait;

    struct Unconfigured;

    #[async_trait]
    impl CompletionProvider for Unconfigured {
        async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
            Err(CompletionError::MissingCredential)
        }

        fn is_configured(&self) -> bool {
            false
        }
    }

    fn state(fallback_on_error: bool) -> AppState {
        AppState {
            recommender: Arc::new(
                Recommender::new(Arc::new(Unconfigured)).with_fallback_on_error(fallback_on_error),
            ),
        }
    }

    fn body() -> serde_json::Value {
        serde_json::json!({
            "health": {
                "stepCount": 1200,
                "activeCalories": 90.0,
                "workoutMinutes": 0,
                "timestamp": "2026-10-18T08:00:00Z"
            }
        })
    }

    #[actix_web::test]
    async fn test_health_reports_degraded_without_key() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(true)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp["status"], "degraded");
        assert_eq!(resp["completionConfigured"], false);
    }

    #[actix_web::test]
    async fn test_analyze_falls_back_when_unconfigured() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(true)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/recommendations")
            .set_json(body())
            .to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp["source"], "fallback");
        assert_eq!(resp["suggestions"].as_array().unwrap().len(), 2);
        assert_eq!(resp["motivationalMessage"], "Every step counts! Keep moving forward.");
        assert!(resp["analysisId"].is_string());
    }

    #[actix_web::test]
    async fn test_analyze_reports_missing_key_without_fallback() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(false)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/recommendations")
            .set_json(body())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_parse_endpoint() {
        let app = test::init_service(App::new().configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/recommendations/parse")
            .set_json(serde_json::json!({ "text": "MOTIVATIONAL_MESSAGE: Keep going!" }))
            .to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp["motivationalMessage"], "Keep going!");
        assert_eq!(resp["tips"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_prompt_preview() {
        let app = test::init_service(App::new().configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/recommendations/prompt")
            .set_json(body())
            .to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let prompt = resp["prompt"].as_str().unwrap();
        assert!(prompt.contains("No recent workouts"));
        assert!(prompt.contains("No activities currently available"));
        assert_eq!(resp["length"], prompt.chars().count());
    }
}
