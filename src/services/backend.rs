use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::BackendSettings;
use crate::models::tolerant::list_payload;
use crate::models::ErrorEnvelope;
use crate::services::token::TokenStore;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur when calling the Lume backend
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not signed in: no auth token available")]
    Unauthenticated,

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Build an upstream error from a non-2xx response body.
    ///
    /// Prefers the backend's `{statusCode, message}` envelope and falls back
    /// to the raw body text.
    pub fn from_response(status: u16, body: &str) -> Self {
        let decoded = serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .map(|envelope| envelope.message)
            .filter(|message| !message.is_empty());

        let message = decoded.unwrap_or_else(|| {
            let text = body.trim();
            if text.is_empty() {
                format!("Request failed with status {}", status)
            } else {
                text.to_string()
            }
        });

        ApiError::Upstream { status, message }
    }

    /// Message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthenticated => "Please sign in to continue.".to_string(),
            ApiError::Transport(_) => {
                "Network error. Check your connection and try again.".to_string()
            }
            ApiError::Upstream { message, .. } => message.clone(),
            ApiError::InvalidResponse(_) => "Unexpected response from the server.".to_string(),
            ApiError::InvalidRequest(message) => message.clone(),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::InvalidRequest(errors.to_string())
    }
}

/// Whether an endpoint needs the bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    Required,
    Anonymous,
}

/// Lume backend API client
///
/// Endpoint wrappers live next to their feature:
/// - activities (`services::activities`)
/// - chats (`services::chats`)
/// - users and auth (`services::users`)
/// - quick-match (`services::quick_match`)
pub struct BackendClient {
    base_url: String,
    client: Client,
    tokens: Arc<dyn TokenStore>,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, tokens, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenStore>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
            tokens,
        })
    }

    pub fn from_settings(settings: &BackendSettings, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        Self::with_timeout(
            settings.base_url.clone(),
            tokens,
            Duration::from_secs(settings.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Start a request, attaching the bearer token when `auth` requires one.
    ///
    /// Fails with `Unauthenticated` before anything is sent if no token is stored.
    pub(crate) fn request(&self, method: Method, path: &str, auth: Auth) -> Result<RequestBuilder, ApiError> {
        tracing::debug!("{} {}", method, path);

        let builder = self.client.request(method, self.url(path));

        match auth {
            Auth::Required => {
                let token = self
                    .tokens
                    .auth_token()
                    .filter(|token| !token.is_empty())
                    .ok_or(ApiError::Unauthenticated)?;
                Ok(builder.bearer_auth(token))
            }
            Auth::Anonymous => Ok(builder),
        }
    }

    /// Send and decode a 2xx JSON body into `T`
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let body = self.dispatch(builder).await?.text().await?;

        serde_json::from_str(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }

    /// Send and decode a list that may be a bare array or wrapped under one of `keys`
    pub(crate) async fn send_list<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        keys: &[&str],
    ) -> Result<Vec<T>, ApiError> {
        let body: Value = self.send_json(builder).await?;

        list_payload(body, keys)
            .into_iter()
            .map(|item| {
                serde_json::from_value(item)
                    .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse list item: {}", e)))
            })
            .collect()
    }

    /// Send and decode the body if there is one; an empty 2xx body is `None`
    pub(crate) async fn send_optional<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<Option<T>, ApiError> {
        let body = self.dispatch(builder).await?.text().await?;

        if body.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str(&body) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::debug!("Ignoring undecodable success body: {}", e);
                Ok(None)
            }
        }
    }

    /// Send and discard any 2xx body
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.dispatch(builder).await?;
        Ok(())
    }

    async fn dispatch(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!("Backend request failed: {} - {}", status, body);

        Err(ApiError::from_response(status.as_u16(), &body))
    }
}

/// Percent-encode a path segment
pub(crate) fn segment(id: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(id)
}
