use reqwest::Method;
use validator::Validate;

use crate::models::{LikeResult, Match, QuickMatchActionRequest, QuickMatchProfile, UserSummary};
use crate::services::backend::{ApiError, Auth, BackendClient};

impl BackendClient {
    /// Profiles to swipe through
    pub async fn quick_match_profiles(&self) -> Result<Vec<QuickMatchProfile>, ApiError> {
        let request = self.request(Method::GET, "/quick-match/profiles", Auth::Required)?;
        self.send_list(request, &["profiles", "users", "data"]).await
    }

    pub async fn like(&self, target_user_id: &str) -> Result<LikeResult, ApiError> {
        let body = action(target_user_id)?;
        let request = self
            .request(Method::POST, "/quick-match/like", Auth::Required)?
            .json(&body);
        self.send_json(request).await
    }

    pub async fn pass(&self, target_user_id: &str) -> Result<(), ApiError> {
        let body = action(target_user_id)?;
        let request = self
            .request(Method::POST, "/quick-match/pass", Auth::Required)?
            .json(&body);
        self.send_empty(request).await
    }

    pub async fn matches(&self) -> Result<Vec<Match>, ApiError> {
        let request = self.request(Method::GET, "/quick-match/matches", Auth::Required)?;
        self.send_list(request, &["matches", "data"]).await
    }

    /// Users who liked the signed-in user
    pub async fn likes_received(&self) -> Result<Vec<UserSummary>, ApiError> {
        let request = self.request(Method::GET, "/quick-match/likes-received", Auth::Required)?;
        self.send_list(request, &["likes", "users", "data"]).await
    }
}

fn action(target_user_id: &str) -> Result<QuickMatchActionRequest, ApiError> {
    let body = QuickMatchActionRequest {
        target_user_id: target_user_id.to_string(),
    };
    body.validate()?;
    Ok(body)
}
