use reqwest::multipart::{Form, Part};
use reqwest::Method;
use validator::Validate;

use crate::models::{
    Acknowledgement, ChangePasswordRequest, UpdateProfileRequest, UserProfile, UserSummary,
    VerificationEmailRequest,
};
use crate::services::backend::{segment, ApiError, Auth, BackendClient};

const PROFILE_IMAGE_FIELD: &str = "image";
const PROFILE_IMAGE_FILE_NAME: &str = "profile.jpg";
const PROFILE_IMAGE_MIME: &str = "image/jpeg";

impl BackendClient {
    /// Search users by name
    pub async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>, ApiError> {
        let path = format!("/users/search?q={}", urlencoding::encode(query));
        let request = self.request(Method::GET, &path, Auth::Required)?;
        let users: Vec<UserSummary> = self.send_list(request, &["users", "data", "results"]).await?;
        tracing::debug!("User search returned {} results", users.len());
        Ok(users)
    }

    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        let request = self.request(Method::GET, "/users/profile", Auth::Required)?;
        self.send_json(request).await
    }

    pub async fn update_profile(&self, user_id: &str, update: &UpdateProfileRequest) -> Result<UserProfile, ApiError> {
        let path = format!("/users/{}", segment(user_id));
        let request = self.request(Method::PATCH, &path, Auth::Required)?.json(update);
        self.send_json(request).await
    }

    /// Upload a JPEG profile image as multipart form data
    pub async fn upload_profile_image(&self, user_id: &str, jpeg: Vec<u8>) -> Result<UserProfile, ApiError> {
        if jpeg.is_empty() {
            return Err(ApiError::InvalidRequest("Image data is empty".to_string()));
        }

        let part = Part::bytes(jpeg)
            .file_name(PROFILE_IMAGE_FILE_NAME)
            .mime_str(PROFILE_IMAGE_MIME)?;
        let form = Form::new().part(PROFILE_IMAGE_FIELD, part);

        let path = format!("/users/{}/profile-image", segment(user_id));
        let request = self.request(Method::PATCH, &path, Auth::Required)?.multipart(form);
        self.send_json(request).await
    }

    /// Ask the backend to (re)send the verification email. No token needed.
    pub async fn send_verification_email(&self, email: &str) -> Result<Acknowledgement, ApiError> {
        let body = VerificationEmailRequest {
            email: email.to_string(),
        };
        body.validate()?;

        let request = self
            .request(Method::POST, "/auth/send-verification-email", Auth::Anonymous)?
            .json(&body);
        self.send_json(request).await
    }

    pub async fn change_password(&self, user_id: &str, change: &ChangePasswordRequest) -> Result<Acknowledgement, ApiError> {
        change.validate()?;

        let path = format!("/users/{}/change-password", segment(user_id));
        let request = self.request(Method::PATCH, &path, Auth::Required)?.json(change);
        self.send_json(request).await
    }
}
