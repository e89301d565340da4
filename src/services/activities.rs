use reqwest::Method;
use std::sync::Arc;
use validator::Validate;

use crate::models::{Activity, CandidateActivity, CreateActivityRequest};
use crate::services::backend::{segment, ApiError, Auth, BackendClient};

const LIST_KEYS: &[&str] = &["activities", "data", "items"];

impl BackendClient {
    /// List all activities
    pub async fn list_activities(&self) -> Result<Vec<Activity>, ApiError> {
        let request = self.request(Method::GET, "/activities", Auth::Required)?;
        let activities: Vec<Activity> = self.send_list(request, LIST_KEYS).await?;
        tracing::debug!("Fetched {} activities", activities.len());
        Ok(activities)
    }

    /// List activities the signed-in user hosts or joined
    pub async fn my_activities(&self) -> Result<Vec<Activity>, ApiError> {
        let request = self.request(Method::GET, "/activities/my-activities", Auth::Required)?;
        self.send_list(request, LIST_KEYS).await
    }

    /// Create an activity.
    ///
    /// Any 2xx (including 201) is success. The created record is returned
    /// when the backend echoes it back.
    pub async fn create_activity(&self, activity: &CreateActivityRequest) -> Result<Option<Activity>, ApiError> {
        activity.validate()?;

        let request = self
            .request(Method::POST, "/activities", Auth::Required)?
            .json(activity);
        self.send_optional(request).await
    }

    pub async fn delete_activity(&self, activity_id: &str) -> Result<(), ApiError> {
        let path = format!("/activities/{}", segment(activity_id));
        let request = self.request(Method::DELETE, &path, Auth::Required)?;
        self.send_empty(request).await
    }
}

/// State behind the activities screen: all activities plus the user's own.
///
/// Failures are kept as display strings in `error_message` instead of being
/// returned, and a successful mutation re-fetches both lists.
pub struct ActivityBoard {
    client: Arc<BackendClient>,
    all: Vec<Activity>,
    mine: Vec<Activity>,
    error_message: Option<String>,
}

impl ActivityBoard {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self {
            client,
            all: Vec::new(),
            mine: Vec::new(),
            error_message: None,
        }
    }

    pub fn all(&self) -> &[Activity] {
        &self.all
    }

    pub fn mine(&self) -> &[Activity] {
        &self.mine
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// All activities in the shape the recommendation prompt expects
    pub fn candidates(&self) -> Vec<CandidateActivity> {
        self.all.iter().map(Activity::to_candidate).collect()
    }

    /// Re-fetch both lists concurrently. A failed list keeps its previous contents.
    pub async fn refresh(&mut self) {
        let (all, mine) = tokio::join!(self.client.list_activities(), self.client.my_activities());

        self.error_message = None;

        match all {
            Ok(activities) => self.all = activities,
            Err(e) => self.record_error("list activities", e),
        }
        match mine {
            Ok(activities) => self.mine = activities,
            Err(e) => self.record_error("list my activities", e),
        }
    }

    /// Create an activity and refresh both lists on success
    pub async fn create(&mut self, activity: &CreateActivityRequest) -> bool {
        match self.client.create_activity(activity).await {
            Ok(_) => {
                tracing::info!("Created activity '{}'", activity.title);
                self.refresh().await;
                true
            }
            Err(e) => {
                self.record_error("create activity", e);
                false
            }
        }
    }

    /// Delete an activity and refresh both lists on success
    pub async fn delete(&mut self, activity_id: &str) -> bool {
        match self.client.delete_activity(activity_id).await {
            Ok(()) => {
                tracing::info!("Deleted activity {}", activity_id);
                self.refresh().await;
                true
            }
            Err(e) => {
                self.record_error("delete activity", e);
                false
            }
        }
    }

    fn record_error(&mut self, action: &str, error: ApiError) {
        tracing::warn!("Failed to {}: {}", action, error);
        self.error_message = Some(error.user_message());
    }
}
