use reqwest::Method;
use validator::Validate;

use crate::models::{Chat, ChatMessage, CreateChatRequest, SendMessageRequest};
use crate::services::backend::{segment, ApiError, Auth, BackendClient};

impl BackendClient {
    pub async fn list_chats(&self) -> Result<Vec<Chat>, ApiError> {
        let request = self.request(Method::GET, "/chats", Auth::Required)?;
        self.send_list(request, &["chats", "data"]).await
    }

    pub async fn messages(&self, chat_id: &str) -> Result<Vec<ChatMessage>, ApiError> {
        let path = format!("/chats/{}/messages", segment(chat_id));
        let request = self.request(Method::GET, &path, Auth::Required)?;
        self.send_list(request, &["messages", "data"]).await
    }

    pub async fn send_message(&self, chat_id: &str, content: &str) -> Result<ChatMessage, ApiError> {
        let body = SendMessageRequest {
            content: content.to_string(),
        };
        body.validate()?;

        let path = format!("/chats/{}/messages", segment(chat_id));
        let request = self.request(Method::POST, &path, Auth::Required)?.json(&body);
        self.send_json(request).await
    }

    /// Mark every message in a chat as read
    pub async fn mark_read(&self, chat_id: &str) -> Result<(), ApiError> {
        let path = format!("/chats/{}/read", segment(chat_id));
        let request = self.request(Method::PATCH, &path, Auth::Required)?;
        self.send_empty(request).await
    }

    /// Open a chat with another user (the backend returns the existing one if present)
    pub async fn create_chat(&self, participant_id: &str) -> Result<Chat, ApiError> {
        let body = CreateChatRequest {
            participant_id: participant_id.to_string(),
        };
        body.validate()?;

        let request = self.request(Method::POST, "/chats", Auth::Required)?.json(&body);
        self.send_json(request).await
    }

    pub async fn delete_chat(&self, chat_id: &str) -> Result<(), ApiError> {
        let path = format!("/chats/{}", segment(chat_id));
        let request = self.request(Method::DELETE, &path, Auth::Required)?;
        self.send_empty(request).await
    }

    pub async fn delete_message(&self, message_id: &str) -> Result<(), ApiError> {
        let path = format!("/chats/messages/{}", segment(message_id));
        let request = self.request(Method::DELETE, &path, Auth::Required)?;
        self.send_empty(request).await
    }
}
