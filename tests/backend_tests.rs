// Integration tests for the Lume backend clients against a mock server

use chrono::{TimeZone, Utc};
use lume_coach::models::{ChangePasswordRequest, CreateActivityRequest, UpdateProfileRequest};
use lume_coach::services::{
    ActivityBoard, ApiError, BackendClient, SharedTokenStore, StaticTokenStore, TokenStore,
};
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;

const TOKEN: &str = "test-token";

fn create_client(base_url: &str) -> BackendClient {
    BackendClient::new(base_url, Arc::new(StaticTokenStore::new(TOKEN))).unwrap()
}

fn create_signed_out_client(base_url: &str) -> BackendClient {
    BackendClient::new(base_url, Arc::new(StaticTokenStore::signed_out())).unwrap()
}

fn create_activity_request() -> CreateActivityRequest {
    CreateActivityRequest {
        title: "Sunday Long Run".to_string(),
        description: Some("Easy 15k along the river".to_string()),
        sport: "Running".to_string(),
        icon: Some("🏃".to_string()),
        location: "Riverside Park".to_string(),
        date: Utc.with_ymd_and_hms(2026, 10, 25, 8, 0, 0).unwrap(),
        max_participants: 8,
        skill_level: "Intermediate".to_string(),
    }
}

#[tokio::test]
async fn test_unauthenticated_fails_before_network() {
    let mut server = Server::new_async().await;
    let profile = server.mock("GET", "/users/profile").expect(0).create_async().await;
    let chats = server.mock("GET", "/chats").expect(0).create_async().await;
    let activities = server.mock("POST", "/activities").expect(0).create_async().await;

    let client = create_signed_out_client(&server.url());

    assert!(matches!(client.profile().await, Err(ApiError::Unauthenticated)));
    assert!(matches!(client.list_chats().await, Err(ApiError::Unauthenticated)));
    assert!(matches!(
        client.create_activity(&create_activity_request()).await,
        Err(ApiError::Unauthenticated)
    ));

    profile.assert_async().await;
    chats.assert_async().await;
    activities.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let client = create_client("http://127.0.0.1:1");

    let err = client.list_chats().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.user_message(), "Network error. Check your connection and try again.");
}

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/users/profile")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_body(
            json!({
                "user": {
                    "_id": "u1",
                    "username": "mara",
                    "email": "mara@example.com",
                    "isEmailVerified": true,
                    "sports": ["Padel", "Running"]
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let profile = create_client(&server.url()).profile().await.unwrap();

    assert_eq!(profile.id, "u1");
    assert_eq!(profile.username, "mara");
    assert!(profile.email_verified);
    assert_eq!(profile.sports, vec!["Padel".to_string(), "Running".to_string()]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_shared_token_store_updates_are_seen() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/chats")
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let tokens = SharedTokenStore::new();
    let client = BackendClient::new(server.url(), Arc::new(tokens.clone()) as Arc<dyn TokenStore>).unwrap();

    assert!(matches!(client.list_chats().await, Err(ApiError::Unauthenticated)));

    tokens.set_token("fresh");
    assert!(client.list_chats().await.unwrap().is_empty());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_envelope_is_decoded() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("DELETE", "/activities/a1")
        .with_status(403)
        .with_body(r#"{"statusCode":403,"message":"Only the host can delete this activity","error":"Forbidden"}"#)
        .create_async()
        .await;

    let err = create_client(&server.url()).delete_activity("a1").await.unwrap_err();

    match &err {
        ApiError::Upstream { status, message } => {
            assert_eq!(*status, 403);
            assert_eq!(message, "Only the host can delete this activity");
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
    assert_eq!(err.user_message(), "Only the host can delete this activity");
}

#[tokio::test]
async fn test_validation_message_list_is_joined() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("PATCH", "/users/u1")
        .with_status(400)
        .with_body(r#"{"statusCode":400,"message":["username too short","bio too long"],"error":"Bad Request"}"#)
        .create_async()
        .await;

    let update = UpdateProfileRequest {
        username: Some("x".to_string()),
        ..Default::default()
    };
    let err = create_client(&server.url()).update_profile("u1", &update).await.unwrap_err();

    assert_eq!(err.user_message(), "username too short, bio too long");
}

#[tokio::test]
async fn test_error_without_envelope_uses_raw_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/quick-match/matches")
        .with_status(502)
        .with_body("upstream timeout")
        .create_async()
        .await;

    let err = create_client(&server.url()).matches().await.unwrap_err();
    assert!(matches!(err, ApiError::Upstream { status: 502, ref message } if message == "upstream timeout"));
}

#[tokio::test]
async fn test_user_search_tolerant_decoding() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/users/search")
        .match_query(Matcher::UrlEncoded("q".into(), "bob smith".into()))
        .with_status(200)
        .with_body(
            json!([
                { "_id": "abc", "username": "bob", "profileImageThumbnailUrl": "http://x" },
                { "id": "def", "name": "Bobby", "avatar": "http://y" }
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let users = create_client(&server.url()).search_users("bob smith").await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id, "abc");
    assert_eq!(users[0].name, "bob");
    assert_eq!(users[0].avatar.as_deref(), Some("http://x"));
    assert_eq!(users[1].name, "Bobby");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_wrapped_list_payload() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/chats/c1/messages")
        .with_status(200)
        .with_body(
            json!({
                "messages": [
                    { "_id": "m1", "chatId": "c1", "sender": { "_id": "u2", "username": "ana" }, "content": "Hi!", "isRead": true },
                    { "id": "m2", "chat": "c1", "sender": "u1", "text": "Hey" }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let messages = create_client(&server.url()).messages("c1").await.unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender_id, "u2");
    assert_eq!(messages[0].sender_name.as_deref(), Some("ana"));
    assert!(messages[0].is_read);
    assert_eq!(messages[1].sender_id, "u1");
    assert_eq!(messages[1].content, "Hey");
}

#[tokio::test]
async fn test_chat_operations_hit_expected_paths() {
    let mut server = Server::new_async().await;
    let send = server
        .mock("POST", "/chats/c1/messages")
        .match_body(Matcher::Json(json!({ "content": "See you at 7" })))
        .with_status(201)
        .with_body(r#"{"_id":"m9","chatId":"c1","sender":"u1","content":"See you at 7"}"#)
        .create_async()
        .await;
    let read = server.mock("PATCH", "/chats/c1/read").with_status(200).create_async().await;
    let create = server
        .mock("POST", "/chats")
        .match_body(Matcher::Json(json!({ "participantId": "u2" })))
        .with_status(201)
        .with_body(r#"{"_id":"c2","participants":[{"_id":"u1","username":"me"},{"_id":"u2","username":"ana"}]}"#)
        .create_async()
        .await;
    let delete_chat = server.mock("DELETE", "/chats/c2").with_status(204).create_async().await;
    let delete_message = server.mock("DELETE", "/chats/messages/m9").with_status(200).create_async().await;

    let client = create_client(&server.url());

    let message = client.send_message("c1", "See you at 7").await.unwrap();
    assert_eq!(message.id, "m9");
    client.mark_read("c1").await.unwrap();
    let chat = client.create_chat("u2").await.unwrap();
    assert_eq!(chat.participants.len(), 2);
    client.delete_chat("c2").await.unwrap();
    client.delete_message("m9").await.unwrap();

    send.assert_async().await;
    read.assert_async().await;
    create.assert_async().await;
    delete_chat.assert_async().await;
    delete_message.assert_async().await;
}

#[tokio::test]
async fn test_invalid_requests_fail_before_network() {
    let mut server = Server::new_async().await;
    let mock = server.mock("PATCH", Matcher::Any).expect(0).create_async().await;
    let client = create_client(&server.url());

    let change = ChangePasswordRequest {
        current_password: "old-secret".to_string(),
        new_password: "short".to_string(),
    };
    assert!(matches!(
        client.change_password("u1", &change).await,
        Err(ApiError::InvalidRequest(_))
    ));

    let mut activity = create_activity_request();
    activity.max_participants = 0;
    assert!(matches!(client.create_activity(&activity).await, Err(ApiError::InvalidRequest(_))));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_verification_email_is_anonymous() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/send-verification-email")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(json!({ "email": "new@example.com" })))
        .with_status(200)
        .with_body(r#"{"message":"Verification email sent"}"#)
        .create_async()
        .await;

    let ack = create_signed_out_client(&server.url())
        .send_verification_email("new@example.com")
        .await
        .unwrap();

    assert_eq!(ack.message, "Verification email sent");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_profile_image_upload_is_multipart() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PATCH", "/users/u1/profile-image")
        .match_header("content-type", Matcher::Regex("^multipart/form-data".into()))
        .match_body(Matcher::Regex(r#"name="image""#.into()))
        .with_status(200)
        .with_body(r#"{"_id":"u1","username":"mara","profileImageUrl":"http://img/u1.jpg"}"#)
        .create_async()
        .await;

    let profile = create_client(&server.url())
        .upload_profile_image("u1", b"fake-jpeg-bytes".to_vec())
        .await
        .unwrap();

    assert_eq!(profile.avatar.as_deref(), Some("http://img/u1.jpg"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_quick_match_like_and_pass() {
    let mut server = Server::new_async().await;
    let like = server
        .mock("POST", "/quick-match/like")
        .match_body(Matcher::Json(json!({ "targetUserId": "u7" })))
        .with_status(201)
        .with_body(r#"{"matched":true,"match":{"_id":"m1"}}"#)
        .create_async()
        .await;
    let pass = server
        .mock("POST", "/quick-match/pass")
        .match_body(Matcher::Json(json!({ "targetUserId": "u8" })))
        .with_status(201)
        .create_async()
        .await;
    let profiles = server
        .mock("GET", "/quick-match/profiles")
        .with_status(200)
        .with_body(r#"{"profiles":[{"userId":"u9","name":"Lia","age":29,"sportsPreferences":["Tennis"]}]}"#)
        .create_async()
        .await;

    let client = create_client(&server.url());

    let result = client.like("u7").await.unwrap();
    assert!(result.matched);
    assert_eq!(result.match_id.as_deref(), Some("m1"));

    client.pass("u8").await.unwrap();

    let cards = client.quick_match_profiles().await.unwrap();
    assert_eq!(cards[0].id, "u9");
    assert_eq!(cards[0].age, Some(29));
    assert_eq!(cards[0].sports, vec!["Tennis".to_string()]);

    like.assert_async().await;
    pass.assert_async().await;
    profiles.assert_async().await;
}

#[tokio::test]
async fn test_activity_board_refreshes_both_lists_after_create() {
    let mut server = Server::new_async().await;
    let create = server
        .mock("POST", "/activities")
        .match_header("authorization", "Bearer test-token")
        .match_body(Matcher::PartialJson(json!({ "title": "Sunday Long Run", "maxParticipants": 8 })))
        .with_status(201)
        .with_body(r#"{"_id":"a1","title":"Sunday Long Run"}"#)
        .expect(1)
        .create_async()
        .await;
    let all = server
        .mock("GET", "/activities")
        .with_status(200)
        .with_body(
            json!([
                { "_id": "a1", "title": "Sunday Long Run", "sport": "Running", "maxParticipants": 8, "participants": ["u1"] },
                { "_id": "a2", "title": "Padel Doubles", "sport": "Padel", "creator": { "username": "ana" } }
            ])
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let mine = server
        .mock("GET", "/activities/my-activities")
        .with_status(200)
        .with_body(json!({ "activities": [{ "_id": "a1", "title": "Sunday Long Run" }] }).to_string())
        .expect(1)
        .create_async()
        .await;

    let mut board = ActivityBoard::new(Arc::new(create_client(&server.url())));

    assert!(board.create(&create_activity_request()).await);
    assert!(board.error_message().is_none());
    assert_eq!(board.all().len(), 2);
    assert_eq!(board.mine().len(), 1);

    let candidates = board.candidates();
    assert_eq!(candidates[1].host_name, "ana");

    create.assert_async().await;
    all.assert_async().await;
    mine.assert_async().await;
}

#[tokio::test]
async fn test_activity_board_keeps_error_message() {
    let mut server = Server::new_async().await;
    let delete = server
        .mock("DELETE", "/activities/a1")
        .with_status(404)
        .with_body(r#"{"statusCode":404,"message":"Activity not found"}"#)
        .create_async()
        .await;
    let refresh = server.mock("GET", Matcher::Any).expect(0).create_async().await;

    let mut board = ActivityBoard::new(Arc::new(create_client(&server.url())));

    assert!(!board.delete("a1").await);
    assert_eq!(board.error_message(), Some("Activity not found"));

    delete.assert_async().await;
    refresh.assert_async().await;
}
