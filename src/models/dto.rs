//! Decode-only records mirroring the Lume backend's JSON.
//!
//! Every DTO deserializes through `serde_json::Value` so that each field can
//! fall back through its alternate key names (see [`crate::models::tolerant`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::domain::CandidateActivity;
use crate::models::tolerant::{
    bool_field, datetime_field, f64_field, first_present, lookup, string_field, string_list,
    string_or_empty, u32_field,
};

const ID_KEYS: &[&str] = &["id", "_id"];
const NAME_KEYS: &[&str] = &["name", "username"];
const AVATAR_KEYS: &[&str] = &["avatar", "profileImageUrl", "profileImageThumbnailUrl"];

/// Common error envelope returned by the backend for non-2xx responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub status_code: Option<u16>,
    pub message: String,
    pub error: Option<String>,
}

impl From<Value> for ErrorEnvelope {
    fn from(v: Value) -> Self {
        // Validation failures carry a list of messages
        let message = match v.get("message") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            _ => String::new(),
        };

        Self {
            status_code: u32_field(&v, &["statusCode"]).and_then(|code| u16::try_from(code).ok()),
            message,
            error: string_field(&v, &["error"]),
        }
    }
}

/// Compact user reference (search results, chat participants, matches)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub avatar: Option<String>,
}

impl From<Value> for UserSummary {
    fn from(v: Value) -> Self {
        Self {
            id: string_or_empty(&v, ID_KEYS),
            name: string_or_empty(&v, NAME_KEYS),
            avatar: string_field(&v, AVATAR_KEYS),
        }
    }
}

/// Signed-in user's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub sports: Vec<String>,
    pub location: Option<String>,
    pub email_verified: bool,
}

impl From<Value> for UserProfile {
    fn from(v: Value) -> Self {
        // Some endpoints wrap the profile as { "user": { ... } }
        let v = match v.get("user") {
            Some(inner) if inner.is_object() => inner.clone(),
            _ => v,
        };

        Self {
            id: string_or_empty(&v, ID_KEYS),
            username: string_or_empty(&v, &["username", "name"]),
            email: string_or_empty(&v, &["email"]),
            bio: string_field(&v, &["bio", "description"]),
            avatar: string_field(&v, &["profileImageUrl", "avatar", "profileImageThumbnailUrl"]),
            sports: string_list(&v, &["sports", "sportsPreferences", "interests"]),
            location: string_field(&v, &["location", "city"]),
            email_verified: first_present(
                [bool_field(&v, &["isEmailVerified", "emailVerified", "verified"])],
                false,
            ),
        }
    }
}

/// Activity listed on the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub sport: String,
    pub icon: String,
    pub host_name: String,
    pub location: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub distance_km: Option<f64>,
    pub capacity: u32,
    pub taken_spots: u32,
    pub skill_level: String,
}

impl Activity {
    /// Converts into the shape offered to the model as a recommendation option
    pub fn to_candidate(&self) -> CandidateActivity {
        CandidateActivity {
            id: self.id.clone(),
            title: self.title.clone(),
            sport: self.sport.clone(),
            icon: self.icon.clone(),
            host_name: self.host_name.clone(),
            starts_at: self.starts_at,
            location: self.location.clone(),
            distance_km: self.distance_km,
            capacity: self.capacity,
            taken_spots: self.taken_spots,
            skill_level: self.skill_level.clone(),
        }
    }
}

impl From<Value> for Activity {
    fn from(v: Value) -> Self {
        let host_name = first_present(
            [
                string_field(&v, &["hostName"]),
                lookup(&v, &["host", "creator", "organizer"]).and_then(|host| string_field(host, NAME_KEYS)),
            ],
            "Unknown host".to_string(),
        );

        let location = first_present(
            [
                string_field(&v, &["location", "locationName", "address"]),
                v.get("location").and_then(|loc| string_field(loc, &["name", "address"])),
            ],
            String::new(),
        );

        let taken_spots = first_present(
            [
                u32_field(&v, &["currentParticipants", "participantsCount", "takenSpots"]),
                v.get("participants")
                    .and_then(|p| p.as_array())
                    .map(|p| p.len() as u32),
            ],
            0,
        );

        Self {
            id: string_or_empty(&v, ID_KEYS),
            title: string_or_empty(&v, &["title", "name"]),
            description: string_field(&v, &["description"]),
            sport: first_present([string_field(&v, &["sport", "sportType", "category"])], "Other".to_string()),
            icon: first_present([string_field(&v, &["icon", "emoji"])], "🏅".to_string()),
            host_name,
            location,
            starts_at: datetime_field(&v, &["date", "dateTime", "startTime", "startsAt"]),
            distance_km: f64_field(&v, &["distance", "distanceKm"]),
            capacity: first_present([u32_field(&v, &["maxParticipants", "capacity", "totalSpots"])], 0),
            taken_spots,
            skill_level: first_present(
                [string_field(&v, &["skillLevel", "level"])],
                "All levels".to_string(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub chat_id: String,
    pub sender_id: String,
    pub sender_name: Option<String>,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
    pub is_read: bool,
}

impl From<Value> for ChatMessage {
    fn from(v: Value) -> Self {
        // `sender` is either a populated user object or a bare id
        let sender = v.get("sender");
        let sender_id = first_present(
            [
                string_field(&v, &["senderId"]),
                sender.and_then(|s| s.as_str()).map(str::to_string),
                sender.and_then(|s| string_field(s, ID_KEYS)),
            ],
            String::new(),
        );

        Self {
            id: string_or_empty(&v, ID_KEYS),
            chat_id: string_or_empty(&v, &["chatId", "chat"]),
            sender_id,
            sender_name: sender.and_then(|s| string_field(s, NAME_KEYS)),
            content: string_or_empty(&v, &["content", "text", "message"]),
            created_at: datetime_field(&v, &["createdAt", "timestamp", "sentAt"]),
            is_read: first_present([bool_field(&v, &["isRead", "read"])], false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", rename_all = "camelCase")]
pub struct Chat {
    pub id: String,
    pub participants: Vec<UserSummary>,
    pub last_message: Option<ChatMessage>,
    pub unread_count: u32,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Value> for Chat {
    fn from(v: Value) -> Self {
        let participants = lookup(&v, &["participants", "members", "users"])
            .and_then(|p| p.as_array())
            .map(|items| items.iter().cloned().map(UserSummary::from).collect())
            .unwrap_or_default();

        Self {
            id: string_or_empty(&v, ID_KEYS),
            participants,
            last_message: lookup(&v, &["lastMessage", "latestMessage"])
                .filter(|m| m.is_object())
                .cloned()
                .map(ChatMessage::from),
            unread_count: first_present([u32_field(&v, &["unreadCount", "unread"])], 0),
            updated_at: datetime_field(&v, &["updatedAt", "lastMessageAt", "createdAt"]),
        }
    }
}

/// Profile card shown in quick-match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", rename_all = "camelCase")]
pub struct QuickMatchProfile {
    pub id: String,
    pub name: String,
    pub age: Option<u32>,
    pub bio: Option<String>,
    pub sports: Vec<String>,
    pub avatar: Option<String>,
    pub photos: Vec<String>,
    pub distance_km: Option<f64>,
}

impl From<Value> for QuickMatchProfile {
    fn from(v: Value) -> Self {
        Self {
            id: string_or_empty(&v, &["id", "_id", "userId"]),
            name: string_or_empty(&v, NAME_KEYS),
            age: u32_field(&v, &["age"]),
            bio: string_field(&v, &["bio", "description"]),
            sports: string_list(&v, &["sports", "sportsPreferences", "interests"]),
            avatar: string_field(&v, AVATAR_KEYS),
            photos: string_list(&v, &["photos", "images", "imageUrls"]),
            distance_km: f64_field(&v, &["distance", "distanceKm"]),
        }
    }
}

/// Outcome of a like: whether it completed a mutual match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", rename_all = "camelCase")]
pub struct LikeResult {
    pub matched: bool,
    pub match_id: Option<String>,
}

impl From<Value> for LikeResult {
    fn from(v: Value) -> Self {
        Self {
            matched: first_present([bool_field(&v, &["matched", "isMatch", "match"])], false),
            match_id: string_field(&v, &["matchId"])
                .or_else(|| v.get("match").and_then(|m| string_field(m, ID_KEYS))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub user: UserSummary,
    pub chat_id: Option<String>,
    pub matched_at: Option<DateTime<Utc>>,
}

impl From<Value> for Match {
    fn from(v: Value) -> Self {
        let user = lookup(&v, &["user", "matchedUser", "profile"])
            .cloned()
            .map(UserSummary::from)
            .unwrap_or_else(|| UserSummary::from(Value::Null));

        Self {
            id: string_or_empty(&v, &["id", "_id", "matchId"]),
            user,
            chat_id: string_field(&v, &["chatId"]),
            matched_at: datetime_field(&v, &["matchedAt", "createdAt"]),
        }
    }
}

/// Generic `{ "message": ... }` acknowledgement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Acknowledgement {
    pub message: String,
}

impl From<Value> for Acknowledgement {
    fn from(v: Value) -> Self {
        Self {
            message: string_or_empty(&v, &["message", "status"]),
        }
    }
}
