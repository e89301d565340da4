// Model exports
pub mod domain;
pub mod dto;
pub mod requests;
pub mod responses;
pub mod tolerant;

pub use domain::{
    CandidateActivity, DailyTrend, HealthSnapshot, Intensity, Priority, RecommendationRequest,
    RecommendationResponse, ResponseSource, Suggestion, Tip, WorkoutRecord,
};
pub use dto::{Acknowledgement, Activity, Chat, ChatMessage, ErrorEnvelope, LikeResult, Match, QuickMatchProfile, UserProfile, UserSummary};
pub use requests::{
    ChangePasswordRequest, CreateActivityRequest, CreateChatRequest, ParseCompletionRequest,
    QuickMatchActionRequest, SendMessageRequest, UpdateProfileRequest, VerificationEmailRequest,
};
pub use responses::{AnalyzeResponse, ErrorResponse, HealthResponse, PromptPreviewResponse};
