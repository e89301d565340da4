// Service exports
pub mod activities;
pub mod backend;
pub mod chats;
pub mod completion;
pub mod quick_match;
pub mod recommender;
pub mod token;
pub mod users;

pub use activities::ActivityBoard;
pub use backend::{ApiError, Auth, BackendClient};
pub use completion::{CompletionError, CompletionProvider, GeminiClient};
pub use recommender::{Recommendation, Recommender};
pub use token::{SharedTokenStore, StaticTokenStore, TokenStore};
