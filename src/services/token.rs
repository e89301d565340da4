use std::sync::{Arc, PoisonError, RwLock};

/// Read-only access to the signed-in user's bearer token
pub trait TokenStore: Send + Sync {
    fn auth_token(&self) -> Option<String>;
}

/// Token fixed at construction
#[derive(Debug, Clone, Default)]
pub struct StaticTokenStore {
    token: Option<String>,
}

impl StaticTokenStore {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: Some(token.into()) }
    }

    /// Store with no token; every authenticated call fails fast
    pub fn signed_out() -> Self {
        Self { token: None }
    }
}

impl TokenStore for StaticTokenStore {
    fn auth_token(&self) -> Option<String> {
        self.token.clone()
    }
}

/// Token shared with the collaborator that signs users in and out.
///
/// Clones share the same slot. API clients only read it.
#[derive(Debug, Clone, Default)]
pub struct SharedTokenStore {
    token: Arc<RwLock<Option<String>>>,
}

impl SharedTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panicked writer leaves a plain Option behind, so poisoning is ignored
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl TokenStore for SharedTokenStore {
    fn auth_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .filter(|token| !token.is_empty())
    }
}
