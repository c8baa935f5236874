use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{error::AppResult, models::SessionUser};

/// Resolves session tokens issued by the identity provider
///
/// The identity provider owns sign-in and session creation; this crate only
/// reads sessions back.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SessionProvider: Send + Sync {
    /// Returns the user bound to `token`, or `None` when the session is unknown or expired
    async fn current_user(&self, token: &str) -> AppResult<Option<SessionUser>>;
}

/// Session provider with a fixed token table
#[derive(Clone, Default)]
pub struct InMemorySessionProvider {
    sessions: Arc<RwLock<HashMap<String, SessionUser>>>,
}

impl InMemorySessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, token: impl Into<String>, user: SessionUser) {
        self.sessions.write().await.insert(token.into(), user);
    }

    /// Drops a session, as logout or expiry would
    pub async fn revoke(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }
}

#[async_trait::async_trait]
impl SessionProvider for InMemorySessionProvider {
    async fn current_user(&self, token: &str) -> AppResult<Option<SessionUser>> {
        Ok(self.sessions.read().await.get(token).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> SessionUser {
        SessionUser {
            id: "u1".to_string(),
            name: Some("Ripley".to_string()),
            email: None,
            image: None,
        }
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let sessions = InMemorySessionProvider::new();
        assert_eq!(sessions.current_user("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_revoked_session() {
        let sessions = InMemorySessionProvider::new();
        sessions.insert("tok", user()).await;
        assert_eq!(sessions.current_user("tok").await.unwrap(), Some(user()));

        sessions.revoke("tok").await;
        assert_eq!(sessions.current_user("tok").await.unwrap(), None);
    }
}
