use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    models::{User, UserId},
};

/// Persistent storage for user records
///
/// Implementations must isolate writes per user; concurrent updates of the
/// same user are last-write-wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Looks up a user by id; `None` when no such record exists
    async fn find_user(&self, id: &UserId) -> AppResult<Option<User>>;

    /// Overwrites the favorite movie of an existing user
    ///
    /// Returns the stored value, or `None` when the user does not exist. Never
    /// creates a user.
    async fn update_favorite_movie(&self, id: &UserId, movie: &str) -> AppResult<Option<String>>;
}

/// In-process user store, used for local runs and tests
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a user record, as the identity provider would on sign-in
    pub async fn insert(&self, user: User) {
        let mut users = self.users.write().await;
        users.insert(user.id.clone(), user);
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_user(&self, id: &UserId) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(id.as_str()).cloned())
    }

    async fn update_favorite_movie(&self, id: &UserId, movie: &str) -> AppResult<Option<String>> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(id.as_str()).map(|user| {
            user.favorite_movie = Some(movie.to_string());
            movie.to_string()
        }))
    }
}
