use redis::AsyncCommands;
use redis::Client;
use std::fmt::Display;

use crate::error::AppError;
use crate::error::AppResult;
use crate::models::SessionUser;
use crate::services::session::SessionProvider;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SessionKey {
    Token(String),
}

impl Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionKey::Token(token) => write!(f, "session:{}", token),
        }
    }
}

/// Creates a Redis client for session lookups
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Reads sessions the identity provider stores in Redis
///
/// Each session lives under `session:<token>` as the JSON-encoded
/// [`SessionUser`]; expiry is handled by the key's TTL.
#[derive(Clone)]
pub struct RedisSessionProvider {
    redis_client: Client,
}

impl RedisSessionProvider {
    pub fn new(redis_client: Client) -> Self {
        Self { redis_client }
    }

    fn decode(json: &str) -> AppResult<SessionUser> {
        serde_json::from_str(json)
            .map_err(|e| AppError::Internal(format!("Session deserialization error: {}", e)))
    }
}

#[async_trait::async_trait]
impl SessionProvider for RedisSessionProvider {
    async fn current_user(&self, token: &str) -> AppResult<Option<SessionUser>> {
        if token.trim().is_empty() {
            return Ok(None);
        }

        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let stored: Option<String> = conn.get(SessionKey::Token(token.to_string()).to_string()).await?;

        match stored {
            Some(json) => Ok(Some(Self::decode(&json)?)),
            None => {
                tracing::debug!("Session token not found");
                Ok(None)
            }
        }
    }
}
