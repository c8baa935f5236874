use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::SessionUser,
    routes::AppState,
};

/// Cookie the identity provider sets alongside the session it stores
pub const SESSION_COOKIE: &str = "session_token";

/// Extracts the session token from `Authorization: Bearer` or the session cookie
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// Handler for `GET /session`: the profile of the current authenticated user
pub async fn current_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<SessionUser>> {
    let not_authenticated = || AppError::Unauthorized("Not authenticated".to_string());

    let token = session_token(&headers).ok_or_else(not_authenticated)?;
    let user = state
        .sessions
        .current_user(&token)
        .await?
        .ok_or_else(not_authenticated)?;

    tracing::debug!(user_id = %user.id, "Session resolved");

    Ok(Json(user))
}
