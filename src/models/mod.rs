use serde::{Deserialize, Serialize};

pub mod user;

pub use user::{SessionUser, User, UserId};

/// Query string for `GET /favorite-movie`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteMovieQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Body of `POST /favorite-movie`
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetFavoriteMovieRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub favorite_movie: Option<String>,
}

/// Response of both favorite-movie endpoints; `null` when unset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteMovieResponse {
    pub favorite_movie: Option<String>,
}

/// Body of `POST /movie-fact`
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieFactRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieFactResponse {
    pub fact: String,
}

/// Uniform error body returned by every endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
