/// Typed client for the movie-facts HTTP API
///
/// Used by the dashboard to talk to the server the same way a browser client
/// would. Errors keep the server's `{ error }` message when one is present.
use reqwest::{Client as HttpClient, Response};

use crate::models::{
    ErrorResponse, FavoriteMovieResponse, MovieFactRequest, MovieFactResponse,
    SetFavoriteMovieRequest,
};

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned status {status}: {message}")]
    Api { status: u16, message: String },
}

/// Calls made by the dashboard
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieFactsApi: Send + Sync {
    async fn get_favorite_movie(&self, user_id: &str) -> Result<Option<String>, ClientError>;

    async fn set_favorite_movie(
        &self,
        user_id: &str,
        favorite_movie: &str,
    ) -> Result<String, ClientError>;

    async fn movie_fact(&self, user_id: &str) -> Result<String, ClientError>;
}

#[derive(Clone)]
pub struct HttpMovieFactsClient {
    http_client: HttpClient,
    base_url: String,
}

impl HttpMovieFactsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turns a non-2xx response into [`ClientError::Api`]
    async fn check(response: Response) -> Result<Response, ClientError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Api {
            status,
            message: error_message(&body),
        })
    }
}

/// Extracts the `error` field of an error body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait::async_trait]
impl MovieFactsApi for HttpMovieFactsClient {
    async fn get_favorite_movie(&self, user_id: &str) -> Result<Option<String>, ClientError> {
        let response = self
            .http_client
            .get(self.url("/favorite-movie"))
            .query(&[("userId", user_id)])
            .send()
            .await?;

        let body: FavoriteMovieResponse = Self::check(response).await?.json().await?;
        Ok(body.favorite_movie)
    }

    async fn set_favorite_movie(
        &self,
        user_id: &str,
        favorite_movie: &str,
    ) -> Result<String, ClientError> {
        let request = SetFavoriteMovieRequest {
            user_id: Some(user_id.to_string()),
            favorite_movie: Some(favorite_movie.to_string()),
        };

        let response = self
            .http_client
            .post(self.url("/favorite-movie"))
            .json(&request)
            .send()
            .await?;

        let body: FavoriteMovieResponse = Self::check(response).await?.json().await?;
        body.favorite_movie.ok_or_else(|| ClientError::Api {
            status: 200,
            message: "Favorite movie missing from response".to_string(),
        })
    }

    async fn movie_fact(&self, user_id: &str) -> Result<String, ClientError> {
        let request = MovieFactRequest {
            user_id: Some(user_id.to_string()),
        };

        let response = self
            .http_client
            .post(self.url("/movie-fact"))
            .json(&request)
            .send()
            .await?;

        let body: MovieFactResponse = Self::check(response).await?.json().await?;
        Ok(body.fact)
    }
}
