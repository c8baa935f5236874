use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query,
    },
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    db::UserStore,
    error::AppError,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{FavoriteMovieService, MovieFactService, SessionProvider, TextGenerator},
};

pub mod favorite_movie;
pub mod movie_fact;
pub mod session;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub favorites: FavoriteMovieService,
    pub facts: MovieFactService,
    pub sessions: Arc<dyn SessionProvider>,
}

impl AppState {
    /// Wires the services over the given store, generator and session provider
    pub fn new(
        store: Arc<dyn UserStore>,
        generator: Arc<dyn TextGenerator>,
        sessions: Arc<dyn SessionProvider>,
    ) -> Self {
        let favorites = FavoriteMovieService::new(store);
        let facts = MovieFactService::new(favorites.clone(), generator);

        Self {
            favorites,
            facts,
            sessions,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/session", get(session::current_session))
        .route(
            "/favorite-movie",
            get(favorite_movie::get_favorite_movie).post(favorite_movie::set_favorite_movie),
        )
        .route("/movie-fact", post(movie_fact::generate_movie_fact))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Unwraps a JSON body, reporting malformed input with the uniform error body
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected request body");
        AppError::InvalidInput("Invalid JSON body".to_string())
    })
}

/// Unwraps query parameters, reporting a bad query string with the uniform error body
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query.map(|Query(params)| params).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected query string");
        AppError::InvalidInput("Invalid query string".to_string())
    })
}
