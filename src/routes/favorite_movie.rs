use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Extension, Json,
};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{FavoriteMovieQuery, FavoriteMovieResponse, SetFavoriteMovieRequest},
    routes::{json_body, query_params, AppState},
};

/// Handler for `GET /favorite-movie?userId=<id>`
pub async fn get_favorite_movie(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<FavoriteMovieQuery>, QueryRejection>,
) -> AppResult<Json<FavoriteMovieResponse>> {
    let user_id = query_params(query)?.user_id.unwrap_or_default();

    let favorite_movie = state.favorites.get(&user_id).await?;

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        has_favorite = favorite_movie.is_some(),
        "Fetched favorite movie"
    );

    Ok(Json(FavoriteMovieResponse { favorite_movie }))
}

/// Handler for `POST /favorite-movie`
pub async fn set_favorite_movie(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<SetFavoriteMovieRequest>, JsonRejection>,
) -> AppResult<Json<FavoriteMovieResponse>> {
    let request = json_body(payload)?;
    let user_id = request.user_id.unwrap_or_default();
    let favorite_movie = request.favorite_movie.unwrap_or_default();

    let stored = state.favorites.set(&user_id, &favorite_movie).await?;

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        "Saved favorite movie"
    );

    Ok(Json(FavoriteMovieResponse {
        favorite_movie: Some(stored),
    }))
}
