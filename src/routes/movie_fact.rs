use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{MovieFactRequest, MovieFactResponse},
    routes::{json_body, AppState},
};

/// Handler for `POST /movie-fact`
pub async fn generate_movie_fact(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<MovieFactRequest>, JsonRejection>,
) -> AppResult<Json<MovieFactResponse>> {
    let user_id = json_body(payload)?.user_id.unwrap_or_default();

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        "Processing movie fact request"
    );

    let fact = state.facts.generate_fact(&user_id).await?;

    tracing::info!(request_id = %request_id, "Movie fact completed");

    Ok(Json(MovieFactResponse { fact }))
}
