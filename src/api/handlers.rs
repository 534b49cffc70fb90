use axum::{extract::State, http::StatusCode, Extension, Json};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{PromptQuery, PromptResponse},
};

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Liveness message under the API prefix
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Backend is running" }))
}

/// Finds the movies closest to a plot and returns a poster prompt built from them
pub async fn generate_prompt(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(query): Json<PromptQuery>,
) -> AppResult<Json<PromptResponse>> {
    tracing::info!(
        request_id = %request_id,
        genre = ?query.genre,
        style = ?query.style,
        is_retro = query.is_retro,
        "Processing prompt generation request"
    );

    let response = state
        .prompt_service
        .generate_prompt(query, Some(request_id.0))
        .await?;

    Ok(Json(response))
}

/// Sorted list of genres available for filtering
pub async fn get_available_genres(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let genres = state.genre_catalog.list_genres().await?;
    Ok(Json(genres))
}
