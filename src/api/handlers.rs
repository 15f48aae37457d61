use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{RecommendRequest, RecommendationResult},
    store::ModelState,
};

use super::AppState;

const MISSING_MOVIE_MESSAGE: &str = "Please provide a movie name";
const NOT_FOUND_MESSAGE: &str = "Movie not found! Try 'Batman' or 'Avatar'.";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub movies: usize,
}

// Handlers

/// Liveness endpoint
pub async fn home() -> &'static str {
    "Backend is Live & Running!"
}

/// Health check endpoint, reports whether the model is loaded
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let response = match &state.model {
        ModelState::Ready(model) => HealthResponse {
            status: "healthy",
            movies: model.catalog.len(),
        },
        ModelState::Unavailable { .. } => HealthResponse {
            status: "degraded",
            movies: 0,
        },
    };

    Json(response)
}

/// Recommend movies similar to the requested title
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> AppResult<Json<Vec<RecommendationResult>>> {
    let recommender = state.recommender()?;

    let movie = payload
        .ok()
        .and_then(|Json(request)| request.movie)
        .filter(|movie| !movie.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput(MISSING_MOVIE_MESSAGE.to_string()))?;

    tracing::info!(request_id = %request_id, movie = %movie, "Recommendation requested");

    let recommendations = recommender.recommend(&movie).await;

    if recommendations.is_empty() {
        tracing::info!(request_id = %request_id, movie = %movie, "Movie not found");
        return Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()));
    }

    tracing::info!(
        request_id = %request_id,
        results = recommendations.len(),
        "Recommendations assembled"
    );

    Ok(Json(recommendations))
}
