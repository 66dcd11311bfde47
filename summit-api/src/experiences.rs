use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use summit_catalog::Experience;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/experiences", get(list_experiences))
        .route("/api/experiences/{id}", get(get_experience))
}

/// GET /api/experiences
async fn list_experiences(State(state): State<AppState>) -> Result<Json<Vec<Experience>>, AppError> {
    let experiences = state.experiences.get_all_experiences().await?;
    Ok(Json(experiences))
}

/// GET /api/experiences/{id}
async fn get_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Experience>, AppError> {
    let experience = state
        .experiences
        .get_experience(&id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Experience not found".to_string()))?;

    Ok(Json(experience))
}
