use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use summit_booking::{validate_new_booking, Booking};
use tracing::{info, warn};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", post(create_booking))
        .route("/api/bookings/{reference}", get(get_booking_by_reference))
}

/// POST /api/bookings
/// Create a pending booking from guest details
async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let Json(payload) = payload?;

    // 1. Decode and validate every field
    let new_booking = validate_new_booking(&payload)?;

    // 2. The experience reference is not enforced, only flagged
    if state
        .experiences
        .get_experience(&new_booking.experience_id)
        .await?
        .is_none()
    {
        warn!(
            "Booking references unknown experience {}",
            new_booking.experience_id
        );
    }

    // 3. Store
    let booking = state.bookings.create_booking(new_booking).await?;
    info!("Booking {} issued", booking.reference_number);

    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /api/bookings/{reference}
/// Look a booking up by its guest-facing reference number
async fn get_booking_by_reference(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let booking = state
        .bookings
        .get_booking_by_reference(&reference)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Booking not found".to_string()))?;

    Ok(Json(booking))
}
