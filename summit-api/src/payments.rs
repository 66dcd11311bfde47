use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use summit_booking::Booking;
use summit_core::payment::PaymentOutcome;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentRequest {
    pub amount: Option<Value>,
    pub booking_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
    pub payment_intent_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
    pub payment_intent_id: Option<String>,
    pub booking_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentResponse {
    pub success: bool,
    pub booking: Booking,
    pub payment_status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/create-payment-intent", post(create_payment_intent))
        .route("/api/confirm-payment", post(confirm_payment))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/create-payment-intent
/// Start a (mock) payment, moving the booking to processing when one is named
async fn create_payment_intent(
    State(state): State<AppState>,
    payload: Result<Json<CreatePaymentIntentRequest>, JsonRejection>,
) -> Result<Json<PaymentIntentResponse>, AppError> {
    let Json(req) = payload?;

    let amount = positive_amount(req.amount.as_ref())
        .ok_or_else(|| AppError::BadRequest("Valid amount is required".to_string()))?;

    let booking_id = match req.booking_id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match Uuid::parse_str(raw) {
            Ok(id) => Some(id),
            Err(_) => {
                tracing::warn!("Ignoring malformed booking id {} on payment intent", raw);
                None
            }
        },
    };

    let intent = state.payments.initialize_payment(amount, booking_id).await?;

    let client_secret = intent.client_secret.ok_or_else(|| {
        AppError::InternalServerError("Payment gateway returned no client secret".to_string())
    })?;

    Ok(Json(PaymentIntentResponse {
        client_secret,
        payment_intent_id: intent.id,
    }))
}

/// POST /api/confirm-payment
/// Settle a payment intent and record the outcome on the booking
async fn confirm_payment(
    State(state): State<AppState>,
    payload: Result<Json<ConfirmPaymentRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = payload?;

    let (Some(intent_id), Some(booking_id)) = (
        non_blank(req.payment_intent_id.as_deref()),
        non_blank(req.booking_id.as_deref()),
    ) else {
        return Err(AppError::BadRequest(
            "Payment intent ID and booking ID are required".to_string(),
        ));
    };

    let not_found = || AppError::NotFoundError("Booking not found".to_string());
    let booking_id = Uuid::parse_str(booking_id).map_err(|_| not_found())?;

    let confirmation = state
        .payments
        .confirm_payment(intent_id, booking_id)
        .await?
        .ok_or_else(not_found)?;

    let response = match confirmation.outcome {
        PaymentOutcome::Succeeded => (
            StatusCode::OK,
            Json(ConfirmPaymentResponse {
                success: true,
                booking: confirmation.booking,
                payment_status: "succeeded",
                message: None,
            }),
        ),
        PaymentOutcome::Declined { reason } => (
            StatusCode::PAYMENT_REQUIRED,
            Json(ConfirmPaymentResponse {
                success: false,
                booking: confirmation.booking,
                payment_status: "failed",
                message: Some(format!("Payment declined: {}", reason)),
            }),
        ),
    };

    Ok(response.into_response())
}

/// Only JSON numbers strictly above zero count as an amount.
fn positive_amount(value: Option<&Value>) -> Option<Decimal> {
    let Value::Number(n) = value? else {
        return None;
    };
    Decimal::from_str(&n.to_string())
        .ok()
        .filter(|amount| *amount > Decimal::ZERO)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
