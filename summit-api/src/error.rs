use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use summit_booking::ValidationErrors;
use summit_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid booking data: {0}")]
    ValidationError(ValidationErrors),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFoundError(String),
    #[error("{0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::ValidationError(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "message": "Invalid booking data",
                    "errors": errors.errors(),
                }),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "message": msg })),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, json!({ "message": msg })),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "message": msg }))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::ValidationError(errors)
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        Self::InternalServerError(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_lists_fields() {
        let mut errors = ValidationErrors::default();
        errors.push("email", "Invalid email address");
        errors.push("participants", "At least 1 participant is required");

        let (status, body) = render(errors.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid booking data");
        assert_eq!(body["errors"][0]["field"], "email");
        assert_eq!(body["errors"][1]["field"], "participants");
    }

    #[tokio::test]
    async fn test_internal_error_carries_message() {
        let err: AppError = CoreError::ReferenceExhausted { attempts: 3 }.into();
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["message"],
            "Could not issue a unique booking reference after 3 attempts"
        );
    }

    #[tokio::test]
    async fn test_not_found() {
        let (status, body) = render(AppError::NotFoundError("Booking not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Booking not found");
    }
}
