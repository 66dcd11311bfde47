use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::sync::Arc;
use summit_api::{app, AppState};
use summit_booking::{is_well_formed_reference, PaymentStatus};
use summit_core::payment::{MockPaymentGateway, PaymentGateway, PaymentIntent, PaymentOutcome};
use summit_core::repository::BookingRepository;
use summit_core::CoreResult;
use summit_store::MemStorage;
use tower::ServiceExt;
use uuid::Uuid;

fn test_app() -> (Router, Arc<MemStorage>) {
    test_app_with(Arc::new(MockPaymentGateway))
}

fn test_app_with(gateway: Arc<dyn PaymentGateway>) -> (Router, Arc<MemStorage>) {
    let storage = Arc::new(MemStorage::default());
    (app(AppState::new(storage.clone(), gateway)), storage)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn booking_payload() -> Value {
    json!({
        "experienceId": "meditation-retreats",
        "checkinDate": "2025-01-01",
        "checkoutDate": "2025-01-03",
        "participants": 2,
        "firstName": "A",
        "lastName": "B",
        "email": "a@b.com",
        "phone": "123",
        "totalAmount": "240.00"
    })
}

async fn create_booking(app: &Router) -> Value {
    let (status, booking) = send(app, "POST", "/api/bookings", Some(booking_payload())).await;
    assert_eq!(status, StatusCode::CREATED);
    booking
}

#[tokio::test]
async fn test_health() {
    let (app, _) = test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_experiences_in_catalog_order() {
    let (app, _) = test_app();
    let (status, body) = send(&app, "GET", "/api/experiences", None).await;

    assert_eq!(status, StatusCode::OK);
    let experiences = body.as_array().unwrap();
    assert_eq!(experiences.len(), 4);
    assert_eq!(experiences[0]["id"], "meditation-retreats");
    assert_eq!(experiences[0]["price"], "120.00");
    assert!(experiences[0]["type"].is_string());
}

#[tokio::test]
async fn test_get_experience() {
    let (app, _) = test_app();

    let (status, body) = send(&app, "GET", "/api/experiences/heritage-walks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Heritage Walks");

    let (status, body) = send(&app, "GET", "/api/experiences/moon-landing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Experience not found");
}

#[tokio::test]
async fn test_create_booking_scenario() {
    let (app, _) = test_app();
    let booking = create_booking(&app).await;

    assert_eq!(booking["participants"], 2);
    assert_eq!(booking["paymentStatus"], "pending");
    assert!(booking["paymentIntentId"].is_null());
    assert_eq!(booking["totalAmount"], "240.00");
    assert!(Uuid::parse_str(booking["id"].as_str().unwrap()).is_ok());
    assert!(is_well_formed_reference(booking["referenceNumber"].as_str().unwrap()));
}

#[tokio::test]
async fn test_booking_ids_are_distinct() {
    let (app, _) = test_app();
    let first = create_booking(&app).await;
    let second = create_booking(&app).await;

    assert_ne!(first["id"], second["id"]);
    assert_ne!(first["referenceNumber"], second["referenceNumber"]);
}

#[tokio::test]
async fn test_get_booking_by_reference() {
    let (app, _) = test_app();
    let created = create_booking(&app).await;
    let reference = created["referenceNumber"].as_str().unwrap();

    let (status, fetched) = send(&app, "GET", &format!("/api/bookings/{}", reference), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, body) = send(&app, "GET", "/api/bookings/SM-1999-000000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Booking not found");
}

#[tokio::test]
async fn test_validation_reports_every_field() {
    let (app, _) = test_app();
    let mut payload = booking_payload();
    let fields = payload.as_object_mut().unwrap();
    fields.remove("email");
    fields.insert("participants".to_string(), json!(0));

    let (status, body) = send(&app, "POST", "/api/bookings", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"participants"));
}

#[tokio::test]
async fn test_malformed_email_rejected() {
    let (app, _) = test_app();
    let mut payload = booking_payload();
    payload["email"] = json!("not-an-email");

    let (status, body) = send(&app, "POST", "/api/bookings", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "email");
}

#[tokio::test]
async fn test_numeric_edge_cases_on_booking() {
    let (app, _) = test_app();

    let mut payload = booking_payload();
    payload["participants"] = json!(2.0);
    let (status, body) = send(&app, "POST", "/api/bookings", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["participants"], 2);

    let mut payload = booking_payload();
    payload["totalAmount"] = json!("79228162514264337593543950335");
    let (status, body) = send(&app, "POST", "/api/bookings", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "totalAmount");
}

#[tokio::test]
async fn test_malformed_json_is_a_bad_request() {
    let (app, _) = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/bookings")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_booking_for_unknown_experience_is_still_created() {
    let (app, _) = test_app();
    let mut payload = booking_payload();
    payload["experienceId"] = json!("does-not-exist");

    let (status, body) = send(&app, "POST", "/api/bookings", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["experienceId"], "does-not-exist");
}

#[tokio::test]
async fn test_payment_intent_requires_positive_amount() {
    let (app, _) = test_app();

    for body in [json!({ "amount": 0 }), json!({ "amount": -10 }), json!({})] {
        let (status, response) = send(&app, "POST", "/api/create-payment-intent", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = response["message"].as_str().unwrap().to_lowercase();
        assert!(message.contains("valid amount"), "{}", message);
    }
}

#[tokio::test]
async fn test_payment_intent_moves_booking_to_processing() {
    let (app, storage) = test_app();
    let booking = create_booking(&app).await;
    let booking_id = booking["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/api/create-payment-intent",
        Some(json!({ "amount": 240.0, "bookingId": booking_id })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let intent_id = body["paymentIntentId"].as_str().unwrap();
    assert!(intent_id.starts_with("pi_"));
    assert!(body["clientSecret"].as_str().unwrap().starts_with(intent_id));

    let stored = storage
        .get_booking(Uuid::parse_str(booking_id).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.payment_status, PaymentStatus::Processing);
    assert_eq!(stored.payment_intent_id.as_deref(), Some(intent_id));
}

#[tokio::test]
async fn test_payment_intent_without_booking() {
    let (app, _) = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/create-payment-intent",
        Some(json!({ "amount": 99.99 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paymentIntentId"].is_string());
    assert!(body["clientSecret"].is_string());
}

#[tokio::test]
async fn test_confirm_payment_completes_booking() {
    let (app, storage) = test_app();
    let booking = create_booking(&app).await;
    let booking_id = booking["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/api/confirm-payment",
        Some(json!({ "paymentIntentId": "pi_1735689600000", "bookingId": booking_id })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["paymentStatus"], "succeeded");
    assert_eq!(body["booking"]["paymentStatus"], "completed");
    assert_eq!(body["booking"]["paymentIntentId"], "pi_1735689600000");

    let stored = storage
        .get_booking(Uuid::parse_str(booking_id).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.payment_status, PaymentStatus::Completed);

    let reference = booking["referenceNumber"].as_str().unwrap();
    let (_, fetched) = send(&app, "GET", &format!("/api/bookings/{}", reference), None).await;
    assert_eq!(fetched["paymentStatus"], "completed");
}

#[tokio::test]
async fn test_confirm_payment_requires_both_fields() {
    let (app, _) = test_app();

    for body in [
        json!({ "paymentIntentId": "pi_1" }),
        json!({ "bookingId": Uuid::new_v4().to_string() }),
        json!({ "paymentIntentId": "", "bookingId": Uuid::new_v4().to_string() }),
    ] {
        let (status, response) = send(&app, "POST", "/api/confirm-payment", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(response["message"].is_string());
    }
}

#[tokio::test]
async fn test_confirm_payment_unknown_booking() {
    let (app, _) = test_app();

    for booking_id in [Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/confirm-payment",
            Some(json!({ "paymentIntentId": "pi_1", "bookingId": booking_id })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Booking not found");
    }
}

struct DecliningGateway;

#[async_trait]
impl PaymentGateway for DecliningGateway {
    async fn create_intent(&self, amount: Decimal, booking_id: Option<Uuid>) -> CoreResult<PaymentIntent> {
        MockPaymentGateway.create_intent(amount, booking_id).await
    }

    async fn attempt(&self, _intent: &PaymentIntent) -> CoreResult<PaymentOutcome> {
        Ok(PaymentOutcome::Declined {
            reason: "insufficient funds".to_string(),
        })
    }
}

#[tokio::test]
async fn test_declined_payment_marks_booking_failed() {
    let (app, _) = test_app_with(Arc::new(DecliningGateway));
    let booking = create_booking(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/confirm-payment",
        Some(json!({ "paymentIntentId": "pi_2", "bookingId": booking["id"] })),
    )
    .await;

    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["success"], false);
    assert_eq!(body["paymentStatus"], "failed");
    assert_eq!(body["booking"]["paymentStatus"], "failed");
    assert!(body["message"].as_str().unwrap().contains("insufficient funds"));
}
