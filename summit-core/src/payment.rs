use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::CoreResult;

const CLIENT_SECRET_LEN: usize = 16;

/// An attempted payment, as handed out by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String, // Provider's ID (e.g., pi_1735689600000)
    pub amount: Option<Decimal>,
    pub booking_id: Option<Uuid>,
    pub client_secret: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PaymentIntent {
    /// Rebuild an intent from the id a client sends back on confirmation.
    pub fn for_confirmation(id: &str, booking_id: Uuid, amount: Decimal) -> Self {
        Self {
            id: id.to_string(),
            amount: Some(amount),
            booking_id: Some(booking_id),
            client_secret: None,
            created_at: Utc::now(),
        }
    }
}

/// Verdict on a payment attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "outcome")]
pub enum PaymentOutcome {
    Succeeded,
    Declined { reason: String },
}

impl PaymentOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PaymentOutcome::Succeeded)
    }
}

/// Capability boundary to a payment processor. Swapping in a real gateway
/// must not require touching the booking status transitions.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment intent with the provider
    async fn create_intent(
        &self,
        amount: Decimal,
        booking_id: Option<Uuid>,
    ) -> CoreResult<PaymentIntent>;

    /// Attempt to collect the payment for an intent
    async fn attempt(&self, intent: &PaymentIntent) -> CoreResult<PaymentOutcome>;
}

/// Gateway that never leaves the process: intent ids are stamped with the
/// current time in milliseconds and every attempt succeeds.
#[derive(Debug, Default, Clone)]
pub struct MockPaymentGateway;

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_intent(
        &self,
        amount: Decimal,
        booking_id: Option<Uuid>,
    ) -> CoreResult<PaymentIntent> {
        let created_at = Utc::now();
        let id = format!("pi_{}", created_at.timestamp_millis());
        let secret: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(CLIENT_SECRET_LEN)
            .map(char::from)
            .collect();

        tracing::debug!("Mock payment intent {} created", id);

        Ok(PaymentIntent {
            client_secret: Some(format!("{}_secret_{}", id, secret)),
            id,
            amount: Some(amount),
            booking_id,
            created_at,
        })
    }

    async fn attempt(&self, intent: &PaymentIntent) -> CoreResult<PaymentOutcome> {
        tracing::info!("Mock gateway approving payment intent {}", intent.id);
        Ok(PaymentOutcome::Succeeded)
    }
}
