use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use summit_shared::Masked;
use uuid::Uuid;

/// Payment lifecycle of a booking.
///
/// Transitions are deliberately unconstrained: any status may follow any
/// other, and no state is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Processing => "processing",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A guest's reservation against one experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub reference_number: String,
    /// Not checked against the catalog when the booking is stored.
    pub experience_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Masked<String>,
    pub phone: Masked<String>,
    pub checkin_date: NaiveDate,
    pub checkout_date: NaiveDate,
    pub participants: u32,
    pub special_requests: Option<String>,
    pub total_amount: Decimal,
    pub payment_status: PaymentStatus,
    pub payment_intent_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Build a fresh `pending` booking from validated guest input.
    pub fn new(data: NewBooking, reference_number: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            reference_number,
            experience_id: data.experience_id,
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            phone: data.phone,
            checkin_date: data.checkin_date,
            checkout_date: data.checkout_date,
            participants: data.participants,
            special_requests: data.special_requests,
            total_amount: data.total_amount,
            payment_status: PaymentStatus::Pending,
            payment_intent_id: None,
            created_at: Utc::now(),
        }
    }

    /// Overwrite the payment status; the intent id only changes when a new one is given.
    pub fn update_payment(&mut self, status: PaymentStatus, payment_intent_id: Option<String>) {
        self.payment_status = status;
        if let Some(intent_id) = payment_intent_id {
            self.payment_intent_id = Some(intent_id);
        }
    }
}

/// Booking fields a client may supply. Everything else is store-assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub experience_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Masked<String>,
    pub phone: Masked<String>,
    pub checkin_date: NaiveDate,
    pub checkout_date: NaiveDate,
    pub participants: u32,
    pub special_requests: Option<String>,
    pub total_amount: Decimal,
}
