use async_trait::async_trait;
use summit_booking::{Booking, NewBooking, PaymentStatus};
use summit_catalog::{Experience, NewExperience};
use uuid::Uuid;

use crate::user::{NewUser, User};
use crate::CoreResult;

// Lookups report a missing record as `Ok(None)`. `Err` is reserved for the
// store itself failing. Every returned value is a snapshot owned by the caller.

/// Repository trait for user credential records
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user(&self, id: Uuid) -> CoreResult<Option<User>>;

    /// Case-sensitive exact match.
    async fn get_user_by_username(&self, username: &str) -> CoreResult<Option<User>>;

    async fn create_user(&self, user: NewUser) -> CoreResult<User>;
}

/// Repository trait for the experience catalog
#[async_trait]
pub trait ExperienceRepository: Send + Sync {
    /// All experiences in catalog order.
    async fn get_all_experiences(&self) -> CoreResult<Vec<Experience>>;

    async fn get_experience(&self, id: &str) -> CoreResult<Option<Experience>>;

    async fn create_experience(&self, experience: NewExperience) -> CoreResult<Experience>;
}

/// Repository trait for bookings
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn get_booking(&self, id: Uuid) -> CoreResult<Option<Booking>>;

    async fn get_booking_by_reference(&self, reference: &str) -> CoreResult<Option<Booking>>;

    /// Assign id, reference number and timestamp, then store as `pending`.
    async fn create_booking(&self, booking: NewBooking) -> CoreResult<Booking>;

    /// Overwrite the payment status of a booking. The intent id is only
    /// replaced when `payment_intent_id` is `Some`.
    async fn update_booking_payment_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
        payment_intent_id: Option<String>,
    ) -> CoreResult<Option<Booking>>;
}
