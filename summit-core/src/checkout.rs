use rust_decimal::Decimal;
use std::sync::Arc;
use summit_booking::{Booking, PaymentStatus};
use uuid::Uuid;

use crate::payment::{PaymentGateway, PaymentIntent, PaymentOutcome};
use crate::repository::BookingRepository;
use crate::CoreResult;

/// Result of confirming a payment against a booking.
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub booking: Booking,
    pub outcome: PaymentOutcome,
}

/// Drives booking payment status from gateway results. The gateway only
/// reports outcomes; the status transitions live here.
pub struct PaymentOrchestrator {
    gateway: Arc<dyn PaymentGateway>,
    bookings: Arc<dyn BookingRepository>,
}

impl PaymentOrchestrator {
    pub fn new(gateway: Arc<dyn PaymentGateway>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { gateway, bookings }
    }

    /// Initialize a payment intent, moving the booking (if any) to `processing`.
    ///
    /// An unknown booking id does not fail the request: the intent is still
    /// returned and the miss is logged.
    pub async fn initialize_payment(
        &self,
        amount: Decimal,
        booking_id: Option<Uuid>,
    ) -> CoreResult<PaymentIntent> {
        let intent = self.gateway.create_intent(amount, booking_id).await?;

        if let Some(booking_id) = booking_id {
            let updated = self
                .bookings
                .update_booking_payment_status(
                    booking_id,
                    PaymentStatus::Processing,
                    Some(intent.id.clone()),
                )
                .await?;

            match updated {
                Some(booking) => tracing::info!(
                    "Booking {} is processing payment intent {}",
                    booking.reference_number,
                    intent.id
                ),
                None => tracing::warn!(
                    "Payment intent {} references unknown booking {}",
                    intent.id,
                    booking_id
                ),
            }
        }

        Ok(intent)
    }

    /// Ask the gateway to settle `intent_id` and record the result on the booking.
    ///
    /// Returns `None` when the booking does not exist.
    pub async fn confirm_payment(
        &self,
        intent_id: &str,
        booking_id: Uuid,
    ) -> CoreResult<Option<Confirmation>> {
        // 1. Resolve the booking so the gateway sees the amount being collected
        let Some(booking) = self.bookings.get_booking(booking_id).await? else {
            return Ok(None);
        };

        // 2. Attempt the payment
        let intent = PaymentIntent::for_confirmation(intent_id, booking.id, booking.total_amount);
        let outcome = self.gateway.attempt(&intent).await?;

        // 3. Record the result
        let status = match &outcome {
            PaymentOutcome::Succeeded => PaymentStatus::Completed,
            PaymentOutcome::Declined { reason } => {
                tracing::warn!(
                    "Payment {} for booking {} declined: {}",
                    intent_id,
                    booking.reference_number,
                    reason
                );
                PaymentStatus::Failed
            }
        };

        let updated = self
            .bookings
            .update_booking_payment_status(booking_id, status, Some(intent_id.to_string()))
            .await?;

        Ok(updated.map(|booking| {
            tracing::info!("Booking {} payment {}", booking.reference_number, booking.payment_status);
            Confirmation { booking, outcome }
        }))
    }
}
