use std::sync::Arc;
use summit_core::checkout::PaymentOrchestrator;
use summit_core::payment::PaymentGateway;
use summit_core::repository::{BookingRepository, ExperienceRepository};

#[derive(Clone)]
pub struct AppState {
    pub experiences: Arc<dyn ExperienceRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub payments: Arc<PaymentOrchestrator>,
}

impl AppState {
    /// Wire handlers to one shared store and a payment gateway.
    pub fn new<S>(storage: Arc<S>, gateway: Arc<dyn PaymentGateway>) -> Self
    where
        S: ExperienceRepository + BookingRepository + 'static,
    {
        let bookings: Arc<dyn BookingRepository> = storage.clone();
        let experiences: Arc<dyn ExperienceRepository> = storage;

        Self {
            payments: Arc::new(PaymentOrchestrator::new(gateway, bookings.clone())),
            experiences,
            bookings,
        }
    }
}
