use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::HashMap;
use summit_booking::{generate_reference, Booking, NewBooking, PaymentStatus};
use summit_catalog::{seed_catalog, Experience, NewExperience};
use summit_core::repository::{BookingRepository, ExperienceRepository, UserRepository};
use summit_core::user::{NewUser, User};
use summit_core::{CoreError, CoreResult};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::app_config::BookingConfig;

#[derive(Default)]
struct BookingTable {
    by_id: HashMap<Uuid, Booking>,
    by_reference: HashMap<String, Uuid>,
}

/// Process-wide in-memory store. Construct once at startup and share it
/// behind an `Arc`; every operation takes a single lock, so inserts and
/// updates are atomic per entry.
pub struct MemStorage {
    users: RwLock<HashMap<Uuid, User>>,
    experiences: RwLock<Vec<Experience>>,
    bookings: RwLock<BookingTable>,
    reference_attempts: u32,
}

impl MemStorage {
    /// A store seeded with the standard catalog.
    pub fn new(config: &BookingConfig) -> Self {
        Self::with_catalog(config, seed_catalog())
    }

    pub fn with_catalog(config: &BookingConfig, catalog: Vec<Experience>) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            experiences: RwLock::new(catalog),
            bookings: RwLock::new(BookingTable::default()),
            reference_attempts: config.reference_attempts.max(1),
        }
    }

    /// Draw reference numbers until one is not already taken.
    fn issue_reference<R: Rng>(
        &self,
        table: &BookingTable,
        rng: &mut R,
        issued_at: DateTime<Utc>,
    ) -> CoreResult<String> {
        for _ in 0..self.reference_attempts {
            let reference = generate_reference(&mut *rng, issued_at);
            if !table.by_reference.contains_key(&reference) {
                return Ok(reference);
            }
            tracing::warn!("Booking reference {} already issued, drawing again", reference);
        }

        Err(CoreError::ReferenceExhausted {
            attempts: self.reference_attempts,
        })
    }

    /// Assign the server-side fields and index the booking. Nothing is
    /// written when no free reference could be drawn.
    fn insert_booking<R: Rng>(
        &self,
        table: &mut BookingTable,
        booking: NewBooking,
        rng: &mut R,
        issued_at: DateTime<Utc>,
    ) -> CoreResult<Booking> {
        let reference = self.issue_reference(table, rng, issued_at)?;
        let mut booking = Booking::new(booking, reference);
        while table.by_id.contains_key(&booking.id) {
            booking.id = Uuid::new_v4();
        }

        table.by_reference.insert(booking.reference_number.clone(), booking.id);
        table.by_id.insert(booking.id, booking.clone());
        Ok(booking)
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new(&BookingConfig::default())
    }
}

#[async_trait]
impl UserRepository for MemStorage {
    async fn get_user(&self, id: Uuid) -> CoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> CoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, user: NewUser) -> CoreResult<User> {
        let mut users = self.users.write().await;
        let mut user = user.into_user();
        while users.contains_key(&user.id) {
            user.id = Uuid::new_v4();
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl ExperienceRepository for MemStorage {
    async fn get_all_experiences(&self) -> CoreResult<Vec<Experience>> {
        let experiences = self.experiences.read().await;
        Ok(experiences.clone())
    }

    async fn get_experience(&self, id: &str) -> CoreResult<Option<Experience>> {
        let experiences = self.experiences.read().await;
        Ok(experiences.iter().find(|e| e.id == id).cloned())
    }

    async fn create_experience(&self, experience: NewExperience) -> CoreResult<Experience> {
        let mut experiences = self.experiences.write().await;
        let mut experience = experience.with_id(Uuid::new_v4().to_string());
        experience.price.rescale(2);
        experiences.push(experience.clone());
        info!("Experience {} added to catalog", experience.id);
        Ok(experience)
    }
}

#[async_trait]
impl BookingRepository for MemStorage {
    async fn get_booking(&self, id: Uuid) -> CoreResult<Option<Booking>> {
        let table = self.bookings.read().await;
        Ok(table.by_id.get(&id).cloned())
    }

    async fn get_booking_by_reference(&self, reference: &str) -> CoreResult<Option<Booking>> {
        let table = self.bookings.read().await;
        Ok(table
            .by_reference
            .get(reference)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn create_booking(&self, booking: NewBooking) -> CoreResult<Booking> {
        let mut table = self.bookings.write().await;

        let booking =
            self.insert_booking(&mut table, booking, &mut rand::thread_rng(), Utc::now())?;

        info!(
            "Booking {} created for experience {} ({} participants)",
            booking.reference_number, booking.experience_id, booking.participants
        );
        Ok(booking)
    }

    async fn update_booking_payment_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
        payment_intent_id: Option<String>,
    ) -> CoreResult<Option<Booking>> {
        let mut table = self.bookings.write().await;
        let Some(booking) = table.by_id.get_mut(&id) else {
            return Ok(None);
        };

        let previous = booking.payment_status;
        booking.update_payment(status, payment_intent_id);
        info!(
            "Booking {} payment status {} -> {}",
            booking.reference_number, previous, booking.payment_status
        );
        Ok(Some(booking.clone()))
    }
}
