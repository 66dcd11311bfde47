pub mod models;
pub mod reference;
pub mod validation;

pub use models::{Booking, NewBooking, PaymentStatus};
pub use reference::{generate_reference, is_well_formed_reference, REFERENCE_PREFIX};
pub use validation::{validate_new_booking, FieldError, ValidationErrors};
