use chrono::{DateTime, Datelike, Utc};
use rand::Rng;

pub const REFERENCE_PREFIX: &str = "SM";

/// Upper bound (exclusive) of the random sequence component.
const SEQUENCE_SPACE: u32 = 999_999;

/// Draw a guest-facing reference number: `SM-<year>-<6 digit sequence>`.
///
/// The draw alone does not guarantee uniqueness; the store retries against
/// the references it already holds.
pub fn generate_reference<R: Rng>(rng: &mut R, issued_at: DateTime<Utc>) -> String {
    let sequence = rng.gen_range(0..SEQUENCE_SPACE);
    format!("{}-{:04}-{:06}", REFERENCE_PREFIX, issued_at.year(), sequence)
}

pub fn is_well_formed_reference(reference: &str) -> bool {
    let mut parts = reference.split('-');
    let (Some(prefix), Some(year), Some(sequence), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    prefix == REFERENCE_PREFIX
        && year.len() == 4
        && year.bytes().all(|b| b.is_ascii_digit())
        && sequence.len() == 6
        && sequence.bytes().all(|b| b.is_ascii_digit())
}
