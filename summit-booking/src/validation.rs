//! Decoding of inbound booking payloads.
//!
//! Every field is checked before returning, so a single response can list all
//! the problems with a submission rather than just the first one.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};
use std::str::FromStr;
use summit_shared::Masked;
use thiserror::Error;

use crate::models::NewBooking;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One field that failed validation. `field` is the JSON key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation{}", .errors.len(), field_summary(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

fn field_summary(errors: &[FieldError]) -> String {
    let fields: Vec<String> = errors
        .iter()
        .map(|e| format!("{} ({})", e.field, e.message))
        .collect();
    if fields.is_empty() {
        String::new()
    } else {
        format!(": {}", fields.join("; "))
    }
}

/// Decode a raw booking-creation payload into a typed [`NewBooking`].
///
/// Store-assigned keys (`id`, `referenceNumber`, `paymentStatus`,
/// `paymentIntentId`, `createdAt`) and unknown keys are ignored.
pub fn validate_new_booking(payload: &Value) -> Result<NewBooking, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let Some(fields) = payload.as_object() else {
        errors.push("body", "Expected a JSON object");
        return Err(errors);
    };

    let experience_id = required_text(fields, "experienceId", &mut errors);
    let first_name = required_text(fields, "firstName", &mut errors);
    let last_name = required_text(fields, "lastName", &mut errors);
    let email = email(fields, "email", &mut errors);
    let phone = required_text(fields, "phone", &mut errors);
    let checkin_date = date(fields, "checkinDate", &mut errors);
    let checkout_date = date(fields, "checkoutDate", &mut errors);
    let participants = participants(fields, "participants", &mut errors);
    let total_amount = amount(fields, "totalAmount", &mut errors);
    let special_requests = optional_text(fields, "specialRequests", &mut errors);

    if let (Some(checkin), Some(checkout)) = (checkin_date, checkout_date) {
        if checkout < checkin {
            errors.push("checkoutDate", "Check-out date must be on or after the check-in date");
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let (
        Some(experience_id),
        Some(first_name),
        Some(last_name),
        Some(email),
        Some(phone),
        Some(checkin_date),
        Some(checkout_date),
        Some(participants),
        Some(total_amount),
        Some(special_requests),
    ) = (
        experience_id,
        first_name,
        last_name,
        email,
        phone,
        checkin_date,
        checkout_date,
        participants,
        total_amount,
        special_requests,
    )
    else {
        return Err(errors);
    };

    Ok(NewBooking {
        experience_id,
        first_name,
        last_name,
        email: Masked(email),
        phone: Masked(phone),
        checkin_date,
        checkout_date,
        participants,
        special_requests,
        total_amount,
    })
}

/// Look up a field, recording a "required" error when it is absent or null.
fn present<'a>(
    fields: &'a Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<&'a Value> {
    match fields.get(field) {
        None | Some(Value::Null) => {
            errors.push(field, format!("{} is required", field));
            None
        }
        Some(value) => Some(value),
    }
}

fn required_text(
    fields: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match present(fields, field, errors)? {
        Value::String(s) if s.trim().is_empty() => {
            errors.push(field, format!("{} must not be empty", field));
            None
        }
        Value::String(s) => Some(s.trim().to_string()),
        _ => {
            errors.push(field, format!("{} must be a string", field));
            None
        }
    }
}

/// `Some(None)` means the field was legitimately left out.
fn optional_text(
    fields: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<Option<String>> {
    match fields.get(field) {
        None | Some(Value::Null) => Some(None),
        Some(Value::String(s)) if s.trim().is_empty() => Some(None),
        Some(Value::String(s)) => Some(Some(s.trim().to_string())),
        Some(_) => {
            errors.push(field, format!("{} must be a string", field));
            None
        }
    }
}

fn email(fields: &Map<String, Value>, field: &str, errors: &mut ValidationErrors) -> Option<String> {
    let address = required_text(fields, field, errors)?;
    if is_valid_email(&address) {
        Some(address)
    } else {
        errors.push(field, "Invalid email address");
        None
    }
}

fn is_valid_email(address: &str) -> bool {
    if address.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

fn date(fields: &Map<String, Value>, field: &str, errors: &mut ValidationErrors) -> Option<NaiveDate> {
    match present(fields, field, errors)? {
        Value::String(s) => match NaiveDate::parse_from_str(s.trim(), DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push(field, format!("{} must be a date in YYYY-MM-DD format", field));
                None
            }
        },
        _ => {
            errors.push(field, format!("{} must be a string", field));
            None
        }
    }
}

/// Accepts any JSON number that is integral in value, so `2.0` counts as 2.
fn participants(fields: &Map<String, Value>, field: &str, errors: &mut ValidationErrors) -> Option<u32> {
    let value = present(fields, field, errors)?;
    let Some(count) = value.as_f64().filter(|c| c.fract() == 0.0) else {
        errors.push(field, format!("{} must be a whole number", field));
        return None;
    };

    if count < 1.0 {
        errors.push(field, "At least 1 participant is required");
        None
    } else if count > f64::from(u32::MAX) {
        errors.push(field, "Too many participants");
        None
    } else {
        Some(count as u32)
    }
}

fn amount(fields: &Map<String, Value>, field: &str, errors: &mut ValidationErrors) -> Option<Decimal> {
    let parsed = match present(fields, field, errors)? {
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    };

    let Some(mut amount) = parsed else {
        errors.push(field, format!("{} must be a decimal amount", field));
        return None;
    };

    if amount < Decimal::ZERO {
        errors.push(field, format!("{} must not be negative", field));
        return None;
    }
    if amount.normalize().scale() > 2 {
        errors.push(field, format!("{} must have at most two decimal places", field));
        return None;
    }

    // rescale leaves the scale alone when the value is too large to carry cents
    amount.rescale(2);
    if amount.scale() != 2 {
        errors.push(field, format!("{} is too large", field));
        return None;
    }
    Some(amount)
}
