use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bookable tour or retreat offering.
///
/// Seeded experiences carry slug ids (`meditation-retreats`); experiences
/// created at runtime get a UUID string from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Per-participant price, two fraction digits.
    pub price: Decimal,
    /// Free-text range such as "2-3 hours".
    pub duration: String,
    pub image: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Experience fields supplied by a caller; the id is store-assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExperience {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub duration: String,
    pub image: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl NewExperience {
    pub fn with_id(self, id: String) -> Experience {
        Experience {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            duration: self.duration,
            image: self.image,
            kind: self.kind,
        }
    }
}
