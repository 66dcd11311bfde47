use serde::{Deserialize, Serialize};
use summit_shared::Masked;
use uuid::Uuid;

/// Credential record. Not used by the booking flow; kept for the store contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: Masked<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: Masked<String>,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Masked(password.into()),
        }
    }

    pub fn into_user(self) -> User {
        User {
            id: Uuid::new_v4(),
            username: self.username,
            password: self.password,
        }
    }
}
