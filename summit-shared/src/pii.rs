use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Guest contact data (email, phone) and credentials that must never show up in
/// `Debug` output or log lines. Serialization passes the real value through,
/// since API responses need it.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> From<T> for Masked<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> Masked<T> {
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_value() {
        let email = Masked("guest@example.com".to_string());
        assert_eq!(format!("{:?}", email), "********");
        assert_eq!(email.to_string(), "********");
        assert_eq!(email.expose(), "guest@example.com");
    }

    #[test]
    fn test_serialization_keeps_value() {
        let phone = Masked("+44 20 7946 0000".to_string());
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"+44 20 7946 0000\"");

        let back: Masked<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, phone);
    }
}
