use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wrapper for registration and billing fields that must never reach logs
/// in the clear (NIP, email, phone).
///
/// Masking applies to `Debug` and `Display` only; serialization passes the
/// real value through so payloads handed back to the host stay intact.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T> {
    value: T,
}

impl<T> Masked<T> {
    pub fn new(value: T) -> Self {
        Masked { value }
    }

    pub fn as_inner(&self) -> &T {
        &self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> From<T> for Masked<T> {
    fn from(value: T) -> Self {
        Masked::new(value)
    }
}

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
        self.value.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_never_shows_value() {
        let nip: Masked<String> = Masked::new("5260250274".to_string());
        assert_eq!(format!("{:?}", nip), "********");
        assert_eq!(format!("{}", nip), "********");
    }

    #[test]
    fn test_serialization_passes_through() {
        let email = Masked::new("owner@example.com".to_string());
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"owner@example.com\"");
    }

    #[test]
    fn test_deserializes_from_plain_value() {
        let masked: Masked<String> = serde_json::from_str("\"600700800\"").unwrap();
        assert_eq!(masked.as_inner(), "600700800");
    }
}
