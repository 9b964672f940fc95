use serde::{Deserialize, Serialize};
use std::fmt;

/// Host-owned customer identifier (the platform's integer user id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub u64);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Customer status as stored by the host's user-attribute store.
///
/// Exactly one status applies at a time. `B2bAccepted` unlocks net pricing,
/// free-sample incentives, and the B2B-only catalog; everything else shops
/// at retail conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    Guest,
    B2c,
    B2bPending,
    B2bAccepted,
}

impl CustomerStatus {
    /// Interpret the raw value the host keeps on the user record.
    ///
    /// Unknown or absent values fall back to the non-privileged default:
    /// `B2c` for a logged-in user, `Guest` otherwise.
    pub fn from_stored(value: Option<&str>, logged_in: bool) -> Self {
        match value {
            Some("b2c") => CustomerStatus::B2c,
            Some("b2b_pending") => CustomerStatus::B2bPending,
            Some("b2b_accepted") => CustomerStatus::B2bAccepted,
            _ if logged_in => CustomerStatus::B2c,
            _ => CustomerStatus::Guest,
        }
    }

    /// The stored string form of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Guest => "guest",
            CustomerStatus::B2c => "b2c",
            CustomerStatus::B2bPending => "b2b_pending",
            CustomerStatus::B2bAccepted => "b2b_accepted",
        }
    }

    pub fn is_b2b_accepted(&self) -> bool {
        matches!(self, CustomerStatus::B2bAccepted)
    }

    pub fn is_b2b_pending(&self) -> bool {
        matches!(self, CustomerStatus::B2bPending)
    }

    /// Whether the status lifecycle permits moving to `next`.
    ///
    /// Submitting the B2B registration form moves `Guest`/`B2c` to
    /// `B2bPending`; administrative approval moves `B2bPending` to
    /// `B2bAccepted`. Nothing revokes `B2bAccepted` here; it is terminal
    /// for this system's purposes.
    pub fn can_transition_to(&self, next: CustomerStatus) -> bool {
        matches!(
            (self, next),
            (CustomerStatus::Guest, CustomerStatus::B2bPending)
                | (CustomerStatus::B2c, CustomerStatus::B2bPending)
                | (CustomerStatus::B2bPending, CustomerStatus::B2bAccepted)
        )
    }

    /// Validated transition to `next`.
    pub fn transition(&self, next: CustomerStatus) -> Result<CustomerStatus, StatusError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(StatusError::InvalidTransition {
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
            })
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_value_roundtrip() {
        for status in [
            CustomerStatus::B2c,
            CustomerStatus::B2bPending,
            CustomerStatus::B2bAccepted,
        ] {
            assert_eq!(
                CustomerStatus::from_stored(Some(status.as_str()), true),
                status
            );
        }
    }

    #[test]
    fn test_unknown_value_falls_back() {
        assert_eq!(
            CustomerStatus::from_stored(Some("vip"), true),
            CustomerStatus::B2c
        );
        assert_eq!(
            CustomerStatus::from_stored(None, false),
            CustomerStatus::Guest
        );
    }

    #[test]
    fn test_lifecycle_transitions() {
        let pending = CustomerStatus::Guest
            .transition(CustomerStatus::B2bPending)
            .unwrap();
        let accepted = pending.transition(CustomerStatus::B2bAccepted).unwrap();
        assert!(accepted.is_b2b_accepted());
    }

    #[test]
    fn test_accepted_is_terminal() {
        let result = CustomerStatus::B2bAccepted.transition(CustomerStatus::B2c);
        assert!(result.is_err());
    }

    #[test]
    fn test_guest_cannot_skip_review() {
        let result = CustomerStatus::Guest.transition(CustomerStatus::B2bAccepted);
        assert!(matches!(
            result,
            Err(StatusError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_serde_uses_stored_strings() {
        let json = serde_json::to_string(&CustomerStatus::B2bAccepted).unwrap();
        assert_eq!(json, "\"b2b_accepted\"");
    }
}
