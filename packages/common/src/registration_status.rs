use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Triage status of a registration.
///
/// Every registration is created as `Pending`. Administrators may move a row
/// to any status at any time, including back again; there is no terminal
/// state. Transitioning to the current status is a successful no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    /// Submitted and awaiting admin review.
    Pending,
    /// Accepted for the tournament.
    Approved,
    /// Declined after review.
    Rejected,
}

impl RegistrationStatus {
    /// All possible status values.
    pub const ALL: &'static [RegistrationStatus] =
        &[Self::Pending, Self::Approved, Self::Rejected];

    /// Returns true if the row still needs admin attention.
    pub fn needs_review(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns the string representation as stored in the database (lowercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for RegistrationStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Error when parsing an invalid status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError {
    invalid: String,
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid status '{}'. Valid values: {}",
            self.invalid,
            RegistrationStatus::ALL
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for RegistrationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseStatusError {
                invalid: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_roundtrip() {
        for status in RegistrationStatus::ALL {
            let json = serde_json::to_string(status).unwrap();
            let parsed: RegistrationStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(*status, parsed);
        }
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RegistrationStatus::Pending).unwrap(),
            "\"pending\""
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "approved".parse::<RegistrationStatus>().unwrap(),
            RegistrationStatus::Approved
        );
        assert!("Approved".parse::<RegistrationStatus>().is_err());
        assert!("cancelled".parse::<RegistrationStatus>().is_err());
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(RegistrationStatus::default(), RegistrationStatus::Pending);
        assert!(RegistrationStatus::default().needs_review());
    }
}
