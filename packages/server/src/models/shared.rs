use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;

/// Serde helper for PATCH semantics on nullable fields.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Validate a required text field (1-256 Unicode characters after trimming).
pub fn validate_text(value: &str, name: &str) -> Result<(), AppError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > 256 {
        return Err(AppError::Validation(format!(
            "{name} must be 1-256 characters"
        )));
    }
    Ok(())
}

/// Validate an email address.
///
/// Deliberately shallow: presence and a rough shape only. The stored string
/// is matched exactly elsewhere (no case folding, no trimming), so
/// validation must not normalize it either.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    if email.is_empty() || email.chars().count() > 320 {
        return Err(AppError::Validation(
            "Email must be 1-320 characters".into(),
        ));
    }
    if !email.contains('@') {
        return Err(AppError::Validation("Email must contain '@'".into()));
    }
    Ok(())
}

/// Event fields embedded in registration and winner rows.
#[derive(Serialize, utoipa::ToSchema)]
pub struct EventSummary {
    /// Event title.
    #[schema(example = "4th Annual Mathematics Tournament")]
    pub title: String,
    /// Date the event takes place.
    pub event_date: DateTime<Utc>,
}

impl From<crate::entity::event::Model> for EventSummary {
    fn from(event: crate::entity::event::Model) -> Self {
        Self {
            title: event.title,
            event_date: event.event_date,
        }
    }
}

/// School fields embedded in winner rows.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SchoolSummary {
    /// School name.
    #[schema(example = "Unity Secondary School")]
    pub name: String,
}

impl From<crate::entity::school::Model> for SchoolSummary {
    fn from(school: crate::entity::school::Model) -> Self {
        Self { name: school.name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_bounds() {
        assert!(validate_text("Unity Secondary School", "Name").is_ok());
        assert!(validate_text("   ", "Name").is_err());
        assert!(validate_text(&"a".repeat(257), "Name").is_err());
    }

    #[test]
    fn email_shape_only() {
        assert!(validate_email("Rep@School.Example").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("").is_err());
    }
}
