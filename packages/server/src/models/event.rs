use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::event;
use crate::error::AppError;
use crate::models::shared::{double_option, validate_text};

/// Request body for creating an event.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateEventRequest {
    /// Event title.
    #[schema(example = "4th Annual Mathematics Tournament")]
    pub title: String,
    /// Event description.
    pub description: Option<String>,
    /// Date the event takes place.
    pub event_date: DateTime<Utc>,
    /// Venue name.
    #[schema(example = "Victor Uwaifo Creative Hub, Benin City")]
    pub venue: String,
    /// Start of the registration window.
    pub registration_start: Option<DateTime<Utc>>,
    /// End of the registration window.
    pub registration_end: Option<DateTime<Utc>>,
    /// Poster image URL.
    pub image_url: Option<String>,
    /// Highlight video URL.
    pub video_url: Option<String>,
    /// Whether the public registration form attaches to this event.
    #[serde(default)]
    pub is_active: bool,
}

pub fn validate_create_event(payload: &CreateEventRequest) -> Result<(), AppError> {
    validate_text(&payload.title, "Title")?;
    validate_text(&payload.venue, "Venue")?;
    Ok(())
}

/// Request body for updating an event.
///
/// Nullable columns use explicit null-vs-absent semantics: omitted fields are
/// untouched, `null` clears the column.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub event_date: Option<DateTime<Utc>>,
    pub venue: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub registration_start: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub registration_end: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub video_url: Option<Option<String>>,
    pub is_active: Option<bool>,
}

pub fn validate_update_event(payload: &UpdateEventRequest) -> Result<(), AppError> {
    if let Some(ref title) = payload.title {
        validate_text(title, "Title")?;
    }
    if let Some(ref venue) = payload.venue {
        validate_text(venue, "Venue")?;
    }
    Ok(())
}

/// An event as returned by the API.
#[derive(Serialize, utoipa::ToSchema)]
pub struct EventResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub venue: String,
    pub registration_start: Option<DateTime<Utc>>,
    pub registration_end: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<event::Model> for EventResponse {
    fn from(model: event::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            event_date: model.event_date,
            venue: model.venue,
            registration_start: model.registration_start,
            registration_end: model.registration_end,
            image_url: model.image_url,
            video_url: model.video_url,
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_distinguishes_null_from_absent() {
        let patch: UpdateEventRequest = serde_json::from_str(r#"{"image_url": null}"#).unwrap();
        assert_eq!(patch.image_url, Some(None));
        assert!(patch.video_url.is_none());

        let patch: UpdateEventRequest =
            serde_json::from_str(r#"{"video_url": "https://example.com/v"}"#).unwrap();
        assert_eq!(patch.video_url, Some(Some("https://example.com/v".into())));
    }
}
