use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::winner;
use crate::error::AppError;
use crate::models::shared::{EventSummary, SchoolSummary, validate_text};

/// Request body for recording a winner.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateWinnerRequest {
    /// Event the result belongs to.
    pub event_id: Uuid,
    /// School that placed.
    pub school_id: Uuid,
    /// Final placing, 1-based.
    #[schema(example = 1)]
    pub position: i32,
    /// Names of the placing students.
    #[schema(example = "Ada Obaseki, Efe Igbinedion")]
    pub student_names: String,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
}

pub fn validate_create_winner(payload: &CreateWinnerRequest) -> Result<(), AppError> {
    if payload.position < 1 {
        return Err(AppError::Validation(
            "Position must be a positive integer".into(),
        ));
    }
    validate_text(&payload.student_names, "Student names")?;
    Ok(())
}

/// A winner as returned by the API, joined with event and school when the
/// references resolve. Dangling references yield null joins, never a failed
/// read.
#[derive(Serialize, utoipa::ToSchema)]
pub struct WinnerResponse {
    pub id: Uuid,
    pub position: i32,
    pub student_names: String,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub event: Option<EventSummary>,
    pub school: Option<SchoolSummary>,
}

impl WinnerResponse {
    pub fn from_parts(
        model: winner::Model,
        event: Option<EventSummary>,
        school: Option<SchoolSummary>,
    ) -> Self {
        Self {
            id: model.id,
            position: model.position,
            student_names: model.student_names,
            video_url: model.video_url,
            image_url: model.image_url,
            created_at: model.created_at,
            event,
            school,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(position: i32) -> CreateWinnerRequest {
        CreateWinnerRequest {
            event_id: Uuid::new_v4(),
            school_id: Uuid::new_v4(),
            position,
            student_names: "Ada Obaseki, Efe Igbinedion".into(),
            video_url: None,
            image_url: None,
        }
    }

    #[test]
    fn position_must_be_positive() {
        assert!(validate_create_winner(&request(1)).is_ok());
        assert!(validate_create_winner(&request(0)).is_err());
        assert!(validate_create_winner(&request(-3)).is_err());
    }
}
