use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::RegistrationStatus;

use crate::entity::registration;
use crate::error::AppError;
use crate::models::event::EventResponse;
use crate::models::shared::{EventSummary, validate_email, validate_text};

/// Request body for the public tournament registration form.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateRegistrationRequest {
    /// Contact person's full name.
    #[schema(example = "Ada Obaseki")]
    pub full_name: String,
    /// Contact email. Ownership key for the school dashboard.
    #[schema(example = "rep@school.example")]
    pub email: String,
    pub phone: Option<String>,
    /// School or organization name.
    pub organization: Option<String>,
    /// Submitter's self-declared role.
    #[schema(example = "teacher")]
    pub role: String,
    /// First team member.
    pub student1_name: Option<String>,
    pub student1_email: Option<String>,
    /// Second team member.
    pub student2_name: Option<String>,
    pub student2_email: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

pub fn validate_create_registration(payload: &CreateRegistrationRequest) -> Result<(), AppError> {
    validate_text(&payload.full_name, "Full name")?;
    validate_email(&payload.email)?;
    validate_text(&payload.role, "Role")?;
    Ok(())
}

/// Request body for the public contact form. Stored as a registration with
/// no event or school reference.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ContactRequest {
    /// Sender's name.
    #[schema(example = "Ada Obaseki")]
    pub name: String,
    /// Sender's email.
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub phone: Option<String>,
    /// Message subject.
    #[schema(example = "Partnership enquiry")]
    pub subject: String,
    /// Message body.
    pub message: String,
}

pub fn validate_contact_request(payload: &ContactRequest) -> Result<(), AppError> {
    validate_text(&payload.name, "Name")?;
    validate_email(&payload.email)?;
    validate_text(&payload.subject, "Subject")?;
    if payload.message.trim().is_empty() {
        return Err(AppError::Validation("Message must not be empty".into()));
    }
    Ok(())
}

/// Request body for the admin status transition.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateStatusRequest {
    /// Target status. Requesting the current status is a successful no-op.
    pub status: RegistrationStatus,
}

/// A registration as returned by the API.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RegistrationResponse {
    pub id: Uuid,
    pub event_id: Option<Uuid>,
    pub school_id: Option<Uuid>,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub role: String,
    pub interest: String,
    pub student1_name: Option<String>,
    pub student1_email: Option<String>,
    pub student2_name: Option<String>,
    pub student2_email: Option<String>,
    pub notes: Option<String>,
    /// One of: pending, approved, rejected.
    #[schema(example = "pending")]
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<registration::Model> for RegistrationResponse {
    fn from(model: registration::Model) -> Self {
        Self {
            id: model.id,
            event_id: model.event_id,
            school_id: model.school_id,
            full_name: model.full_name,
            email: model.email,
            phone: model.phone,
            organization: model.organization,
            role: model.role,
            interest: model.interest,
            student1_name: model.student1_name,
            student1_email: model.student1_email,
            student2_name: model.student2_name,
            student2_email: model.student2_email,
            notes: model.notes,
            status: model.status,
            created_at: model.created_at,
        }
    }
}

/// A registration row on the school dashboard, joined with its event when
/// the reference resolves.
#[derive(Serialize, utoipa::ToSchema)]
pub struct OwnedRegistrationResponse {
    #[serde(flatten)]
    pub registration: RegistrationResponse,
    /// The event this registration attaches to, if any.
    pub event: Option<EventSummary>,
}

/// Summary counts over the registration collection.
///
/// Always recomputed from an authoritative re-read, never patched locally,
/// so a rejected remote write can never make the counts drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct RegistrationStats {
    #[schema(example = 12)]
    pub total: u64,
    #[schema(example = 5)]
    pub pending: u64,
    #[schema(example = 6)]
    pub approved: u64,
    #[schema(example = 1)]
    pub rejected: u64,
}

impl RegistrationStats {
    /// Count rows by status. Rows with an unrecognized status string still
    /// count toward the total.
    pub fn summarize<'a>(rows: impl IntoIterator<Item = &'a registration::Model>) -> Self {
        let mut stats = Self {
            total: 0,
            pending: 0,
            approved: 0,
            rejected: 0,
        };
        for row in rows {
            stats.total += 1;
            match row.status.parse::<RegistrationStatus>() {
                Ok(RegistrationStatus::Pending) => stats.pending += 1,
                Ok(RegistrationStatus::Approved) => stats.approved += 1,
                Ok(RegistrationStatus::Rejected) => stats.rejected += 1,
                Err(_) => {}
            }
        }
        stats
    }
}

/// Drop every row whose submitter email differs from the session email.
///
/// The school dashboard applies this on top of the store-level filter; the
/// school-scoped view must never expose a row the caller does not own. The
/// match is exact, like everywhere else email is compared.
pub fn scope_to_submitter<E>(
    rows: Vec<(registration::Model, E)>,
    session_email: &str,
) -> Vec<(registration::Model, E)> {
    rows.into_iter()
        .filter(|(row, _)| row.email == session_email)
        .collect()
}

/// Response for the admin status transition: the authoritative row and the
/// counts recomputed after the write.
#[derive(Serialize, utoipa::ToSchema)]
pub struct TransitionResponse {
    pub registration: RegistrationResponse,
    pub stats: RegistrationStats,
}

/// School dashboard payload.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SchoolDashboardResponse {
    pub registrations: Vec<OwnedRegistrationResponse>,
    pub stats: RegistrationStats,
}

/// Admin dashboard payload.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AdminDashboardResponse {
    pub registrations: Vec<RegistrationResponse>,
    pub events: Vec<EventResponse>,
    pub stats: RegistrationStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(email: &str, status: &str) -> registration::Model {
        registration::Model {
            id: Uuid::new_v4(),
            event_id: None,
            school_id: None,
            full_name: "Ada Obaseki".into(),
            email: email.into(),
            phone: None,
            organization: None,
            role: "teacher".into(),
            interest: "event".into(),
            student1_name: None,
            student1_email: None,
            student2_name: None,
            student2_email: None,
            notes: None,
            status: status.into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn summarize_counts_by_status() {
        let rows = vec![
            row("a@x", "pending"),
            row("b@x", "pending"),
            row("c@x", "approved"),
            row("d@x", "rejected"),
        ];
        let stats = RegistrationStats::summarize(&rows);
        assert_eq!(
            stats,
            RegistrationStats {
                total: 4,
                pending: 2,
                approved: 1,
                rejected: 1,
            }
        );
    }

    #[test]
    fn summarize_keeps_unknown_statuses_in_the_total() {
        let rows = vec![row("a@x", "pending"), row("b@x", "garbage")];
        let stats = RegistrationStats::summarize(&rows);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.approved + stats.rejected, 0);
    }

    #[test]
    fn transition_moves_one_row_between_counts() {
        let mut rows = vec![
            row("a@x", "pending"),
            row("b@x", "pending"),
            row("c@x", "approved"),
        ];
        let before = RegistrationStats::summarize(&rows);

        rows[0].status = "approved".into();
        let after = RegistrationStats::summarize(&rows);

        assert_eq!(after.total, before.total);
        assert_eq!(after.pending, before.pending - 1);
        assert_eq!(after.approved, before.approved + 1);
        assert_eq!(after.rejected, before.rejected);
    }

    #[test]
    fn scoping_never_leaks_foreign_rows() {
        let rows = vec![
            (row("rep@school.example", "pending"), ()),
            (row("other@school.example", "approved"), ()),
            (row("rep@school.example", "rejected"), ()),
            // Exact match only: case differences are foreign rows.
            (row("REP@school.example", "pending"), ()),
        ];
        let owned = scope_to_submitter(rows, "rep@school.example");
        assert_eq!(owned.len(), 2);
        assert!(owned.iter().all(|(r, _)| r.email == "rep@school.example"));
    }

    #[test]
    fn scoping_an_empty_collection_is_empty() {
        let rows: Vec<(registration::Model, ())> = Vec::new();
        assert!(scope_to_submitter(rows, "rep@school.example").is_empty());
    }
}
