use axum::Json;
use axum::extract::State;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{event, registration};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthSession;
use crate::models::event::EventResponse;
use crate::models::registration::{
    AdminDashboardResponse, OwnedRegistrationResponse, RegistrationResponse, RegistrationStats,
    SchoolDashboardResponse, scope_to_submitter,
};
use crate::models::shared::EventSummary;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/school",
    tag = "Dashboards",
    operation_id = "schoolDashboard",
    summary = "School dashboard",
    description = "Requires a school association on the session. Returns only registrations whose submitter email exactly equals the session email, each joined with its event when the reference resolves, plus summary counts.",
    responses(
        (status = 200, description = "Owned registrations and counts", body = SchoolDashboardResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "No school association (PERMISSION_DENIED)", body = ErrorBody),
        (status = 500, description = "Collection fetch failed (READ_FAILURE)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, session), fields(email = %session.email))]
pub async fn school_dashboard(
    session: AuthSession,
    State(state): State<AppState>,
) -> Result<Json<SchoolDashboardResponse>, AppError> {
    session.require_school()?;

    let rows = registration::Entity::find()
        .filter(registration::Column::Email.eq(&session.email))
        .find_also_related(event::Entity)
        .order_by_desc(registration::Column::CreatedAt)
        .all(&state.db)
        .await
        .map_err(|e| AppError::ReadFailure(e.to_string()))?;

    // Ownership filter layered on top of the store-side one: this view must
    // never expose a row whose submitter email differs from the session's.
    let owned = scope_to_submitter(rows, &session.email);

    let stats = RegistrationStats::summarize(owned.iter().map(|(r, _)| r));
    let registrations = owned
        .into_iter()
        .map(|(row, event)| OwnedRegistrationResponse {
            registration: RegistrationResponse::from(row),
            event: event.map(EventSummary::from),
        })
        .collect();

    Ok(Json(SchoolDashboardResponse {
        registrations,
        stats,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/admin",
    tag = "Dashboards",
    operation_id = "adminDashboard",
    summary = "Admin dashboard",
    description = "Admin only. The unfiltered registration collection newest first, the event list, and summary counts by status.",
    responses(
        (status = 200, description = "Registrations, events, and counts", body = AdminDashboardResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 500, description = "Collection fetch failed (READ_FAILURE)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, session))]
pub async fn admin_dashboard(
    session: AuthSession,
    State(state): State<AppState>,
) -> Result<Json<AdminDashboardResponse>, AppError> {
    session.require_admin()?;

    let registrations = registration::Entity::find()
        .order_by_desc(registration::Column::CreatedAt)
        .all(&state.db)
        .await
        .map_err(|e| AppError::ReadFailure(e.to_string()))?;

    let events = event::Entity::find()
        .order_by_desc(event::Column::EventDate)
        .all(&state.db)
        .await
        .map_err(|e| AppError::ReadFailure(e.to_string()))?;

    let stats = RegistrationStats::summarize(&registrations);

    Ok(Json(AdminDashboardResponse {
        registrations: registrations
            .into_iter()
            .map(RegistrationResponse::from)
            .collect(),
        events: events.into_iter().map(EventResponse::from).collect(),
        stats,
    }))
}
