use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::{info, instrument};
use uuid::Uuid;

use common::RegistrationStatus;

use crate::entity::{event, registration};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthSession;
use crate::extractors::json::AppJson;
use crate::models::registration::{
    ContactRequest, CreateRegistrationRequest, RegistrationResponse, RegistrationStats,
    TransitionResponse, UpdateStatusRequest, validate_contact_request,
    validate_create_registration,
};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/registrations",
    tag = "Registrations",
    operation_id = "createRegistration",
    summary = "Submit the tournament registration form",
    description = "Public. Attaches the registration to the active event when one exists, otherwise leaves the event reference null. New rows always start as `pending`.",
    request_body = CreateRegistrationRequest,
    responses(
        (status = 201, description = "Registration created", body = RegistrationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn create_registration(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateRegistrationRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_registration(&payload)?;

    // Attach to whichever active event the store returns first. The
    // at-most-one-active invariant is maintained by data entry, not here.
    let active_event = event::Entity::find()
        .filter(event::Column::IsActive.eq(true))
        .one(&state.db)
        .await?;

    let new_registration = registration::ActiveModel {
        id: Set(Uuid::new_v4()),
        event_id: Set(active_event.map(|e| e.id)),
        school_id: Set(None),
        full_name: Set(payload.full_name),
        email: Set(payload.email),
        phone: Set(payload.phone),
        organization: Set(payload.organization),
        role: Set(payload.role),
        interest: Set("event".to_string()),
        student1_name: Set(payload.student1_name),
        student1_email: Set(payload.student1_email),
        student2_name: Set(payload.student2_name),
        student2_email: Set(payload.student2_email),
        notes: Set(payload.notes),
        status: Set(RegistrationStatus::Pending.as_str().to_string()),
        created_at: Set(chrono::Utc::now()),
    };

    let model = new_registration.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(RegistrationResponse::from(model))))
}

#[utoipa::path(
    post,
    path = "/api/v1/contact",
    tag = "Registrations",
    operation_id = "submitContactForm",
    summary = "Submit the contact form",
    description = "Public. Stored as a registration with no event or school reference so it shows up in the same admin triage queue.",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Message recorded", body = RegistrationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn contact(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ContactRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_contact_request(&payload)?;

    let new_registration = registration::ActiveModel {
        id: Set(Uuid::new_v4()),
        event_id: Set(None),
        school_id: Set(None),
        full_name: Set(payload.name),
        email: Set(payload.email),
        phone: Set(payload.phone),
        organization: Set(None),
        role: Set("other".to_string()),
        interest: Set("partner".to_string()),
        student1_name: Set(None),
        student1_email: Set(None),
        student2_name: Set(None),
        student2_email: Set(None),
        notes: Set(Some(format!(
            "Subject: {}\n\nMessage: {}",
            payload.subject, payload.message
        ))),
        status: Set(RegistrationStatus::Pending.as_str().to_string()),
        created_at: Set(chrono::Utc::now()),
    };

    let model = new_registration.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(RegistrationResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/api/v1/registrations",
    tag = "Registrations",
    operation_id = "listRegistrations",
    summary = "List all registrations",
    description = "Admin only. Newest first.",
    responses(
        (status = 200, description = "All registrations", body = Vec<RegistrationResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, session))]
pub async fn list_registrations(
    session: AuthSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<RegistrationResponse>>, AppError> {
    session.require_admin()?;

    let rows = registration::Entity::find()
        .order_by_desc(registration::Column::CreatedAt)
        .all(&state.db)
        .await
        .map_err(|e| AppError::ReadFailure(e.to_string()))?;

    Ok(Json(rows.into_iter().map(RegistrationResponse::from).collect()))
}

#[utoipa::path(
    patch,
    path = "/api/v1/registrations/{id}/status",
    tag = "Registrations",
    operation_id = "updateRegistrationStatus",
    summary = "Transition a registration's status",
    description = "Admin only. Any transition among pending/approved/rejected is legal, including re-triage; requesting the current status is a successful no-op. Returns only after re-reading the full collection, so the returned counts always reflect the write.",
    params(("id" = Uuid, Path, description = "Registration ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Authoritative row and recomputed counts", body = TransitionResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Registration not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Write or re-read failed (WRITE_REJECTED, READ_FAILURE)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, session, payload), fields(id = %id, status = %payload.status))]
pub async fn update_status(
    session: AuthSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateStatusRequest>,
) -> Result<Json<TransitionResponse>, AppError> {
    session.require_admin()?;

    let row = registration::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Registration not found".into()))?;

    if row.status != payload.status.as_str() {
        let mut active: registration::ActiveModel = row.into();
        active.status = Set(payload.status.as_str().to_string());
        active
            .update(&state.db)
            .await
            .map_err(|e| AppError::WriteRejected(e.to_string()))?;
        info!(id = %id, status = %payload.status, "Registration status changed");
    }

    // Authoritative re-read. Counts are recomputed from the store rather
    // than patched locally, so a rejected write can never leave them stale.
    let rows = registration::Entity::find()
        .order_by_desc(registration::Column::CreatedAt)
        .all(&state.db)
        .await
        .map_err(|e| AppError::ReadFailure(e.to_string()))?;

    let stats = RegistrationStats::summarize(&rows);
    let fresh = rows
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| AppError::NotFound("Registration not found".into()))?;

    Ok(Json(TransitionResponse {
        registration: RegistrationResponse::from(fresh),
        stats,
    }))
}
