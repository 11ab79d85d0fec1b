use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::event;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthSession;
use crate::extractors::json::AppJson;
use crate::models::event::{
    CreateEventRequest, EventResponse, UpdateEventRequest, validate_create_event,
    validate_update_event,
};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    operation_id = "listEvents",
    summary = "List all events",
    description = "Public. Newest event date first.",
    responses(
        (status = 200, description = "All events", body = Vec<EventResponse>),
        (status = 500, description = "Collection fetch failed (READ_FAILURE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    let events = event::Entity::find()
        .order_by_desc(event::Column::EventDate)
        .all(&state.db)
        .await
        .map_err(|e| AppError::ReadFailure(e.to_string()))?;

    Ok(Json(events.into_iter().map(EventResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/events/active",
    tag = "Events",
    operation_id = "activeEvent",
    summary = "Get the active event",
    description = "Public. The event the registration form currently attaches to. The body is null when none is flagged active.",
    responses(
        (status = 200, description = "Active event, or null", body = EventResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn active_event(
    State(state): State<AppState>,
) -> Result<Json<Option<EventResponse>>, AppError> {
    let active = event::Entity::find()
        .filter(event::Column::IsActive.eq(true))
        .one(&state.db)
        .await?;

    Ok(Json(active.map(EventResponse::from)))
}

#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "Events",
    operation_id = "createEvent",
    summary = "Create an event",
    description = "Admin only. The active flag is taken as given; nothing deactivates other events, keeping at most one active is a data-entry concern.",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, session, payload), fields(title = %payload.title))]
pub async fn create_event(
    session: AuthSession,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    session.require_admin()?;
    validate_create_event(&payload)?;

    let new_event = event::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description),
        event_date: Set(payload.event_date),
        venue: Set(payload.venue.trim().to_string()),
        registration_start: Set(payload.registration_start),
        registration_end: Set(payload.registration_end),
        image_url: Set(payload.image_url),
        video_url: Set(payload.video_url),
        is_active: Set(payload.is_active),
        created_at: Set(chrono::Utc::now()),
    };

    let model = new_event.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(EventResponse::from(model))))
}

#[utoipa::path(
    patch,
    path = "/api/v1/events/{id}",
    tag = "Events",
    operation_id = "updateEvent",
    summary = "Update an event",
    description = "Admin only. Omitted fields are untouched; explicit nulls clear nullable columns.",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated", body = EventResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, session, payload), fields(id = %id))]
pub async fn update_event(
    session: AuthSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateEventRequest>,
) -> Result<Json<EventResponse>, AppError> {
    session.require_admin()?;
    validate_update_event(&payload)?;

    let model = event::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".into()))?;

    let mut active: event::ActiveModel = model.into();

    if let Some(title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(event_date) = payload.event_date {
        active.event_date = Set(event_date);
    }
    if let Some(venue) = payload.venue {
        active.venue = Set(venue.trim().to_string());
    }
    if let Some(registration_start) = payload.registration_start {
        active.registration_start = Set(registration_start);
    }
    if let Some(registration_end) = payload.registration_end {
        active.registration_end = Set(registration_end);
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(image_url);
    }
    if let Some(video_url) = payload.video_url {
        active.video_url = Set(video_url);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }

    let model = active.update(&state.db).await?;

    Ok(Json(EventResponse::from(model)))
}
