use std::collections::HashMap;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{event, school, winner};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthSession;
use crate::extractors::json::AppJson;
use crate::models::shared::{EventSummary, SchoolSummary};
use crate::models::winner::{CreateWinnerRequest, WinnerResponse, validate_create_winner};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/winners",
    tag = "Winners",
    operation_id = "listWinners",
    summary = "List past winners",
    description = "Public. Newest first, joined with event and school names. A winner whose event or school no longer resolves is returned with null joins rather than failing the read.",
    responses(
        (status = 200, description = "All winners", body = Vec<WinnerResponse>),
        (status = 500, description = "Collection fetch failed (READ_FAILURE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_winners(
    State(state): State<AppState>,
) -> Result<Json<Vec<WinnerResponse>>, AppError> {
    let winners = winner::Entity::find()
        .order_by_desc(winner::Column::CreatedAt)
        .all(&state.db)
        .await
        .map_err(|e| AppError::ReadFailure(e.to_string()))?;

    let event_ids: Vec<Uuid> = winners.iter().map(|w| w.event_id).collect();
    let school_ids: Vec<Uuid> = winners.iter().map(|w| w.school_id).collect();

    let events: HashMap<Uuid, event::Model> = event::Entity::find()
        .filter(event::Column::Id.is_in(event_ids))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|e| (e.id, e))
        .collect();

    let schools: HashMap<Uuid, school::Model> = school::Entity::find()
        .filter(school::Column::Id.is_in(school_ids))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    let responses = winners
        .into_iter()
        .map(|w| {
            let event = events.get(&w.event_id).cloned().map(EventSummary::from);
            let school = schools.get(&w.school_id).cloned().map(SchoolSummary::from);
            WinnerResponse::from_parts(w, event, school)
        })
        .collect();

    Ok(Json(responses))
}

#[utoipa::path(
    post,
    path = "/api/v1/winners",
    tag = "Winners",
    operation_id = "createWinner",
    summary = "Record a winner",
    description = "Admin only. Expected to follow an approved registration, but that precondition is informal and not checked here.",
    request_body = CreateWinnerRequest,
    responses(
        (status = 201, description = "Winner recorded", body = WinnerResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, session, payload), fields(position = payload.position))]
pub async fn create_winner(
    session: AuthSession,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateWinnerRequest>,
) -> Result<impl IntoResponse, AppError> {
    session.require_admin()?;
    validate_create_winner(&payload)?;

    let new_winner = winner::ActiveModel {
        id: Set(Uuid::new_v4()),
        event_id: Set(payload.event_id),
        school_id: Set(payload.school_id),
        position: Set(payload.position),
        student_names: Set(payload.student_names.trim().to_string()),
        video_url: Set(payload.video_url),
        image_url: Set(payload.image_url),
        created_at: Set(chrono::Utc::now()),
    };

    let model = new_winner.insert(&state.db).await?;

    let event = event::Entity::find_by_id(model.event_id)
        .one(&state.db)
        .await?
        .map(EventSummary::from);
    let school = school::Entity::find_by_id(model.school_id)
        .one(&state.db)
        .await?
        .map(SchoolSummary::from);

    Ok((
        StatusCode::CREATED,
        Json(WinnerResponse::from_parts(model, event, school)),
    ))
}
