use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{account, admin_user, school};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AuthSession, MaybeSession};
use crate::extractors::json::AppJson;
use crate::guard;
use crate::models::auth::{
    GuardQuery, GuardResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
    SessionResponse, validate_login_request, validate_register_request,
};
use crate::state::AppState;
use crate::utils::{hash, jwt};

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Auth",
    operation_id = "registerSchool",
    summary = "Register a school account",
    description = "Creates a sign-in account and its school profile in one transaction. The email becomes the ownership key for the school dashboard.",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account and school profile created", body = RegisterResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Email already registered (EMAIL_TAKEN)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_register_request(&payload)?;

    let password_hash = hash::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let now = chrono::Utc::now();
    let account_id = Uuid::new_v4();
    let school_id = Uuid::new_v4();

    let txn = state.db.begin().await?;

    let new_account = account::ActiveModel {
        id: Set(account_id),
        email: Set(payload.email.clone()),
        password_hash: Set(password_hash),
        created_at: Set(now),
    };

    new_account.insert(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::EmailTaken,
        _ => AppError::from(e),
    })?;

    let new_school = school::ActiveModel {
        id: Set(school_id),
        name: Set(payload.school_name.trim().to_string()),
        email: Set(payload.email.clone()),
        phone: Set(payload.phone),
        address: Set(payload.address),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_school.insert(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::EmailTaken,
        _ => AppError::from(e),
    })?;

    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            account_id,
            school_id,
            email: payload.email,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Sign in with email and password",
    description = "On success the role is derived from the admin allow-list and the school table (priority admin > school > anonymous) and a 7-day bearer token is issued. The token itself carries no role.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unknown email or wrong password (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    validate_login_request(&payload)?;

    let account = account::Entity::find()
        .filter(account::Column::Email.eq(&payload.email))
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let is_valid = hash::verify_password(&payload.password, &account.password_hash)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;

    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    // The two role-determining lookups, re-run on every sign-in.
    let is_admin_listed = admin_user::Entity::find()
        .filter(admin_user::Column::Email.eq(&account.email))
        .one(&state.db)
        .await?
        .is_some();

    let school_id = school::Entity::find()
        .filter(school::Column::Email.eq(&account.email))
        .one(&state.db)
        .await?
        .map(|s| s.id);

    let role = guard::resolve_role(is_admin_listed, school_id);

    let token = jwt::sign(account.id, &account.email, &state.config.auth.jwt_secret)
        .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    Ok(Json(LoginResponse {
        token,
        email: account.email,
        role,
        school_id,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Auth",
    operation_id = "logout",
    summary = "Sign out",
    description = "Always succeeds. Bearer tokens are stateless; the client discards its stored credential regardless of this call's outcome, and a discarded credential has no further capability.",
    responses(
        (status = 204, description = "Signed out"),
    ),
)]
#[instrument(skip(session))]
pub async fn logout(session: MaybeSession) -> StatusCode {
    if let MaybeSession(Some(session)) = session {
        tracing::info!(email = %session.email, "Signed out");
    }
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/session",
    tag = "Auth",
    operation_id = "currentSession",
    summary = "Rehydrate the current session",
    description = "Verifies the bearer credential and re-derives the role via the two role-determining lookups. The role is never read from the token.",
    responses(
        (status = 200, description = "Current session", body = SessionResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(session), fields(email = %session.email))]
pub async fn current_session(session: AuthSession) -> Json<SessionResponse> {
    Json(SessionResponse {
        account_id: session.account_id,
        email: session.email,
        role: session.role,
        school_id: session.school_id,
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/guard",
    tag = "Auth",
    operation_id = "evaluateGuard",
    summary = "Evaluate the route guard",
    description = "Given a route's declared requirement, returns what the routing layer should do for the caller: render, redirect-home (signed in, wrong role), or redirect-login (no identity).",
    params(GuardQuery),
    responses(
        (status = 200, description = "Guard decision", body = GuardResponse),
    ),
    security((), ("jwt" = [])),
)]
#[instrument(skip(session, query))]
pub async fn evaluate_guard(
    session: MaybeSession,
    Query(query): Query<GuardQuery>,
) -> Result<Json<GuardResponse>, AppError> {
    // Rehydration has already completed by the time the extractor returns,
    // so the state is never Unknown here.
    let decision = guard::decide(query.require, &session.state())
        .ok_or_else(|| AppError::Internal("guard suspended on a resolved session".into()))?;

    Ok(Json(GuardResponse { decision }))
}
