use axum::{extract::FromRequestParts, http::request::Parts};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use common::Role;

use crate::entity::{admin_user, school};
use crate::error::AppError;
use crate::guard::{self, SessionState};
use crate::state::AppState;
use crate::utils::jwt;

/// The session rehydrated from the `Authorization: Bearer <token>` header.
///
/// Add this as a handler parameter to require authentication. Rehydration
/// verifies the credential and re-derives the role via exactly two lookups:
/// the admin allow-list and the school table, both keyed by exact email.
pub struct AuthSession {
    pub account_id: Uuid,
    pub email: String,
    pub role: Role,
    pub school_id: Option<Uuid>,
}

impl AuthSession {
    /// Returns `Ok(())` for administrators, `Err(PermissionDenied)` otherwise.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }

    /// Returns the school id for sessions with a school association,
    /// `Err(PermissionDenied)` otherwise.
    pub fn require_school(&self) -> Result<Uuid, AppError> {
        self.school_id.ok_or(AppError::PermissionDenied)
    }

    /// The route-guard view of this session.
    pub fn state(&self) -> SessionState {
        SessionState::Authenticated {
            role: self.role,
            school_id: self.school_id,
        }
    }
}

async fn rehydrate(parts: &Parts, state: &AppState) -> Result<AuthSession, AppError> {
    let auth_header = parts
        .headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::TokenMissing)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::TokenInvalid)?;

    let claims = jwt::verify(token, &state.config.auth.jwt_secret)
        .map_err(|_| AppError::TokenInvalid)?;

    // The two role-determining lookups, by exact email match.
    let is_admin_listed = admin_user::Entity::find()
        .filter(admin_user::Column::Email.eq(&claims.sub))
        .one(&state.db)
        .await?
        .is_some();

    let school_id = school::Entity::find()
        .filter(school::Column::Email.eq(&claims.sub))
        .one(&state.db)
        .await?
        .map(|s| s.id);

    Ok(AuthSession {
        account_id: claims.uid,
        email: claims.sub,
        role: guard::resolve_role(is_admin_listed, school_id),
        school_id,
    })
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        rehydrate(parts, state).await
    }
}

/// Session for routes that serve both anonymous and signed-in callers.
///
/// A missing or unverifiable credential yields `None` (anonymous) instead of
/// a rejection; store failures during rehydration still surface.
pub struct MaybeSession(pub Option<AuthSession>);

impl MaybeSession {
    /// The route-guard view of this caller.
    pub fn state(&self) -> SessionState {
        match &self.0 {
            Some(session) => session.state(),
            None => SessionState::Anonymous,
        }
    }
}

impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match rehydrate(parts, state).await {
            Ok(session) => Ok(MaybeSession(Some(session))),
            Err(AppError::TokenMissing | AppError::TokenInvalid) => Ok(MaybeSession(None)),
            Err(e) => Err(e),
        }
    }
}
