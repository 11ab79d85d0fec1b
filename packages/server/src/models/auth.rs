use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::Role;

use crate::error::AppError;
use crate::guard::{GuardDecision, RouteRequirement};
use crate::models::shared::{validate_email, validate_text};

/// Request body for school account registration.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Name of the school the account represents.
    #[schema(example = "Unity Secondary School")]
    pub school_name: String,
    /// Sign-in email. Also the ownership key for the school dashboard.
    #[schema(example = "rep@school.example")]
    pub email: String,
    /// Password (8-128 characters).
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
    /// Contact phone number.
    #[schema(example = "+234 800 000 0000")]
    pub phone: Option<String>,
    /// School address.
    pub address: Option<String>,
}

pub fn validate_register_request(payload: &RegisterRequest) -> Result<(), AppError> {
    validate_text(&payload.school_name, "School name")?;
    validate_email(&payload.email)?;
    if payload.password.len() < 8 || payload.password.len() > 128 {
        return Err(AppError::Validation(
            "Password must be 8-128 characters".into(),
        ));
    }
    Ok(())
}

/// Request body for sign-in.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Email of the account to sign into.
    #[schema(example = "rep@school.example")]
    pub email: String,
    /// Account password.
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.email.is_empty() {
        return Err(AppError::Validation("Email must not be empty".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

/// Successful registration response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    /// ID of the newly created account.
    pub account_id: Uuid,
    /// ID of the newly created school profile.
    pub school_id: Uuid,
    /// Sign-in email.
    #[schema(example = "rep@school.example")]
    pub email: String,
}

/// Successful sign-in response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token valid for 7 days.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// Signed-in email.
    #[schema(example = "rep@school.example")]
    pub email: String,
    /// Role derived at sign-in time.
    pub role: Role,
    /// School profile matched by email, if any.
    pub school_id: Option<Uuid>,
}

/// Current session, re-derived from the bearer credential.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SessionResponse {
    /// Account ID.
    pub account_id: Uuid,
    /// Signed-in email.
    #[schema(example = "rep@school.example")]
    pub email: String,
    /// Role derived at rehydration time.
    pub role: Role,
    /// School profile matched by email, if any.
    pub school_id: Option<Uuid>,
}

/// Query parameters for the route-guard endpoint.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GuardQuery {
    /// The requirement the route declares.
    pub require: RouteRequirement,
}

/// Route-guard evaluation result.
#[derive(Serialize, utoipa::ToSchema)]
pub struct GuardResponse {
    /// What the routing layer should do.
    pub decision: GuardDecision,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(password: &str) -> RegisterRequest {
        RegisterRequest {
            school_name: "Unity Secondary School".into(),
            email: "rep@school.example".into(),
            password: password.into(),
            phone: None,
            address: None,
        }
    }

    #[test]
    fn password_bounds() {
        assert!(validate_register_request(&request("securepass")).is_ok());
        assert!(validate_register_request(&request("short")).is_err());
        assert!(validate_register_request(&request(&"a".repeat(129))).is_err());
    }

    #[test]
    fn login_rejects_empty_fields() {
        assert!(
            validate_login_request(&LoginRequest {
                email: "".into(),
                password: "securepass".into(),
            })
            .is_err()
        );
        assert!(
            validate_login_request(&LoginRequest {
                email: "rep@school.example".into(),
                password: "".into(),
            })
            .is_err()
        );
    }
}
