use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT Claims structure.
///
/// Deliberately carries no role: roles are re-derived from the store on every
/// rehydration so they can never go stale across sign-outs.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Email
    pub uid: Uuid,   // Account ID
    pub exp: usize,  // Expiration timestamp
}

/// Sign a new JWT token for an account.
pub fn sign(account_id: Uuid, email: &str, secret: &str) -> Result<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::days(7))
        .expect("valid timestamp")
        .timestamp();

    let claims = Claims {
        sub: email.to_owned(),
        uid: account_id,
        exp: expiration as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verify and decode a JWT token.
pub fn verify(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_then_verify_returns_the_claims() {
        let id = Uuid::new_v4();
        let token = sign(id, "rep@school.example", "secret").unwrap();
        let claims = verify(&token, "secret").unwrap();
        assert_eq!(claims.uid, id);
        assert_eq!(claims.sub, "rep@school.example");
    }

    #[test]
    fn verify_rejects_a_different_secret() {
        let token = sign(Uuid::new_v4(), "rep@school.example", "secret").unwrap();
        assert!(verify(&token, "other-secret").is_err());
    }

    #[test]
    fn verify_rejects_garbage() {
        assert!(verify("not-a-token", "secret").is_err());
    }
}
