use crate::error::AppError;
use crate::models::User;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Identity claims encoded within a JWT.
///
/// Claims are never persisted; they are reconstructed per request from the
/// bearer token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: i32,
    /// Display name of the user.
    pub name: String,
    /// Contact phone number of the user.
    pub phone: String,
    /// Email address of the user.
    pub email: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Signs a short-lived JWT carrying the given user's identity claims.
///
/// The signing secret and token lifetime come from process configuration,
/// passed in explicitly.
///
/// # Returns
/// The encoded token string, or `AppError::InternalServerError` if encoding
/// fails or the expiry timestamp overflows.
pub fn generate_token(user: &User, secret: &str, ttl_minutes: i64) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expiration = now
        .checked_add_signed(chrono::Duration::minutes(ttl_minutes))
        .ok_or_else(|| AppError::InternalServerError("Token expiry out of range".into()))?;

    let claims = Claims {
        sub: user.id,
        name: user.name.clone(),
        phone: user.phone.clone(),
        email: user.email.clone(),
        iat: now.timestamp() as usize,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Verifies a JWT string and decodes its claims.
///
/// Default validation checks apply (signature, expiration). A token that is
/// malformed, carries a bad signature, or has expired yields
/// `AppError::Forbidden`.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Forbidden(format!("Invalid token: {}", e)))
}
