pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::User;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

lazy_static! {
    // Digits with optional leading "+" and common separators.
    pub static ref PHONE_REGEX: regex::Regex =
        regex::Regex::new(r"^\+?[0-9][0-9\-\s()]{5,18}$").unwrap();
}

/// Represents the payload for a user login request.
///
/// Unknown fields are rejected at deserialization.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    /// User's email address.
    #[validate(email(message = "Invalid email format, please enter a valid email"))]
    pub email: String,
    /// User's password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
///
/// Unknown fields are rejected at deserialization.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    /// Display name for the new account.
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    /// Email address for the new account. Must be unique.
    #[validate(email(message = "Invalid email format, please enter a valid email"))]
    pub email: String,
    /// Contact phone number.
    #[validate(regex(
        path = "PHONE_REGEX",
        message = "Phone must be a valid phone number"
    ))]
    pub phone: String,
    /// Password for the new account.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Payload returned after successful authentication (login or registration).
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// The signed JWT carrying the user's identity claims.
    pub token: String,
    /// The authenticated user record (password hash excluded).
    pub user: User,
}
