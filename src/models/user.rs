use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::auth::PHONE_REGEX;

/// A user account as stored in the `users` table.
///
/// The password hash is carried for credential checks but never serialized
/// into responses. Wire field names are camelCase (`birthDate`,
/// `profilePic`).
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub profession: Option<String>,
    pub nationality: Option<String>,
    pub profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update payload for a user's profile.
///
/// Every field is optional; absent fields keep their stored value. Password
/// and email are deliberately not part of this payload, and unknown fields
/// are rejected at deserialization.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileUpdate {
    #[validate(length(min = 1, max = 100, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(regex(
        path = "PHONE_REGEX",
        message = "Phone must be a valid phone number"
    ))]
    pub phone: Option<String>,
    #[validate(length(max = 20))]
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(length(max = 100))]
    pub profession: Option<String>,
    #[validate(length(max = 100))]
    pub nationality: Option<String>,
    #[validate(length(max = 500))]
    pub profile_pic: Option<String>,
}

/// Builds a `User` with fixed timestamps for unit tests.
#[cfg(test)]
pub fn test_user(id: i32, email: &str) -> User {
    let now = Utc::now();
    User {
        id,
        name: "Test User".to_string(),
        email: email.to_string(),
        phone: "+1 555-0100".to_string(),
        password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
        gender: None,
        birth_date: None,
        address: None,
        profession: None,
        nationality: None,
        profile_pic: None,
        created_at: now,
        updated_at: now,
    }
}
