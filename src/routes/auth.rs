use crate::{
    auth::{generate_token, hash_password, verify_password, AuthResponse, LoginRequest, RegisterRequest},
    config::Config,
    error::AppError,
    models::User,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

const USER_COLUMNS: &str = "id, name, email, phone, password_hash, gender, birth_date, \
     address, profession, nationality, profile_pic, created_at, updated_at";

/// Register a new user
///
/// Creates a new user account and returns a token together with the created
/// record. A duplicate email yields 409 and no second row.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    register_data.validate()?;

    // Check if email already exists
    let existing_user = sqlx::query_as::<_, (i32,)>("SELECT id FROM users WHERE email = $1")
        .bind(&register_data.email)
        .fetch_optional(&**pool)
        .await?;

    if existing_user.is_some() {
        return Err(AppError::Conflict("Email already exists".into()));
    }

    // Hash password
    let password_hash = hash_password(&register_data.password)?;

    // Insert new user
    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (name, email, phone, password_hash) VALUES ($1, $2, $3, $4) \
         RETURNING {}",
        USER_COLUMNS
    ))
    .bind(&register_data.name)
    .bind(&register_data.email)
    .bind(&register_data.phone)
    .bind(&password_hash)
    .fetch_one(&**pool)
    .await?;

    // Best-effort rollback of the just-created row if token issuance fails.
    let token = match generate_token(&user, &config.jwt_secret, config.jwt_ttl_minutes) {
        Ok(token) => token,
        Err(err) => {
            let _ = sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(user.id)
                .execute(&**pool)
                .await;
            return Err(err);
        }
    };

    Ok(HttpResponse::Created().json(json!({
        "message": "User registered successfully",
        "data": AuthResponse { token, user },
    })))
}

/// Login user
///
/// Authenticates a user against the stored password hash and returns a fresh
/// token. An unknown email and a wrong password are indistinguishable to the
/// client: both yield 401 "Invalid credentials".
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;

    // Get user from database
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE email = $1",
        USER_COLUMNS
    ))
    .bind(&login_data.email)
    .fetch_optional(&**pool)
    .await?;

    match user {
        Some(user) => {
            // Verify against the stored hash only.
            if verify_password(&login_data.password, &user.password_hash)? {
                let token = generate_token(&user, &config.jwt_secret, config.jwt_ttl_minutes)?;
                Ok(HttpResponse::Ok().json(json!({
                    "message": "User logged in successfully",
                    "data": AuthResponse { token, user },
                })))
            } else {
                Err(AppError::Unauthorized("Invalid credentials".into()))
            }
        }
        None => Err(AppError::Unauthorized("Invalid credentials".into())),
    }
}
