use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{ProfileUpdate, User},
};
use actix_web::{get, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

const USER_COLUMNS: &str = "id, name, email, phone, password_hash, gender, birth_date, \
     address, profession, nationality, profile_pic, created_at, updated_at";

/// Returns the authenticated user's profile.
///
/// The identity comes from the verified token claims; the row is re-read so a
/// user deleted after token issuance yields 404 rather than stale data.
#[get("/profile")]
pub async fn get_profile(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let profile = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE id = $1",
        USER_COLUMNS
    ))
    .bind(user.id())
    .fetch_optional(&**pool)
    .await?;

    match profile {
        Some(profile) => Ok(HttpResponse::Ok().json(json!({
            "message": "Profile information",
            "data": profile,
        }))),
        None => Err(AppError::NotFound("User not found".into())),
    }
}

/// Updates profile fields of a user.
///
/// Partial update: absent fields keep their stored value. Password and email
/// are not part of the payload and unknown fields are rejected. A caller may
/// only update their own profile.
#[put("/profile/{id}")]
pub async fn update_profile(
    pool: web::Data<PgPool>,
    user_id: web::Path<i32>,
    user: AuthenticatedUser,
    update: web::Json<ProfileUpdate>,
) -> Result<impl Responder, AppError> {
    update.validate()?;

    let target_id = user_id.into_inner();
    if target_id != user.id() {
        return Err(AppError::Forbidden(
            "Cannot update another user's profile".into(),
        ));
    }

    let updated = sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET \
             name = COALESCE($1, name), \
             phone = COALESCE($2, phone), \
             gender = COALESCE($3, gender), \
             birth_date = COALESCE($4, birth_date), \
             address = COALESCE($5, address), \
             profession = COALESCE($6, profession), \
             nationality = COALESCE($7, nationality), \
             profile_pic = COALESCE($8, profile_pic), \
             updated_at = now() \
         WHERE id = $9 RETURNING {}",
        USER_COLUMNS
    ))
    .bind(&update.name)
    .bind(&update.phone)
    .bind(&update.gender)
    .bind(update.birth_date)
    .bind(&update.address)
    .bind(&update.profession)
    .bind(&update.nationality)
    .bind(&update.profile_pic)
    .bind(target_id)
    .fetch_optional(&**pool)
    .await?;

    match updated {
        Some(profile) => Ok(HttpResponse::Ok().json(json!({
            "message": "Profile updated successfully",
            "data": profile,
        }))),
        None => Err(AppError::NotFound("User not found".into())),
    }
}
