pub mod auth;
pub mod health;
pub mod profile;
pub mod tasks;

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::auth::AuthMiddleware;
use crate::config::Config;

/// Mounts the versioned API surface. The `/auth` scope stays open; `/tasks`
/// and `/user` require a bearer token.
pub fn config(cfg: &mut web::ServiceConfig, settings: &Config) {
    cfg.service(
        web::scope("/auth")
            .service(auth::register)
            .service(auth::login),
    )
    .service(
        web::scope("/tasks")
            .wrap(AuthMiddleware::new(settings.jwt_secret.clone()))
            .service(tasks::get_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    )
    .service(
        web::scope("/user")
            .wrap(AuthMiddleware::new(settings.jwt_secret.clone()))
            .service(profile::get_profile)
            .service(profile::update_profile),
    );
}

/// Fallback handler for unmatched routes.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "error": "Route does not exist" }))
}
