use std::rc::Rc;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::verify_token;
use crate::error::AppError;

/// Bearer-token authorization middleware.
///
/// Wraps the scopes that require identity. Per request:
/// - missing or malformed `Authorization` header: 401
/// - present but failing verification (signature, expiry): 403
/// - verified: decoded `Claims` are inserted into request extensions and the
///   request proceeds.
pub struct AuthMiddleware {
    secret: Rc<String>,
}

impl AuthMiddleware {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Rc::new(secret.into()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            secret: Rc::clone(&self.secret),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    secret: Rc<String>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let bearer = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let token = match bearer {
            Some(token) if !token.is_empty() => token,
            _ => {
                let app_err = AppError::Unauthorized("Access denied, no token provided".into());
                return Box::pin(async move { Err(app_err.into()) });
            }
        };

        match verify_token(token, &self.secret) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(fut)
            }
            // verify_token maps failures to AppError::Forbidden (403).
            Err(app_err) => Box::pin(async move { Err(app_err.into()) }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::generate_token;
    use crate::models::user::test_user;
    use actix_web::{test, web, App, HttpResponse};

    const SECRET: &str = "middleware-test-secret";

    async fn protected() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    macro_rules! protected_app {
        () => {
            test::init_service(App::new().service(
                web::scope("/private")
                    .wrap(AuthMiddleware::new(SECRET))
                    .route("/ping", web::get().to(protected)),
            ))
            .await
        };
    }

    #[actix_rt::test]
    async fn test_missing_token_yields_401() {
        let app = protected_app!();

        let req = test::TestRequest::get().uri("/private/ping").to_request();
        let err = app.call(req).await.unwrap_err();
        assert_eq!(err.error_response().status(), 401);
    }

    #[actix_rt::test]
    async fn test_malformed_header_yields_401() {
        let app = protected_app!();

        let req = test::TestRequest::get()
            .uri("/private/ping")
            .append_header(("Authorization", "Token abc"))
            .to_request();
        let err = app.call(req).await.unwrap_err();
        assert_eq!(err.error_response().status(), 401);
    }

    #[actix_rt::test]
    async fn test_invalid_token_yields_403() {
        let app = protected_app!();

        let req = test::TestRequest::get()
            .uri("/private/ping")
            .append_header(("Authorization", "Bearer not-a-valid-token"))
            .to_request();
        let err = app.call(req).await.unwrap_err();
        assert_eq!(err.error_response().status(), 403);
    }

    #[actix_rt::test]
    async fn test_expired_token_yields_403() {
        let app = protected_app!();

        let user = test_user(1, "expired@example.com");
        let expired = generate_token(&user, SECRET, -60).unwrap();

        let req = test::TestRequest::get()
            .uri("/private/ping")
            .append_header(("Authorization", format!("Bearer {}", expired)))
            .to_request();
        let err = app.call(req).await.unwrap_err();
        assert_eq!(err.error_response().status(), 403);
    }

    #[actix_rt::test]
    async fn test_valid_token_passes_through() {
        let app = protected_app!();

        let user = test_user(1, "valid@example.com");
        let token = generate_token(&user, SECRET, 15).unwrap();

        let req = test::TestRequest::get()
            .uri("/private/ping")
            .append_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }
}
