//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;

use actix_web::{HttpMessage, HttpRequest, web};

use crate::middleware::auth::RequireAuth;
use crate::middleware::error::{AppError, AppResult};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Post resource, every route behind authentication
            .service(
                web::scope("/posts")
                    .wrap(RequireAuth)
                    .route("", web::get().to(posts::index))
                    .route("", web::post().to(posts::store))
                    .route("/{id}", web::get().to(posts::show))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::destroy)),
            ),
    );
}

/// Parse an optional JSON or form-encoded request body.
///
/// `application/x-www-form-urlencoded` bodies are decoded as forms, anything
/// else as JSON. An empty body reads as the payload's defaults so that missing
/// fields are reported by validation rather than as a malformed request.
fn parse_body<T>(req: &HttpRequest, body: &web::Bytes) -> AppResult<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    if req
        .content_type()
        .eq_ignore_ascii_case("application/x-www-form-urlencoded")
    {
        return serde_urlencoded::from_bytes(body)
            .map_err(|e| AppError::BadRequest(format!("Invalid form body: {}", e)));
    }

    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))
}
