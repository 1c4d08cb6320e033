//! # Quill API Server
//!
//! Actix-web application exposing the posts resource under `/api`.
//! The binary in `main.rs` only wires configuration, telemetry and the
//! HTTP server around [`configure_app`].

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;

use actix_web::web;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Register shared state, extractor configuration and all routes.
pub fn configure_app(state: AppState) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(state.clone()))
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
            )
            .app_data(
                web::PathConfig::default()
                    .error_handler(|_err, req| AppError::NotFound(req.path().to_string()).into()),
            )
            .configure(handlers::configure_routes);
    }
}
