//! Health check endpoint.

use actix_web::HttpResponse;
use serde::Serialize;

use crate::observability::RequestId;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub request_id: String,
}

/// GET /api/health
pub async fn health_check(request_id: RequestId) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        request_id: request_id.as_str().to_string(),
    })
}
