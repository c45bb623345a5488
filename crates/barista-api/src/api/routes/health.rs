//! Health check route handler

use crate::api::types::HealthCheckResponse;
use axum::Json;

/// Liveness probe; the only unauthenticated route.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthCheckResponse)
    ),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: crate::VERSION.to_string(),
    })
}
