//! Health check endpoint.

use axum::Json;

use crate::infrastructure::dto::http::HealthResponse;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
