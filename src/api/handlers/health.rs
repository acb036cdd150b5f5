use crate::config::StorageConfig;
use axum::{Json, response::IntoResponse};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub archive: String,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health status", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check() -> impl IntoResponse {
    // Configuration is per-call, so this only reports presence, not
    // connectivity.
    let archive = if StorageConfig::from_env().is_ok() {
        "configured"
    } else {
        "not configured"
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        archive: archive.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
