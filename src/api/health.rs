//! Health check endpoints for liveness/readiness probes

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::state::AppState;
use crate::api::types::Json;

/// Health response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Simple health check - returns 200 if the service is running
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Readiness check - verifies the engine state is reachable
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let (status, health) = match state.engine.snapshot() {
        Ok(_) => (StatusCode::OK, HealthStatus::Healthy),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, HealthStatus::Unhealthy),
    };

    let response = HealthResponse {
        status: health,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (status, Json(response))
}

/// Liveness check for crash detection
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}
