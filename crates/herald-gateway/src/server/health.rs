//! Health view handlers
//!
//! Status page plus liveness and readiness probes.

use axum::{extract::State, http::StatusCode, response::Html, Json};

use herald_service::dto::{HealthResponse, ReadinessResponse};

use super::HealthState;

/// Status page
///
/// GET /
pub async fn index(State(state): State<HealthState>) -> Html<String> {
    let line = if state.status().is_connected() {
        format!("✅ {} is online", state.app_name())
    } else {
        format!("⏳ {} is connecting", state.app_name())
    };
    Html(format!("<h1>{line}</h1>"))
}

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness: database reachable and gateway connected
///
/// GET /health/ready
pub async fn readiness_check(
    State(state): State<HealthState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let db_healthy = state.service_context().database_healthy().await;
    let gateway_connected = state.status().is_connected();

    let response = ReadinessResponse::ready(db_healthy, gateway_connected);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
