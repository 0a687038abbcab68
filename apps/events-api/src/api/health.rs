//! Liveness and readiness endpoints

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, HealthResponse, run_health_checks};
use serde_json::Value;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .with_state(state)
}

/// Liveness check; answers 200 even when the database is unreachable
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses((status = 200, description = "Process is up", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = state.store.ping().await.is_ok();
    Json(HealthResponse::new(state.database.clone(), connected))
}

/// Readiness check; 503 until MongoDB answers a ping
#[utoipa::path(
    get,
    path = "/ready",
    tag = "System",
    responses(
        (status = 200, description = "Every dependency is reachable"),
        (status = 503, description = "At least one dependency is unreachable")
    )
)]
pub async fn ready(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let store = state.store.clone();
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "mongodb",
        Box::pin(async move { store.ping().await.map_err(|e| e.to_string()) }),
    )];

    run_health_checks(checks).await
}
