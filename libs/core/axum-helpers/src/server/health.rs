use axum::{Json, http::StatusCode};
use futures::future::join_all;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::future::Future;
use std::pin::Pin;
use utoipa::ToSchema;

/// Liveness payload: the process is up, plus database reachability
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always "healthy" while the process serves requests
    pub status: String,
    /// Configured database name
    pub database: String,
    /// Whether the database answered a ping
    pub connected: bool,
}

impl HealthResponse {
    pub fn new(database: impl Into<String>, connected: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            database: database.into(),
            connected,
        }
    }
}

/// A boxed future for health checks with a string error
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Runs multiple readiness checks concurrently and aggregates the results.
///
/// 200 with `{"status":"ready","<name>":"connected",..}` when every check
/// passes, otherwise 503 with `"not ready"` and the failing checks marked
/// `"disconnected"`.
///
/// ```ignore
/// let checks: Vec<(&str, HealthCheckFuture)> = vec![(
///     "mongodb",
///     Box::pin(async { store.ping().await.map_err(|e| e.to_string()) }),
/// )];
/// run_health_checks(checks).await
/// ```
pub async fn run_health_checks(
    checks: Vec<(&str, HealthCheckFuture<'_>)>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let names: Vec<_> = checks.iter().map(|(name, _)| *name).collect();
    let futures: Vec<_> = checks.into_iter().map(|(_, check)| check).collect();
    let results = join_all(futures).await;

    let mut map = Map::new();
    let mut all_healthy = true;

    for (name, result) in names.into_iter().zip(results) {
        let status = match result {
            Ok(_) => "connected",
            Err(e) => {
                tracing::error!(check = name, error = %e, "Readiness check failed");
                all_healthy = false;
                "disconnected"
            }
        };
        map.insert(name.to_string(), json!(status));
    }

    map.insert(
        "status".to_string(),
        json!(if all_healthy { "ready" } else { "not ready" }),
    );

    if all_healthy {
        Ok((StatusCode::OK, Json(Value::Object(map))))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(Value::Object(map))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_all_checks_pass() {
        let checks: Vec<(&str, HealthCheckFuture)> =
            vec![("mongodb", Box::pin(async { Ok(()) }))];

        let (status, Json(body)) = run_health_checks(checks).await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ready", "mongodb": "connected"}));
    }

    #[tokio::test]
    async fn test_failing_check_is_unavailable() {
        let checks: Vec<(&str, HealthCheckFuture)> = vec![
            ("mongodb", Box::pin(async { Err("timeout".to_string()) })),
            ("disk", Box::pin(async { Ok(()) })),
        ];

        let (status, Json(body)) = run_health_checks(checks).await.unwrap_err();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "not ready");
        assert_eq!(body["mongodb"], "disconnected");
        assert_eq!(body["disk"], "connected");
    }

    #[test]
    fn test_health_response_serializes() {
        let value = serde_json::to_value(HealthResponse::new("event_management_db", true)).unwrap();
        assert_eq!(
            value,
            json!({"status": "healthy", "database": "event_management_db", "connected": true})
        );
    }
}
