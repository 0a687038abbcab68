use mongodb::{Database, bson::doc};
use std::time::Instant;

/// Health check status for MongoDB
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    /// Error details when unhealthy
    pub message: Option<String>,
    pub response_time_ms: u64,
}

/// Check MongoDB health with a `ping` command against `db`
pub async fn check_health(db: &Database) -> bool {
    db.run_command(doc! { "ping": 1 }).await.is_ok()
}

/// Check MongoDB health, reporting latency and error details
///
/// ```ignore
/// let status = check_health_detailed(&db).await;
/// if !status.healthy {
///     tracing::warn!(error = ?status.message, "MongoDB unhealthy");
/// }
/// ```
pub async fn check_health_detailed(db: &Database) -> HealthStatus {
    let start = Instant::now();
    let result = db.run_command(doc! { "ping": 1 }).await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms,
        },
    }
}
