//! Server infrastructure module.
//!
//! - Router construction with OpenAPI documentation and middleware
//! - Health and readiness helpers
//! - Graceful shutdown coordination
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, &server_config)?;
//! create_production_app(router, &server_config, Duration::from_secs(30), cleanup).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{DOCS_PATH, OPENAPI_JSON_PATH, create_app, create_production_app, create_router};
pub use health::{HealthCheckFuture, HealthResponse, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
