//! Shared state of the service-level endpoints.

use database::mongodb::DocumentStore;
use std::sync::Arc;

/// State for `/health` and `/ready`.
///
/// Domain routers carry their own services; this only needs the store handle
/// to ping and the configured database name to report.
#[derive(Clone)]
pub struct AppState {
    /// Name reported by `/health`
    pub database: String,
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new<S: DocumentStore + 'static>(database: impl Into<String>, store: Arc<S>) -> Self {
        Self {
            database: database.into(),
            store,
        }
    }
}
