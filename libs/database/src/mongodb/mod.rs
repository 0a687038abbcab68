//! MongoDB database connector, health checks and the document store adapter

mod config;
mod connector;
mod health;
mod store;

pub use config::{DEFAULT_DATABASE_NAME, MongoConfig};
pub use connector::{connect, connect_from_config, connect_from_config_with_retry};
pub use health::{HealthStatus, check_health, check_health_detailed};
#[cfg(any(test, feature = "mock"))]
pub use store::MockDocumentStore;
pub use store::{
    DEFAULT_LIST_LIMIT, DocumentStore, ListQuery, MongoDocumentStore, parse_object_id,
    strip_nulls,
};

// Re-export MongoDB types for convenience
pub use mongodb::bson;
pub use mongodb::{Client, Collection, Database};
