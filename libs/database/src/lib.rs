//! Database library providing MongoDB connectivity and a document store abstraction
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector, health checks and `DocumentStore`
//! - `config` - Configuration support with `core_config::FromEnv`
//! - `mock` - `MockDocumentStore` (mockall) for downstream unit tests
//! - `all` - `mongodb` + `config`
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{self, DocumentStore, MongoConfig, MongoDocumentStore};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "event_management_db");
//! let client = mongodb::connect_from_config_with_retry(&config, None).await?;
//! let store = MongoDocumentStore::new(client.database(config.database()));
//!
//! let id = store.insert("venues", doc! { "name": "Main Hall", "capacity": 300 }).await?;
//! let venue = store.fetch("venues", &id.to_hex()).await?;
//! ```

// Always available modules
pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

// Re-exports for convenience
pub use common::{DatabaseError, DatabaseResult};
