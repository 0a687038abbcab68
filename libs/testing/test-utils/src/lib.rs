//! Shared test utilities for domain testing
//!
//! - `MemoryDocumentStore`: in-process `DocumentStore` for service and handler tests
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo")
//! - `TestDataBuilder`: Deterministic test data generation
//! - `assertions`: Custom assertion helpers
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use test_utils::{MemoryDocumentStore, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn creates_a_venue() {
//!     let store = Arc::new(MemoryDocumentStore::new());
//!     let builder = TestDataBuilder::from_test_name("creates_a_venue");
//!     let service = ResourceService::<Venue, _>::new(store.clone());
//!     // ...
//! }
//! ```
//!
//! Container-backed tests need `features = ["mongo"]` in dev-dependencies:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { workspace = true, features = ["mongo"] }
//! ```

use database::mongodb::bson::oid::ObjectId;

mod memory;
#[cfg(feature = "mongo")]
mod mongo;

pub use memory::MemoryDocumentStore;
#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

/// Builder for test data with deterministic randomization
///
/// The same seed always produces the same ids, names and payloads.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_venue");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Deterministic ObjectId; `n` distinguishes ids within one test
    pub fn object_id(&self, n: u32) -> ObjectId {
        let mut bytes = [0u8; 12];
        bytes[..8].copy_from_slice(&self.seed.to_be_bytes());
        bytes[8..].copy_from_slice(&n.to_be_bytes());
        ObjectId::from_bytes(bytes)
    }

    /// Unique name such as `"test-venue-12345-main"`
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("venue", "main"), "test-venue-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    pub fn email(&self, local: &str) -> String {
        format!("{}.{}@example.test", local, self.seed)
    }

    /// Deterministic byte payload of `len` bytes, e.g. a fake image upload
    pub fn bytes(&self, len: usize) -> Vec<u8> {
        let salt = self.seed.to_le_bytes();
        (0..len)
            .map(|i| (i as u8).wrapping_mul(31) ^ salt[i % salt.len()])
            .collect()
    }
}

/// Test assertion helpers
pub mod assertions {
    use database::mongodb::parse_object_id;

    /// Assert that a string is a 24-character hex ObjectId
    pub fn assert_object_id(value: &str, context: &str) {
        assert!(
            value.len() == 24 && parse_object_id(value).is_some(),
            "{}: expected a hex ObjectId, got {:?}",
            context,
            value
        );
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.object_id(1), builder2.object_id(1));
        assert_eq!(builder1.name("event", "gala"), builder2.name("event", "gala"));
        assert_eq!(builder1.bytes(64), builder2.bytes(64));
    }

    #[test]
    fn test_data_builder_distinct_ids() {
        let builder = TestDataBuilder::from_test_name("distinct");
        assert_ne!(builder.object_id(1), builder.object_id(2));
        assertions::assert_object_id(&builder.object_id(1).to_hex(), "builder id");
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.object_id(0), builder2.object_id(0));
        assert_ne!(builder1.email("ada"), builder2.email("ada"));
    }

    #[test]
    fn test_bytes_length() {
        let builder = TestDataBuilder::new(3);
        assert_eq!(builder.bytes(0).len(), 0);
        assert_eq!(builder.bytes(1024).len(), 1024);
    }
}
