//! MongoDB test infrastructure

use database::mongodb::{Client, Database, MongoDocumentStore};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;

/// Test MongoDB wrapper that ensures proper cleanup
///
/// The container is stopped and removed when this struct is dropped.
///
/// ```no_run
/// use test_utils::TestMongo;
///
/// # async fn example() {
/// let mongo = TestMongo::new().await;
/// let store = mongo.store();
/// # }
/// ```
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    client: Client,
    database: String,
    pub connection_string: String,
}

impl TestMongo {
    /// Start a MongoDB 7 container with a fresh database
    pub async fn new() -> Self {
        let container = Mongo::default()
            .with_tag("7")
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let connection_string = format!("mongodb://127.0.0.1:{}", host_port);

        let client = Client::with_uri_str(&connection_string)
            .await
            .expect("Failed to create MongoDB client");

        tracing::info!(port = host_port, "Test MongoDB ready (mongo:7)");

        Self {
            container,
            client,
            database: "event_management_test".to_string(),
            connection_string,
        }
    }

    pub fn client(&self) -> Client {
        self.client.clone()
    }

    pub fn database(&self) -> Database {
        self.client.database(&self.database)
    }

    /// A `MongoDocumentStore` over the test database
    pub fn store(&self) -> MongoDocumentStore {
        MongoDocumentStore::new(self.database())
    }
}

impl Drop for TestMongo {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test MongoDB container");
    }
}
