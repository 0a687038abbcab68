use axum_helpers::{create_production_app, create_router};
use core_config::load_dotenv;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::{Client, MongoDocumentStore, connect_from_config_with_retry};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Real environment variables win over .env entries
    let dotenv = load_dotenv();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    if let Some(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let database = config.mongodb.database().to_string();
    info!(
        app = config.app.name,
        version = config.app.version,
        "Connecting to MongoDB database {}",
        database
    );

    let mongo_client = connect_from_config_with_retry(&config.mongodb, None).await?;
    let store = Arc::new(MongoDocumentStore::new(mongo_client.database(&database)));

    info!("Successfully connected to MongoDB database: {}", database);

    let api_routes = api::routes(&database, store);
    let router = create_router::<openapi::ApiDoc>(api_routes, &config.server)?;

    info!("Starting Event Management API with graceful shutdown (30s timeout)");

    create_production_app(
        router,
        &config.server,
        Duration::from_secs(30),
        close_mongo(mongo_client),
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Event Management API shutdown complete");
    Ok(())
}

/// Close the connection pool; store handles still held by the router stop working
async fn close_mongo(client: Client) {
    info!("Shutting down: closing MongoDB connections");
    client.shutdown().await;
    info!("MongoDB connection pool closed");
}
