use mongodb::{Client, bson::doc, options::ClientOptions};
use std::time::Duration;
use tracing::{info, instrument};

use super::MongoConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry, retry_with_backoff};

/// Connect to MongoDB with default pool and timeout settings
pub async fn connect(url: &str) -> DatabaseResult<Client> {
    connect_from_config(&MongoConfig::new(url)).await
}

/// Connect using a MongoConfig and verify the connection with a ping
///
/// ```ignore
/// use database::mongodb::{MongoConfig, connect_from_config};
///
/// let config = MongoConfig::from_env()?;
/// let client = connect_from_config(&config).await?;
/// ```
#[instrument(skip(config), fields(database = %config.database))]
pub async fn connect_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    info!("Connecting to MongoDB");

    let mut options = ClientOptions::parse(&config.url)
        .await
        .map_err(|e| DatabaseError::ConfigError(format!("invalid MongoDB URL: {e}")))?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;

    client
        .database(&config.database)
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

/// Connect from config with exponential backoff on failure
///
/// `None` uses [`RetryConfig::default`].
pub async fn connect_from_config_with_retry(
    config: &MongoConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<Client> {
    match retry_config {
        Some(retry_config) => retry_with_backoff(|| connect_from_config(config), retry_config).await,
        None => retry(|| connect_from_config(config)).await,
    }
}
