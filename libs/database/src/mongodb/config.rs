#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_first, env_parse_or};

/// Database used when no name is configured
pub const DEFAULT_DATABASE_NAME: &str = "event_management_db";

const DEFAULT_MAX_POOL_SIZE: u32 = 100;
const DEFAULT_MIN_POOL_SIZE: u32 = 5;
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// MongoDB database configuration
///
/// Constructed manually or loaded from environment variables (with the `config` feature).
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "events");
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    pub database: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    pub max_pool_size: u32,
    pub min_pool_size: u32,

    pub connect_timeout_secs: u64,
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Config for `url` using the default database name
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_database(url, DEFAULT_DATABASE_NAME)
    }

    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            app_name: None,
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
            min_pool_size: DEFAULT_MIN_POOL_SIZE,
            connect_timeout_secs: DEFAULT_TIMEOUT_SECS,
            server_selection_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_pool_size(mut self, max_pool_size: u32, min_pool_size: u32) -> Self {
        self.max_pool_size = max_pool_size;
        self.min_pool_size = min_pool_size;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self::new("mongodb://localhost:27017")
    }
}

/// Environment variables:
/// - `MONGODB_URL` or `MONGO_URL` (required)
/// - `DATABASE_NAME`, `MONGODB_DATABASE` or `MONGO_DATABASE` (default: `event_management_db`)
/// - `MONGODB_APP_NAME` (optional)
/// - `MONGODB_MAX_POOL_SIZE` (default: 100), `MONGODB_MIN_POOL_SIZE` (default: 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (default: 20)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (default: 20)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_first(&["MONGODB_URL", "MONGO_URL"])
            .ok_or_else(|| ConfigError::MissingEnvVar("MONGODB_URL or MONGO_URL".to_string()))?;

        let database = env_first(&["DATABASE_NAME", "MONGODB_DATABASE", "MONGO_DATABASE"])
            .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string());

        Ok(Self {
            url,
            database,
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: env_parse_or("MONGODB_MAX_POOL_SIZE", DEFAULT_MAX_POOL_SIZE)?,
            min_pool_size: env_parse_or("MONGODB_MIN_POOL_SIZE", DEFAULT_MIN_POOL_SIZE)?,
            connect_timeout_secs: env_parse_or(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?,
            server_selection_timeout_secs: env_parse_or(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mongo_config_new_uses_defaults() {
        let config = MongoConfig::new("mongodb://localhost:27017");
        assert_eq!(config.url(), "mongodb://localhost:27017");
        assert_eq!(config.database(), "event_management_db");
        assert_eq!(config.max_pool_size, 100);
        assert_eq!(config.min_pool_size, 5);
        assert_eq!(config.connect_timeout_secs, 20);
        assert_eq!(config.server_selection_timeout_secs, 20);
    }

    #[test]
    fn test_mongo_config_builders() {
        let config = MongoConfig::with_database("mongodb://db:27017", "events_test")
            .with_app_name("events-api")
            .with_pool_size(20, 2);
        assert_eq!(config.database(), "events_test");
        assert_eq!(config.app_name.as_deref(), Some("events-api"));
        assert_eq!(config.max_pool_size, 20);
        assert_eq!(config.min_pool_size, 2);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("DATABASE_NAME", Some("testdb")),
                ("MONGODB_CONNECT_TIMEOUT_SECS", Some("5")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, "mongodb://localhost:27017");
                assert_eq!(config.database, "testdb");
                assert_eq!(config.connect_timeout_secs, 5);
                assert_eq!(config.server_selection_timeout_secs, 20);
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_fallbacks() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", Some("mongodb://fallback:27017")),
                ("DATABASE_NAME", None::<&str>),
                ("MONGODB_DATABASE", Some("fallbackdb")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, "mongodb://fallback:27017");
                assert_eq!(config.database, "fallbackdb");
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_default_database() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("DATABASE_NAME", None::<&str>),
                ("MONGODB_DATABASE", None::<&str>),
                ("MONGO_DATABASE", None::<&str>),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.database, DEFAULT_DATABASE_NAME);
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_missing_url() {
        temp_env::with_vars(
            [("MONGODB_URL", None::<&str>), ("MONGO_URL", None::<&str>)],
            || {
                let err = MongoConfig::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::MissingEnvVar(_)));
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_invalid_pool_size() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_MAX_POOL_SIZE", Some("lots")),
            ],
            || {
                let err = MongoConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("MONGODB_MAX_POOL_SIZE"));
            },
        );
    }
}
