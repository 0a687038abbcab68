/// Unified database error type for all database operations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// MongoDB driver errors
    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Connection failed after retries
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A document could not be converted to or from BSON
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic database error
    #[error("Database error: {0}")]
    Generic(String),
}

#[cfg(feature = "mongodb")]
impl From<mongodb::bson::ser::Error> for DatabaseError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        DatabaseError::Serialization(err.to_string())
    }
}

#[cfg(feature = "mongodb")]
impl From<mongodb::bson::de::Error> for DatabaseError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        DatabaseError::Serialization(err.to_string())
    }
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DatabaseError::ConnectionFailed("timeout".into()).to_string(),
            "Connection failed: timeout"
        );
        assert_eq!(
            DatabaseError::Serialization("bad field".into()).to_string(),
            "Serialization error: bad field"
        );
    }

    #[cfg(feature = "mongodb")]
    #[test]
    fn test_bson_deserialization_error_converts() {
        use mongodb::bson::{Bson, from_bson};

        let err = from_bson::<i32>(Bson::String("not a number".into())).unwrap_err();
        let converted: DatabaseError = err.into();
        assert!(matches!(converted, DatabaseError::Serialization(_)));
    }
}
