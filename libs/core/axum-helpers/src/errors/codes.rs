//! Type-safe error codes for API responses.
//!
//! Each code has a client-facing string (e.g. `"NOT_FOUND"`), an integer for
//! logs and metrics, and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Identifier is not a valid 24-character hex ObjectId
    InvalidObjectId,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// An unexpected internal server error occurred
    InternalError,

    /// Request payload is semantically incorrect
    UnprocessableEntity,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    /// Generic malformed request
    BadRequest,

    /// Request body exceeds an allowed size
    PayloadTooLarge,

    /// multipart/form-data body could not be read
    MultipartError,

    /// No route for this method
    MethodNotAllowed,

    // Database errors (2000-2999)
    /// Database connection or query error
    DatabaseError,

    /// Database could not be reached
    DatabaseUnavailable,

    /// A stored document could not be converted
    DatabaseSerialization,

    // JSON errors (5000s)
    /// JSON serialization/deserialization error
    SerdeJsonError,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier for clients
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidObjectId => "INVALID_OBJECT_ID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::UnprocessableEntity => "UNPROCESSABLE_ENTITY",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::BadRequest => "BAD_REQUEST",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::MultipartError => "MULTIPART_ERROR",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::DatabaseUnavailable => "DATABASE_UNAVAILABLE",
            Self::DatabaseSerialization => "DATABASE_SERIALIZATION",
            Self::SerdeJsonError => "SERDE_JSON_ERROR",
        }
    }

    /// Integer code for structured logs.
    ///
    /// - 1000-1999: Client errors
    /// - 2000-2999: Database errors
    /// - 5000-5999: Serialization errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidObjectId => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::UnprocessableEntity => 1009,
            Self::ServiceUnavailable => 1011,
            Self::BadRequest => 1012,
            Self::PayloadTooLarge => 1013,
            Self::MultipartError => 1014,
            Self::MethodNotAllowed => 1015,

            Self::DatabaseError => 2003,
            Self::DatabaseUnavailable => 2013,
            Self::DatabaseSerialization => 2010,

            Self::SerdeJsonError => 5001,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidObjectId => "Invalid ID format",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::InternalError => "An internal server error occurred",
            Self::UnprocessableEntity => "Request cannot be processed",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::BadRequest => "Bad request",
            Self::PayloadTooLarge => "Request body is too large",
            Self::MultipartError => "Failed to read multipart form data",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::DatabaseError => "Database error occurred",
            Self::DatabaseUnavailable => "Database is unavailable",
            Self::DatabaseSerialization => "Failed to convert stored document",
            Self::SerdeJsonError => "JSON serialization error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_string_representation() {
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::InvalidObjectId.as_str(), "INVALID_OBJECT_ID");
        assert_eq!(ErrorCode::DatabaseError.as_str(), "DATABASE_ERROR");
    }

    #[test]
    fn test_error_code_integer_codes() {
        assert_eq!(ErrorCode::ValidationError.code(), 1001);
        assert_eq!(ErrorCode::BadRequest.code(), 1012);
        assert_eq!(ErrorCode::DatabaseError.code(), 2003);
    }

    #[test]
    fn test_error_code_display_matches_serde() {
        for code in [
            ErrorCode::NotFound,
            ErrorCode::PayloadTooLarge,
            ErrorCode::DatabaseSerialization,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code));
        }
    }

    #[test]
    fn test_error_code_deserialization() {
        let code: ErrorCode = serde_json::from_str("\"INVALID_OBJECT_ID\"").unwrap();
        assert_eq!(code, ErrorCode::InvalidObjectId);
    }
}
