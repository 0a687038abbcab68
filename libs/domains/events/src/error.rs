//! Resource domain error types

use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use thiserror::Error;
use validator::ValidationErrors;

/// Result type for resource operations
pub type ResourceResult<T> = Result<T, ResourceError>;

#[derive(Debug, Error)]
pub enum ResourceError {
    /// Malformed and unknown ids both end up here
    #[error("{name} with ID {id} not found")]
    NotFound { name: &'static str, id: String },

    #[error("No valid fields to update")]
    NothingToUpdate,

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl ResourceError {
    pub fn not_found(name: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            name,
            id: id.into(),
        }
    }
}

impl From<ResourceError> for AppError {
    fn from(err: ResourceError) -> Self {
        let message = err.to_string();
        match err {
            ResourceError::NotFound { .. } => AppError::NotFound(message),
            ResourceError::NothingToUpdate => AppError::BadRequest(message),
            ResourceError::Validation(errors) => AppError::ValidationError(errors),
            ResourceError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ResourceError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_not_found_message() {
        let err = ResourceError::not_found("Venue", "abc");
        assert_eq!(err.to_string(), "Venue with ID abc not found");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_nothing_to_update_is_bad_request() {
        let response = ResourceError::NothingToUpdate.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_error_is_internal() {
        let err = ResourceError::from(DatabaseError::ConnectionFailed("down".into()));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
