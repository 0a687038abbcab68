//! Media domain error types

use axum::extract::multipart::MultipartError;
use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use thiserror::Error;

pub type MediaResult<T> = Result<T, MediaError>;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Missing multipart field 'file'")]
    MissingFile,

    #[error("File size exceeds {}MB limit", .limit / (1024 * 1024))]
    TooLarge { limit: usize },

    #[error("Invalid {label} ID format: {id}")]
    InvalidId { label: &'static str, id: String },

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        let message = err.to_string();
        match err {
            MediaError::MissingFile | MediaError::TooLarge { .. } => AppError::BadRequest(message),
            MediaError::InvalidId { .. } => AppError::InvalidObjectId(message),
            MediaError::NotFound(_) => AppError::NotFound(message),
            MediaError::Multipart(e) => AppError::Multipart(e),
            MediaError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for MediaError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
