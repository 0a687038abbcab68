//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Malformed or mistyped bodies are rejected by `Json` itself (422 for data
/// errors, 400 for syntax errors, 415 for a missing content type). Bodies
/// that parse but fail `Validate` are rejected with 400 and per-field details.
///
/// ```ignore
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateVenue {
///     #[validate(length(min = 1))]
///     name: String,
///     #[validate(range(min = 0))]
///     capacity: i32,
/// }
///
/// async fn create_venue(ValidatedJson(payload): ValidatedJson<CreateVenue>) -> String {
///     format!("Creating venue: {}", payload.name)
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
