//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::models::ValidationError;

use super::error::ApiError;

/// Extract and validate a point id from the path.
///
/// Non-numeric ids are a validation failure, rejected before any query runs.
pub struct ValidPointId(pub i64);

impl<S> FromRequestParts<S> for ValidPointId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        let id: i64 = raw.parse().map_err(|_| {
            ApiError::Validation(ValidationError::NotANumber {
                field: "id",
                value: raw.clone(),
            })
        })?;

        Ok(Self(id))
    }
}
