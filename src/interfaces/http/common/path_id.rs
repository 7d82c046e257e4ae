//! Numeric `{id}` path segment

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use super::ApiError;

/// Integer id taken from the `{id}` path segment. Anything that is not an
/// integer is rejected with 400.
#[derive(Debug, Clone, Copy)]
pub struct PathId(pub i32);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        raw.parse::<i32>()
            .map(PathId)
            .map_err(|_| ApiError::bad_request(format!("Invalid id: {}", raw)))
    }
}
