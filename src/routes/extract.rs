use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::error::AppError;

/// Record id taken from the `{id}` path segment. Anything that is not a
/// UUID cannot name a record, so it is reported as not found.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub Uuid);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found("Page not found"))?;

        Uuid::parse_str(&raw)
            .map(Self)
            .map_err(|_| AppError::not_found("Page not found"))
    }
}
