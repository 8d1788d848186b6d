//! Validating extractors
//!
//! These run before a handler body, in argument order, so a handler taking
//! `(ValidId, ValidBook)` rejects a bad identifier before looking at the
//! body. A handler only ever sees inputs that passed validation.

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde_json::Value;

use super::errors::ApiError;
use crate::model::{BookId, BookPayload};
use crate::validation::{validate_book, validate_params, ValidationError, NOT_AN_OBJECT};

/// Path parameter holding the book identifier
pub const ID_PARAM: &str = "id";

/// Book identifier taken from the `:id` path segment.
///
/// Every path parameter of the matched route is validated, not only `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidId(pub BookId);

#[async_trait]
impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "path parameters could not be decoded");
                ApiError::InvalidParameter
            })?;

        let ids = validate_params(raw.iter().map(|(name, value)| (name.as_str(), value.as_str())))?;

        ids.into_iter()
            .find(|(name, _)| name == ID_PARAM)
            .map(|(_, id)| ValidId(id))
            .ok_or(ApiError::InvalidParameter)
    }
}

/// Validated, normalized book body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBook(pub BookPayload);

#[async_trait]
impl<S> FromRequest<S> for ValidBook
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "request body is not JSON");
                ValidationError::Body(vec![NOT_AN_OBJECT.to_string()])
            })?;

        Ok(ValidBook(validate_book(&body)?))
    }
}
