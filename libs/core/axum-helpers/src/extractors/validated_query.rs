use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Query-string counterpart of [`super::ValidatedJson`].
///
/// Unparsable values (`?page=abc`) and rule violations reject with a 400
/// JSON body instead of axum's plain-text rejection.
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::try_from_uri(&parts.uri).map_err(|e| AppError::Validation {
            message: e.body_text(),
            details: None,
        })?;
        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}
