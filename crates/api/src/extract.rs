//! Request extractors that deserialize and then validate.
//!
//! Deserialization failures and rule violations both reject with
//! [`CoreError::InvalidInput`], so clients always get a 400 with an
//! `errors` array instead of axum's plain-text rejections.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use equipmart_core::error::CoreError;
use equipmart_core::validation::FieldViolation;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

fn malformed(source: &str, detail: impl Into<String>) -> AppError {
    AppError::Core(CoreError::InvalidInput(vec![FieldViolation::new(
        source, detail,
    )]))
}

/// Deserialize a JSON body without validating it.
pub fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| malformed("body", e.to_string()))
}

/// Deserialize a JSON body and run its validation rules.
pub fn parse_valid_json<T: DeserializeOwned + Validate>(body: &[u8]) -> Result<T, AppError> {
    let value: T = parse_json(body)?;
    value.validate()?;
    Ok(value)
}

/// JSON body extractor that runs [`Validate`] before the handler sees it.
///
/// Handlers that must check ownership before looking at the payload take
/// the raw [`Bytes`] and call [`parse_valid_json`] themselves.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        parse_valid_json(&body).map(ValidJson)
    }
}

/// Query string extractor that runs [`Validate`] before the handler sees it.
pub struct ValidQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| malformed("query", rejection.body_text()))?;
        value.validate()?;
        Ok(ValidQuery(value))
    }
}
