//! Axum extractor for validated request bodies
//!
//! `ValidatedJson<T>` deserializes the body into a DTO and runs its
//! `validator` rules before the handler sees it.

use super::messages::field_errors;
use crate::core::error::{AppError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Axum extractor that parses and validates a JSON DTO
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_area(
///     ValidatedJson(input): ValidatedJson<CreateAreaDto>,
/// ) -> Result<Json<Area>, AppError> {
///     // input is already validated
/// }
/// ```
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ValidationError::InvalidBody(rejection.body_text()))?;

        validate(&payload)?;
        Ok(ValidatedJson(payload))
    }
}

/// Run a DTO's rules outside of the extractor (multipart fields, nested input)
pub fn validate<T: Validate>(payload: &T) -> Result<(), ValidationError> {
    payload
        .validate()
        .map_err(|errors| ValidationError::FieldErrors(field_errors(&errors)))
}
