//! Custom Extractors
//!
//! Axum extractors for the caller's identity and for validated bodies.

use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::application::dto::request::Sanitize;
use crate::shared::error::AppError;
use crate::shared::validation::{sanitize, validation_error};

/// Header carrying the caller's participant name.
pub const USER_HEADER: &str = "User";

/// Caller identity taken from the `User` header.
///
/// The name is only sanitized here; whether it belongs to a registered
/// participant is decided by the operation that uses it.
#[derive(Debug, Clone)]
pub struct ChatUser(pub String);

impl<S> FromRequestParts<S> for ChatUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_HEADER)
            .ok_or_else(|| AppError::Validation("Missing User header".into()))?;

        // Names may be any UTF-8, not only visible ASCII.
        let raw = std::str::from_utf8(value.as_bytes())
            .map_err(|_| AppError::Validation("User header is not valid UTF-8".into()))?;

        let name = sanitize(raw);
        if name.is_empty() {
            return Err(AppError::Validation("User header must not be empty".into()));
        }

        Ok(ChatUser(name))
    }
}

/// JSON body that has been sanitized and validated.
///
/// Malformed JSON, missing fields and failed validation all reject with
/// `AppError::Validation` (422).
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Sanitize + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        let value = value.sanitize();
        value.validate().map_err(validation_error)?;

        Ok(ValidatedJson(value))
    }
}
