//! Request DTOs
//!
//! Data structures for API request bodies and query strings. Every string
//! field is sanitized before validation runs.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::application::services::PostMessageDto;
use crate::domain::MessageKind;
use crate::shared::error::AppError;
use crate::shared::validation::sanitize;

/// Normalizes every string field of a request.
pub trait Sanitize {
    fn sanitize(self) -> Self;
}

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterParticipantRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
}

impl Sanitize for RegisterParticipantRequest {
    fn sanitize(self) -> Self {
        Self {
            name: sanitize(&self.name),
        }
    }
}

/// Body of a post or an edit
#[derive(Debug, Deserialize, Validate)]
pub struct MessageRequest {
    #[validate(length(min = 1, message = "Recipient must not be empty"))]
    pub to: String,

    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: String,

    #[validate(custom(function = "validate_kind"))]
    pub kind: String,
}

impl Sanitize for MessageRequest {
    fn sanitize(self) -> Self {
        Self {
            to: sanitize(&self.to),
            text: sanitize(&self.text),
            kind: sanitize(&self.kind),
        }
    }
}

impl MessageRequest {
    /// Convert a validated request into the service DTO.
    ///
    /// Only the spelling of `kind` is checked here. Whether a participant may
    /// use it is up to the message log, after authorship is settled.
    pub fn into_dto(self) -> Result<PostMessageDto, AppError> {
        let kind = MessageKind::parse(&self.kind)
            .ok_or_else(|| AppError::Validation(format!("kind: unsupported kind '{}'", self.kind)))?;

        Ok(PostMessageDto {
            to: self.to,
            text: self.text,
            kind,
        })
    }
}

fn validate_kind(kind: &str) -> Result<(), ValidationError> {
    match MessageKind::parse(kind) {
        Some(_) => Ok(()),
        None => {
            let mut error = ValidationError::new("kind");
            error.message = Some("Kind must be 'message' or 'private-message'".into());
            Err(error)
        }
    }
}

/// Query string of `GET /messages`
#[derive(Debug, Default, Deserialize)]
pub struct MessageListQuery {
    pub limit: Option<String>,
}

impl MessageListQuery {
    /// The requested tail size. Absent means everything; anything other
    /// than a positive integer is rejected.
    pub fn limit(&self) -> Result<Option<usize>, AppError> {
        match self.limit.as_deref().map(str::trim) {
            None => Ok(None),
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => Ok(Some(n)),
                _ => Err(AppError::Validation(format!(
                    "limit: must be a positive integer, got '{}'",
                    raw
                ))),
            },
        }
    }
}
