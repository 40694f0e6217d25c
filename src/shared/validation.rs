//! Validation Utilities
//!
//! Every string field entering the core goes through [`sanitize`] first and
//! is validated afterwards, so the core only ever sees trimmed text without
//! markup.

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationErrors;

use super::error::AppError;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<[^>]*>").expect("HTML tag pattern is valid")
});

/// Strip HTML tags and surrounding whitespace.
pub fn sanitize(input: &str) -> String {
    HTML_TAG.replace_all(input, "").trim().to_string()
}

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                (
                    field.to_string(),
                    e.message.clone().map(|m| m.to_string()).unwrap_or_default(),
                )
            })
        })
        .collect();
    fields.sort();

    let message = fields
        .first()
        .map(|(field, message)| format!("{}: {}", field, message))
        .unwrap_or_else(|| "Validation failed".into());

    AppError::Validation(message)
}
