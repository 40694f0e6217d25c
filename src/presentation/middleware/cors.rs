//! CORS Middleware Configuration

use std::time::Duration;

use axum::http::{header, HeaderName, Method};
use tower_http::cors::{Any, CorsLayer};

use crate::config::CorsSettings;
use crate::presentation::http::extractors::USER_HEADER;

/// Create CORS layer from settings
///
/// An empty origin list allows any origin. Otherwise the custom `User`
/// header has to be allowed explicitly alongside `Content-Type`.
pub fn create_cors_layer(settings: &CorsSettings) -> CorsLayer {
    let origins: Vec<_> = settings
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, user_header()])
        .max_age(Duration::from_secs(3600))
}

fn user_header() -> HeaderName {
    HeaderName::from_static("user")
}
