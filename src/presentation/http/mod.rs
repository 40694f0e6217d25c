//! HTTP Surface
//!
//! Routes, handlers and extractors of the REST API.

pub mod extractors;
pub mod handlers;
pub mod routes;
