//! # Domain Services
//!
//! Domain services encapsulate business rules that don't naturally belong to
//! a single entity.
//!
//! ## Services
//!
//! - **VisibilityFilter**: which messages a viewer may read, and tail limiting

mod visibility_service;

pub use visibility_service::*;
