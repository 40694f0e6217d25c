//! # Domain Layer
//!
//! The domain layer contains the core rules of the chat room: who is present,
//! what was said, and who may read it. It is independent of any external
//! frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Participant and Message, plus their repository traits
//! - **services**: the visibility filter
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts

pub mod entities;
pub mod services;

// Re-export commonly used types
pub use entities::*;
pub use services::*;
