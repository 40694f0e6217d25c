//! # Chat Room Library
//!
//! A single-room chat backend for polling clients:
//! - RESTful HTTP API endpoints
//! - Participant directory with heartbeat-based presence
//! - Message log with per-viewer visibility of private messages
//! - Background reaper that evicts idle participants
//! - PostgreSQL or in-memory storage
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core entities, repository traits and the visibility filter
//! - **Application Layer**: Directory, message log and reaper services, plus DTOs
//! - **Infrastructure Layer**: Database, in-memory store and metrics
//! - **Presentation Layer**: HTTP handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! chat_room/
//! +-- config/        Configuration management
//! +-- domain/        Domain entities and rules
//! +-- application/   Application services and DTOs
//! +-- infrastructure/ Storage backends and metrics
//! +-- presentation/  HTTP routes and middleware
//! +-- shared/        Common utilities (errors, snowflake IDs, sanitizing)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
