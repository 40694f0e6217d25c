//! Repository Implementations
//!
//! Implementations of the domain repository traits.
//!
//! ## Available Repositories
//!
//! - **PgParticipantRepository** - Participant directory on PostgreSQL
//! - **PgMessageRepository** - Message log on PostgreSQL
//! - **MemoryStore** - Both traits in process memory
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{PgMessageRepository, PgParticipantRepository};
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let participants = PgParticipantRepository::new(pool.clone());
//!     let messages = PgMessageRepository::new(pool);
//! }
//! ```

pub mod memory_repository;
pub mod message_repository;
pub mod participant_repository;

pub use memory_repository::MemoryStore;
pub use message_repository::PgMessageRepository;
pub use participant_repository::PgParticipantRepository;
