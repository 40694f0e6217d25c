//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **ParticipantService**: Registration, heartbeats, directory listing
//! - **MessageService**: Posting, filtered listing, editing, deleting
//! - **PresenceReaper**: Background eviction of idle participants

pub mod message_service;
pub mod participant_service;
pub mod presence_reaper;

// Re-export message service types
pub use message_service::{MessageError, MessageService, MessageServiceImpl, PostMessageDto};

// Re-export participant service types
pub use participant_service::{ParticipantError, ParticipantService, ParticipantServiceImpl};

// Re-export reaper types
pub use presence_reaper::{PresenceReaper, ReapReport, ReaperHandle};
