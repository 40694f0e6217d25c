//! # Domain Entities
//!
//! Core domain entities of the chat room. Both map directly to their
//! database tables.
//!
//! - **Participant**: a registered name with its last activity time
//! - **Message**: an entry in the room log (user message or status notice)
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod message;
mod participant;

pub use message::{
    clock_time, Message, MessageKind, MessageRepository, MessageUpdate, BROADCAST, JOIN_TEXT,
    LEAVE_TEXT,
};
pub use participant::{idle_cutoff, Participant, ParticipantRepository};
