//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::Serialize;

use crate::domain::{Message, MessageKind, Participant};

/// Participant response
#[derive(Debug, Serialize)]
pub struct ParticipantResponse {
    pub name: String,
    /// Unix epoch milliseconds
    #[serde(rename = "lastSeen")]
    pub last_seen: i64,
}

impl From<Participant> for ParticipantResponse {
    fn from(participant: Participant) -> Self {
        Self {
            name: participant.name,
            last_seen: participant.last_seen.timestamp_millis(),
        }
    }
}

/// Message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub from: String,
    pub to: String,
    pub text: String,
    pub kind: MessageKind,
    pub time: String,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id.to_string(),
            from: message.from,
            to: message.to,
            text: message.text,
            kind: message.kind,
            time: message.time,
        }
    }
}
