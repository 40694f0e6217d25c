//! Message entity and repository trait.
//!
//! Maps to the `messages` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::Serialize;

use crate::shared::error::AppError;

/// Recipient marker meaning "every participant".
pub const BROADCAST: &str = "Todos";

/// Text of the notice appended when a participant registers.
pub const JOIN_TEXT: &str = "entra na sala...";

/// Text of the notice appended when a participant is reaped.
pub const LEAVE_TEXT: &str = "sai da sala...";

/// Kind of a message.
///
/// `Status` is system-generated (join/leave notices); the other two are
/// authored by participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MessageKind {
    /// Join/leave notice
    #[serde(rename = "status")]
    Status,
    /// Public message, visible to everyone
    #[serde(rename = "message")]
    Message,
    /// Visible only to sender and recipient
    #[serde(rename = "private-message")]
    PrivateMessage,
}

impl MessageKind {
    /// Parse the wire / database representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "status" => Some(Self::Status),
            "message" => Some(Self::Message),
            "private-message" | "private_message" => Some(Self::PrivateMessage),
            _ => None,
        }
    }

    /// Convert to the wire / database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Message => "message",
            Self::PrivateMessage => "private-message",
        }
    }

    /// Whether participants may post messages of this kind.
    pub fn is_user_authored(&self) -> bool {
        !matches!(self, Self::Status)
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A message in the room log.
///
/// Maps to the `messages` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID, creation ordered)
/// - "from": TEXT NOT NULL
/// - "to": TEXT NOT NULL
/// - text: TEXT NOT NULL
/// - kind: TEXT NOT NULL
/// - time: TEXT NOT NULL (HH:MM:SS, never updated)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// Author name
    pub from: String,

    /// Recipient name or [`BROADCAST`]
    pub to: String,

    /// Message body
    pub text: String,

    /// Message kind
    pub kind: MessageKind,

    /// Human-readable creation time
    pub time: String,
}

impl Message {
    /// Replace the mutable fields, keeping `id`, `from` and `time`.
    pub fn apply(&mut self, update: MessageUpdate) {
        self.to = update.to;
        self.text = update.text;
        self.kind = update.kind;
    }
}

/// Fields an author may change on an existing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageUpdate {
    pub to: String,
    pub text: String,
    pub kind: MessageKind,
}

/// Format a timestamp the way message `time` fields are stored.
pub fn clock_time(at: DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// Repository trait for the message log.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a message. The id is assigned by the caller.
    async fn create(&self, message: &Message) -> Result<Message, AppError>;

    /// Find a message by its ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Message>, AppError>;

    /// The whole log in creation order.
    async fn list(&self) -> Result<Vec<Message>, AppError>;

    /// Overwrite `to`, `text` and `kind` of an existing message.
    async fn update(&self, message: &Message) -> Result<Message, AppError>;

    /// Delete a message. Fails with `AppError::NotFound` if it does not exist.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_kind_parse_roundtrip() {
        for kind in [MessageKind::Status, MessageKind::Message, MessageKind::PrivateMessage] {
            assert_eq!(MessageKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(MessageKind::parse("private_message"), Some(MessageKind::PrivateMessage));
        assert_eq!(MessageKind::parse("shout"), None);
    }

    #[test]
    fn test_kind_serde_names() {
        assert_eq!(
            serde_json::to_string(&MessageKind::PrivateMessage).unwrap(),
            "\"private-message\""
        );
        assert_eq!(serde_json::to_string(&MessageKind::Status).unwrap(), "\"status\"");
    }

    #[test]
    fn test_status_is_not_user_authored() {
        assert!(!MessageKind::Status.is_user_authored());
        assert!(MessageKind::Message.is_user_authored());
        assert!(MessageKind::PrivateMessage.is_user_authored());
    }

    #[test]
    fn test_apply_keeps_identity_and_time() {
        let mut msg = Message {
            id: 7,
            from: "Alice".into(),
            to: BROADCAST.into(),
            text: JOIN_TEXT.into(),
            kind: MessageKind::Status,
            time: "10:00:00".into(),
        };
        msg.apply(MessageUpdate {
            to: "Bob".into(),
            text: "new".into(),
            kind: MessageKind::PrivateMessage,
        });
        assert_eq!(msg.id, 7);
        assert_eq!(msg.from, "Alice");
        assert_eq!(msg.time, "10:00:00");
        assert_eq!(msg.to, "Bob");
        assert_eq!(msg.text, "new");
        assert_eq!(msg.kind, MessageKind::PrivateMessage);
    }

    #[test]
    fn test_clock_time_format() {
        let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 5, 7).unwrap();
        assert_eq!(clock_time(at), "09:05:07");
    }
}
