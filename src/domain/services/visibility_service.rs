//! Message visibility domain service.

use crate::domain::entities::{Message, MessageKind, BROADCAST};

/// Decides which part of the message log a viewer may read.
pub struct VisibilityFilter;

impl VisibilityFilter {
    /// Whether `viewer` may see `message`.
    ///
    /// Public messages are readable by everyone whatever their `to`; anything
    /// else only by its author, its recipient, or everyone when broadcast.
    pub fn is_visible(viewer: &str, message: &Message) -> bool {
        message.kind == MessageKind::Message
            || message.to == BROADCAST
            || message.to == viewer
            || message.from == viewer
    }

    /// The subsequence of `messages` visible to `viewer`, order preserved.
    pub fn visible(viewer: &str, messages: Vec<Message>) -> Vec<Message> {
        messages
            .into_iter()
            .filter(|m| Self::is_visible(viewer, m))
            .collect()
    }

    /// Keep only the last `limit` messages, in their original order.
    ///
    /// `None` or zero keeps everything.
    pub fn take_recent(mut messages: Vec<Message>, limit: Option<usize>) -> Vec<Message> {
        match limit {
            Some(n) if n > 0 && messages.len() > n => messages.split_off(messages.len() - n),
            _ => messages,
        }
    }
}
