//! Message Service
//!
//! Handles the message log: appending notices, posting, filtered listing,
//! editing and deleting.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;

use crate::domain::{
    clock_time, Message, MessageKind, MessageRepository, MessageUpdate, ParticipantRepository,
    VisibilityFilter,
};
use super::participant_service::is_registered;
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Message service trait
#[async_trait]
pub trait MessageService: Send + Sync {
    /// Append a message with a fresh id and time. Fails only on storage errors.
    async fn append(
        &self,
        from: &str,
        to: &str,
        text: &str,
        kind: MessageKind,
    ) -> Result<Message, MessageError>;

    /// Post a user-authored message as `from`
    async fn post(&self, from: &str, request: PostMessageDto) -> Result<Message, MessageError>;

    /// Messages visible to `viewer`, oldest first, optionally only the last `limit`
    async fn query(&self, viewer: &str, limit: Option<usize>) -> Result<Vec<Message>, MessageError>;

    /// Edit a message as `author`
    async fn edit(
        &self,
        message_id: i64,
        author: &str,
        request: PostMessageDto,
    ) -> Result<Message, MessageError>;

    /// Delete a message as `author`
    async fn delete(&self, message_id: i64, author: &str) -> Result<(), MessageError>;
}

/// Fields of a user-authored message
#[derive(Debug, Clone)]
pub struct PostMessageDto {
    pub to: String,
    pub text: String,
    pub kind: MessageKind,
}

/// Message service errors
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("Message not found")]
    NotFound,

    #[error("Only the author may change this message")]
    Unauthorized,

    #[error("Author '{0}' is not a registered participant")]
    InvalidAuthor(String),

    #[error("Message kind '{0}' cannot be posted by participants")]
    InvalidKind(MessageKind),

    #[error("Storage unavailable: {0}")]
    Storage(String),
}

impl From<AppError> for MessageError {
    fn from(error: AppError) -> Self {
        match error {
            AppError::NotFound(_) => MessageError::NotFound,
            other => MessageError::Storage(other.to_string()),
        }
    }
}

impl From<MessageError> for AppError {
    fn from(error: MessageError) -> Self {
        match error {
            MessageError::NotFound => AppError::NotFound(error.to_string()),
            MessageError::Unauthorized => AppError::Unauthorized(error.to_string()),
            MessageError::InvalidAuthor(_) | MessageError::InvalidKind(_) => {
                AppError::Validation(error.to_string())
            }
            MessageError::Storage(msg) => AppError::StorageUnavailable(msg),
        }
    }
}

/// MessageService implementation
#[derive(Clone)]
pub struct MessageServiceImpl {
    message_repo: Arc<dyn MessageRepository>,
    participant_repo: Arc<dyn ParticipantRepository>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl MessageServiceImpl {
    pub fn new(
        message_repo: Arc<dyn MessageRepository>,
        participant_repo: Arc<dyn ParticipantRepository>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            message_repo,
            participant_repo,
            id_generator,
        }
    }

    /// Load a message and check that `author` wrote it.
    async fn owned_message(&self, message_id: i64, author: &str) -> Result<Message, MessageError> {
        let message = self
            .message_repo
            .find_by_id(message_id)
            .await?
            .ok_or(MessageError::NotFound)?;

        if message.from != author {
            tracing::debug!(message_id, author, owner = %message.from, "Rejected change by non-author");
            return Err(MessageError::Unauthorized);
        }

        Ok(message)
    }
}

#[async_trait]
impl MessageService for MessageServiceImpl {
    async fn append(
        &self,
        from: &str,
        to: &str,
        text: &str,
        kind: MessageKind,
    ) -> Result<Message, MessageError> {
        let message = Message {
            id: self.id_generator.generate(),
            from: from.to_string(),
            to: to.to_string(),
            text: text.to_string(),
            kind,
            time: clock_time(Local::now()),
        };

        let created = self.message_repo.create(&message).await?;
        metrics::record_message(kind.as_str());

        Ok(created)
    }

    async fn post(&self, from: &str, request: PostMessageDto) -> Result<Message, MessageError> {
        if !request.kind.is_user_authored() {
            return Err(MessageError::InvalidKind(request.kind));
        }

        if !is_registered(self.participant_repo.as_ref(), from).await? {
            return Err(MessageError::InvalidAuthor(from.to_string()));
        }

        let message = self
            .append(from, &request.to, &request.text, request.kind)
            .await?;

        tracing::debug!(id = message.id, from, to = %message.to, kind = %message.kind, "Message posted");
        Ok(message)
    }

    async fn query(&self, viewer: &str, limit: Option<usize>) -> Result<Vec<Message>, MessageError> {
        let all = self.message_repo.list().await?;
        let visible = VisibilityFilter::visible(viewer, all);

        Ok(VisibilityFilter::take_recent(visible, limit))
    }

    async fn edit(
        &self,
        message_id: i64,
        author: &str,
        request: PostMessageDto,
    ) -> Result<Message, MessageError> {
        let mut message = self.owned_message(message_id, author).await?;

        if !request.kind.is_user_authored() {
            return Err(MessageError::InvalidKind(request.kind));
        }

        message.apply(MessageUpdate {
            to: request.to,
            text: request.text,
            kind: request.kind,
        });

        let updated = self.message_repo.update(&message).await?;
        tracing::debug!(id = message_id, author, "Message edited");

        Ok(updated)
    }

    async fn delete(&self, message_id: i64, author: &str) -> Result<(), MessageError> {
        self.owned_message(message_id, author).await?;
        self.message_repo.delete(message_id).await?;
        tracing::debug!(id = message_id, author, "Message deleted");

        Ok(())
    }
}
