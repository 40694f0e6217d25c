//! Participant Service
//!
//! Registration, heartbeats and listing for the participant directory.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::message_service::{MessageError, MessageService, MessageServiceImpl};
use crate::domain::{MessageKind, Participant, ParticipantRepository, BROADCAST, JOIN_TEXT};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Participant service trait
#[async_trait]
pub trait ParticipantService: Send + Sync {
    /// Register a new participant and announce the join
    async fn register(&self, name: &str) -> Result<Participant, ParticipantError>;

    /// Refresh a participant's `last_seen`
    async fn heartbeat(&self, name: &str) -> Result<(), ParticipantError>;

    /// All registered participants
    async fn list(&self) -> Result<Vec<Participant>, ParticipantError>;

    /// Whether `name` is currently registered
    async fn is_registered(&self, name: &str) -> Result<bool, ParticipantError>;
}

/// Participant service errors
#[derive(Debug, thiserror::Error)]
pub enum ParticipantError {
    #[error("Name '{0}' is already taken")]
    NameTaken(String),

    #[error("Participant '{0}' is not registered")]
    NotFound(String),

    #[error("Storage unavailable: {0}")]
    Storage(String),
}

impl From<ParticipantError> for AppError {
    fn from(error: ParticipantError) -> Self {
        match error {
            ParticipantError::NameTaken(_) => AppError::Conflict(error.to_string()),
            ParticipantError::NotFound(_) => AppError::NotFound(error.to_string()),
            ParticipantError::Storage(msg) => AppError::StorageUnavailable(msg),
        }
    }
}

/// ParticipantService implementation
pub struct ParticipantServiceImpl {
    participant_repo: Arc<dyn ParticipantRepository>,
    message_log: MessageServiceImpl,
}

impl ParticipantServiceImpl {
    pub fn new(participant_repo: Arc<dyn ParticipantRepository>, message_log: MessageServiceImpl) -> Self {
        Self {
            participant_repo,
            message_log,
        }
    }
}

/// Directory membership check. Message posting goes through this too.
pub(crate) async fn is_registered(
    participant_repo: &dyn ParticipantRepository,
    name: &str,
) -> Result<bool, AppError> {
    participant_repo.exists(name).await
}

fn storage_error(error: AppError) -> ParticipantError {
    ParticipantError::Storage(error.to_string())
}

#[async_trait]
impl ParticipantService for ParticipantServiceImpl {
    async fn register(&self, name: &str) -> Result<Participant, ParticipantError> {
        let participant = self
            .participant_repo
            .create(&Participant::new(name, Utc::now()))
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => ParticipantError::NameTaken(name.to_string()),
                other => storage_error(other),
            })?;

        // Registration only counts once the join notice is in the log.
        if let Err(e) = self
            .message_log
            .append(name, BROADCAST, JOIN_TEXT, MessageKind::Status)
            .await
        {
            tracing::error!(name, error = %e, "Failed to append join notice, rolling back registration");
            if let Err(rollback) = self.participant_repo.delete(name).await {
                tracing::error!(name, error = %rollback, "Failed to roll back registration");
            }
            return Err(match e {
                MessageError::Storage(msg) => ParticipantError::Storage(msg),
                other => ParticipantError::Storage(other.to_string()),
            });
        }

        metrics::record_registration();
        tracing::info!(name, "Participant joined");

        Ok(participant)
    }

    async fn heartbeat(&self, name: &str) -> Result<(), ParticipantError> {
        let found = self
            .participant_repo
            .touch(name, Utc::now())
            .await
            .map_err(storage_error)?;

        if !found {
            return Err(ParticipantError::NotFound(name.to_string()));
        }

        tracing::trace!(name, "Heartbeat");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Participant>, ParticipantError> {
        self.participant_repo.list().await.map_err(storage_error)
    }

    async fn is_registered(&self, name: &str) -> Result<bool, ParticipantError> {
        is_registered(self.participant_repo.as_ref(), name)
            .await
            .map_err(storage_error)
    }
}
