//! Participant entity and repository trait.
//!
//! Maps to the `participants` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use crate::shared::error::AppError;

/// A registered chat participant.
///
/// Maps to the `participants` table:
/// - name: TEXT PRIMARY KEY (case-sensitive, unique)
/// - last_seen: TIMESTAMPTZ NOT NULL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Unique display name (trimmed, non-empty)
    pub name: String,

    /// Last registration or heartbeat
    pub last_seen: DateTime<Utc>,
}

impl Participant {
    /// Create a participant seen at `now`.
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            last_seen: now,
        }
    }
}

/// Oldest `last_seen` that still counts as active at `now`.
///
/// A participant is idle once it has been silent for longer than
/// `threshold`, i.e. when `last_seen < idle_cutoff(now, threshold)`.
pub fn idle_cutoff(now: DateTime<Utc>, threshold: Duration) -> DateTime<Utc> {
    now - threshold
}

/// Repository trait for the participant directory.
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Insert a participant.
    ///
    /// Fails with `AppError::Conflict` if the name is taken; the check and
    /// the insert are a single atomic storage operation.
    async fn create(&self, participant: &Participant) -> Result<Participant, AppError>;

    /// Check whether a name is currently registered.
    async fn exists(&self, name: &str) -> Result<bool, AppError>;

    /// All registered participants, ordered by name.
    async fn list(&self) -> Result<Vec<Participant>, AppError>;

    /// Set `last_seen`. Returns false if the participant does not exist.
    async fn touch(&self, name: &str, at: DateTime<Utc>) -> Result<bool, AppError>;

    /// Remove a single participant. Missing names are not an error.
    async fn delete(&self, name: &str) -> Result<(), AppError>;

    /// Participants whose `last_seen` is strictly before `cutoff`.
    async fn find_idle(&self, cutoff: DateTime<Utc>) -> Result<Vec<Participant>, AppError>;

    /// Remove every participant whose `last_seen` is strictly before `cutoff`
    /// in one bulk operation. Returns the number removed.
    async fn delete_idle(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError>;
}
