//! In-Memory Repository Implementation
//!
//! Process-local implementation of both repository traits, used when
//! `storage.backend = "memory"` and by the test suite.
//!
//! Locks are held for exactly one operation and never across an `.await`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;

use crate::domain::{Message, MessageRepository, Participant, ParticipantRepository};
use crate::shared::error::AppError;

/// In-memory participant directory and message log.
#[derive(Default)]
pub struct MemoryStore {
    participants: DashMap<String, Participant>,
    /// Keyed by snowflake id, so iteration order is creation order.
    messages: RwLock<BTreeMap<i64, Message>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParticipantRepository for MemoryStore {
    /// Check and insert happen under the same shard lock.
    async fn create(&self, participant: &Participant) -> Result<Participant, AppError> {
        match self.participants.entry(participant.name.clone()) {
            Entry::Occupied(_) => Err(AppError::Conflict(format!(
                "Name '{}' is already taken",
                participant.name
            ))),
            Entry::Vacant(slot) => {
                slot.insert(participant.clone());
                Ok(participant.clone())
            }
        }
    }

    async fn exists(&self, name: &str) -> Result<bool, AppError> {
        Ok(self.participants.contains_key(name))
    }

    async fn list(&self) -> Result<Vec<Participant>, AppError> {
        let mut all: Vec<Participant> = self
            .participants
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn touch(&self, name: &str, at: DateTime<Utc>) -> Result<bool, AppError> {
        match self.participants.get_mut(name) {
            Some(mut entry) => {
                entry.last_seen = at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, name: &str) -> Result<(), AppError> {
        self.participants.remove(name);
        Ok(())
    }

    async fn find_idle(&self, cutoff: DateTime<Utc>) -> Result<Vec<Participant>, AppError> {
        let mut idle: Vec<Participant> = self
            .participants
            .iter()
            .filter(|entry| entry.last_seen < cutoff)
            .map(|entry| entry.value().clone())
            .collect();
        idle.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(idle)
    }

    async fn delete_idle(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError> {
        let mut removed = 0u64;
        self.participants.retain(|_, participant| {
            let keep = participant.last_seen >= cutoff;
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }
}

#[async_trait]
impl MessageRepository for MemoryStore {
    async fn create(&self, message: &Message) -> Result<Message, AppError> {
        let mut messages = self.messages.write();
        if messages.contains_key(&message.id) {
            return Err(AppError::Conflict(format!("Message {} already exists", message.id)));
        }
        messages.insert(message.id, message.clone());
        Ok(message.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Message>, AppError> {
        Ok(self.messages.read().get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Message>, AppError> {
        Ok(self.messages.read().values().cloned().collect())
    }

    async fn update(&self, message: &Message) -> Result<Message, AppError> {
        let mut messages = self.messages.write();
        let stored = messages
            .get_mut(&message.id)
            .ok_or_else(|| AppError::NotFound(format!("Message {} not found", message.id)))?;

        stored.to = message.to.clone();
        stored.text = message.text.clone();
        stored.kind = message.kind;
        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.messages
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Message {} not found", id)))
    }
}
