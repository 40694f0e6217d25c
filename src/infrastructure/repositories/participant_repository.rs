//! Participant Repository Implementation
//!
//! PostgreSQL implementation of the participant directory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Participant, ParticipantRepository};
use crate::shared::error::AppError;

/// PostgreSQL participant repository implementation.
#[derive(Clone)]
pub struct PgParticipantRepository {
    pool: PgPool,
}

impl PgParticipantRepository {
    /// Creates a new PgParticipantRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for participant queries.
#[derive(Debug, sqlx::FromRow)]
struct ParticipantRow {
    name: String,
    last_seen: DateTime<Utc>,
}

impl ParticipantRow {
    fn into_participant(self) -> Participant {
        Participant {
            name: self.name,
            last_seen: self.last_seen,
        }
    }
}

#[async_trait]
impl ParticipantRepository for PgParticipantRepository {
    /// Insert a participant, relying on the primary key for uniqueness.
    async fn create(&self, participant: &Participant) -> Result<Participant, AppError> {
        let row = sqlx::query_as::<_, ParticipantRow>(
            r#"
            INSERT INTO participants (name, last_seen)
            VALUES ($1, $2)
            RETURNING name, last_seen
            "#,
        )
        .bind(&participant.name)
        .bind(participant.last_seen)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(format!("Name '{}' is already taken", participant.name))
            }
            _ => AppError::Database(e),
        })?;

        Ok(row.into_participant())
    }

    async fn exists(&self, name: &str) -> Result<bool, AppError> {
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM participants WHERE name = $1)",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    async fn list(&self) -> Result<Vec<Participant>, AppError> {
        let rows = sqlx::query_as::<_, ParticipantRow>(
            "SELECT name, last_seen FROM participants ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_participant()).collect())
    }

    async fn touch(&self, name: &str, at: DateTime<Utc>) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE participants SET last_seen = $2 WHERE name = $1")
            .bind(name)
            .bind(at)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, name: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM participants WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_idle(&self, cutoff: DateTime<Utc>) -> Result<Vec<Participant>, AppError> {
        let rows = sqlx::query_as::<_, ParticipantRow>(
            r#"
            SELECT name, last_seen
            FROM participants
            WHERE last_seen < $1
            ORDER BY name
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_participant()).collect())
    }

    async fn delete_idle(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM participants WHERE last_seen < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
