//! Message Repository Implementation
//!
//! PostgreSQL implementation of the message log. `from` and `to` are SQL
//! keywords and are quoted throughout.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{Message, MessageKind, MessageRepository};
use crate::shared::error::AppError;

/// PostgreSQL message repository implementation.
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Creates a new PgMessageRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for message queries.
#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: i64,
    from: String,
    to: String,
    text: String,
    kind: String,
    time: String,
}

impl MessageRow {
    /// Converts database row to domain Message entity.
    fn into_message(self) -> Result<Message, AppError> {
        let kind = MessageKind::parse(&self.kind).ok_or_else(|| {
            AppError::Internal(format!("Unknown message kind '{}' on message {}", self.kind, self.id))
        })?;

        Ok(Message {
            id: self.id,
            from: self.from,
            to: self.to,
            text: self.text,
            kind,
            time: self.time,
        })
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    async fn create(&self, message: &Message) -> Result<Message, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO messages (id, "from", "to", text, kind, time)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, "from", "to", text, kind, time
            "#,
        )
        .bind(message.id)
        .bind(&message.from)
        .bind(&message.to)
        .bind(&message.text)
        .bind(message.kind.as_str())
        .bind(&message.time)
        .fetch_one(&self.pool)
        .await?;

        row.into_message()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Message>, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, "from", "to", text, kind, time
            FROM messages
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_message()).transpose()
    }

    /// The full log in creation order; filtering happens in the service.
    async fn list(&self) -> Result<Vec<Message>, AppError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, "from", "to", text, kind, time
            FROM messages
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_message()).collect()
    }

    async fn update(&self, message: &Message) -> Result<Message, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            UPDATE messages
            SET "to" = $2,
                text = $3,
                kind = $4
            WHERE id = $1
            RETURNING id, "from", "to", text, kind, time
            "#,
        )
        .bind(message.id)
        .bind(&message.to)
        .bind(&message.text)
        .bind(message.kind.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Message {} not found", message.id)))?;

        row.into_message()
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Message {} not found", id)));
        }

        Ok(())
    }
}
