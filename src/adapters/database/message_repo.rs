use crate::adapters::database::records::{MessageRecord, ReadReceiptRecord, SentMessageRecord};
use crate::domain::message::{Message, ReadReceipt, SentMessage};
use crate::error::{AppError, Result};
use sqlx::PgConnection;
use time::OffsetDateTime;

#[derive(Clone, Debug, Default)]
pub struct MessageRepository {}

impl MessageRepository {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Fetches every message with sender and recipient summaries, oldest first.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the query fails.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn all(&self, conn: &mut PgConnection) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, MessageRecord>(
            r#"
            SELECT m.id, m.body, m.sent_at, m.read_at,
                   f.username AS from_username, f.first_name AS from_first_name,
                   f.last_name AS from_last_name, f.phone AS from_phone,
                   t.username AS to_username, t.first_name AS to_first_name,
                   t.last_name AS to_last_name, t.phone AS to_phone
            FROM messages AS m
            JOIN users AS f ON f.username = m.from_username
            JOIN users AS t ON t.username = m.to_username
            ORDER BY m.sent_at ASC, m.id ASC
            "#,
        )
        .fetch_all(conn)
        .await?;

        Ok(messages.into_iter().map(Into::into).collect())
    }

    /// Fetches the messages a user sent or received, oldest first.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the query fails.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn all_for_participant(&self, conn: &mut PgConnection, username: &str) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, MessageRecord>(
            r#"
            SELECT m.id, m.body, m.sent_at, m.read_at,
                   f.username AS from_username, f.first_name AS from_first_name,
                   f.last_name AS from_last_name, f.phone AS from_phone,
                   t.username AS to_username, t.first_name AS to_first_name,
                   t.last_name AS to_last_name, t.phone AS to_phone
            FROM messages AS m
            JOIN users AS f ON f.username = m.from_username
            JOIN users AS t ON t.username = m.to_username
            WHERE m.from_username = $1 OR m.to_username = $1
            ORDER BY m.sent_at ASC, m.id ASC
            "#,
        )
        .bind(username)
        .fetch_all(conn)
        .await?;

        Ok(messages.into_iter().map(Into::into).collect())
    }

    /// Fetches a single message by id.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if no message has this id.
    /// Returns `AppError::Database` if the query fails.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn get(&self, conn: &mut PgConnection, id: i32) -> Result<Message> {
        let record = sqlx::query_as::<_, MessageRecord>(
            r#"
            SELECT m.id, m.body, m.sent_at, m.read_at,
                   f.username AS from_username, f.first_name AS from_first_name,
                   f.last_name AS from_last_name, f.phone AS from_phone,
                   t.username AS to_username, t.first_name AS to_first_name,
                   t.last_name AS to_last_name, t.phone AS to_phone
            FROM messages AS m
            JOIN users AS f ON f.username = m.from_username
            JOIN users AS t ON t.username = m.to_username
            WHERE m.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        record.map(Into::into).ok_or(AppError::NotFound)
    }

    /// Records a new message.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the recipient does not exist.
    /// Returns `AppError::Database` if the insert fails.
    #[tracing::instrument(level = "debug", skip(self, conn, body))]
    pub(crate) async fn create(
        &self,
        conn: &mut PgConnection,
        from_username: &str,
        to_username: &str,
        body: &str,
        sent_at: OffsetDateTime,
    ) -> Result<SentMessage> {
        let result = sqlx::query_as::<_, SentMessageRecord>(
            r#"
            INSERT INTO messages (from_username, to_username, body, sent_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, from_username, to_username, body, sent_at
            "#,
        )
        .bind(from_username)
        .bind(to_username)
        .bind(body)
        .bind(sent_at)
        .fetch_one(conn)
        .await;

        match result {
            Ok(record) => Ok(record.into()),
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some("23503") => {
                // Foreign key violation: to_username does not exist
                Err(AppError::NotFound)
            }
            Err(e) => Err(AppError::Database(e)),
        }
    }

    /// Stamps `read_at` unless it is already set, returning the stored value either way.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if no message has this id.
    /// Returns `AppError::Database` if the update fails.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn mark_read(
        &self,
        conn: &mut PgConnection,
        id: i32,
        read_at: OffsetDateTime,
    ) -> Result<ReadReceipt> {
        let record = sqlx::query_as::<_, ReadReceiptRecord>(
            r#"
            UPDATE messages
            SET read_at = COALESCE(read_at, $2)
            WHERE id = $1
            RETURNING id, read_at
            "#,
        )
        .bind(id)
        .bind(read_at)
        .fetch_optional(conn)
        .await?;

        record.map(Into::into).ok_or(AppError::NotFound)
    }
}
