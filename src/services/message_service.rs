use crate::adapters::database::DbPool;
use crate::adapters::database::message_repo::MessageRepository;
use crate::config::{ListScope, MessagingConfig};
use crate::domain::message::{Message, ReadReceipt, SentMessage};
use crate::error::{AppError, Result};
use opentelemetry::{KeyValue, global, metrics::Counter};
use time::OffsetDateTime;

#[derive(Clone, Debug)]
pub(crate) struct Metrics {
    pub(crate) sent_total: Counter<u64>,
    pub(crate) read_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("messagely-server");
        Self {
            sent_total: meter
                .u64_counter("messagely_messages_sent_total")
                .with_description("Total messages sent")
                .build(),
            read_total: meter
                .u64_counter("messagely_messages_read_total")
                .with_description("Total messages marked as read for the first time")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MessageService {
    pool: DbPool,
    repo: MessageRepository,
    config: MessagingConfig,
    metrics: Metrics,
}

impl MessageService {
    #[must_use]
    pub fn new(pool: DbPool, repo: MessageRepository, config: MessagingConfig) -> Self {
        Self { pool, repo, config, metrics: Metrics::new() }
    }

    /// Lists the messages visible to `username` according to the configured scope.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the query fails.
    #[tracing::instrument(err(level = "warn"), skip(self))]
    pub async fn list(&self, username: &str) -> Result<Vec<Message>> {
        let mut conn = self.pool.acquire().await?;
        let messages = match self.config.list_scope {
            ListScope::Participant => self.repo.all_for_participant(&mut conn, username).await?,
            ListScope::All => self.repo.all(&mut conn).await?,
        };

        tracing::debug!(count = messages.len(), "Messages listed");
        Ok(messages)
    }

    /// Fetches one message the caller sent or received.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the message does not exist.
    /// Returns `AppError::Forbidden` if the caller is neither sender nor recipient.
    #[tracing::instrument(err(level = "warn"), skip(self))]
    pub async fn get(&self, username: &str, id: i32) -> Result<Message> {
        let mut conn = self.pool.acquire().await?;
        let message = self.repo.get(&mut conn, id).await?;

        if !message.is_participant(username) {
            return Err(AppError::Forbidden);
        }

        Ok(message)
    }

    /// Sends a message from `from_username` to `to_username`. `sent_at` is taken from the server clock.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` if the recipient or body is empty, contains NUL, or the body is too long.
    /// Returns `AppError::NotFound` if the recipient does not exist.
    /// Returns `AppError::Database` if the message cannot be stored.
    #[tracing::instrument(err(level = "warn"), skip(self, body))]
    pub async fn send(&self, from_username: &str, to_username: &str, body: &str) -> Result<SentMessage> {
        self.validate(to_username, body)?;

        let mut conn = self.pool.acquire().await?;
        match self.repo.create(&mut conn, from_username, to_username, body, OffsetDateTime::now_utc()).await {
            Ok(message) => {
                tracing::debug!(message_id = message.id, "Message stored");
                self.metrics.sent_total.add(1, &[KeyValue::new("status", "success")]);
                Ok(message)
            }
            Err(e) => {
                self.metrics.sent_total.add(1, &[KeyValue::new("status", "failure")]);
                Err(e)
            }
        }
    }

    /// Marks a message as read by its recipient. A message that is already read keeps its
    /// original `read_at`.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the message does not exist.
    /// Returns `AppError::Forbidden` if the caller is not the recipient.
    #[tracing::instrument(err(level = "warn"), skip(self))]
    pub async fn mark_read(&self, username: &str, id: i32) -> Result<ReadReceipt> {
        let mut conn = self.pool.acquire().await?;
        let message = self.repo.get(&mut conn, id).await?;

        if !message.is_recipient(username) {
            return Err(AppError::Forbidden);
        }

        if let Some(read_at) = message.read_at {
            tracing::debug!("Message already read");
            return Ok(ReadReceipt { id: message.id, read_at });
        }

        let receipt = self.repo.mark_read(&mut conn, id, OffsetDateTime::now_utc()).await?;
        self.metrics.read_total.add(1, &[]);

        Ok(receipt)
    }

    fn validate(&self, to_username: &str, body: &str) -> Result<()> {
        if to_username.trim().is_empty() {
            return Err(AppError::BadRequest("to_username is required".into()));
        }
        if body.trim().is_empty() {
            return Err(AppError::BadRequest("body is required".into()));
        }
        // Postgres text cannot hold U+0000.
        if to_username.contains('\0') {
            return Err(AppError::BadRequest("to_username must not contain NUL characters".into()));
        }
        if body.contains('\0') {
            return Err(AppError::BadRequest("body must not contain NUL characters".into()));
        }
        if body.chars().count() > self.config.max_body_len {
            return Err(AppError::BadRequest(format!(
                "body must be at most {} characters",
                self.config.max_body_len
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_service(max_body_len: usize) -> MessageService {
        let config = MessagingConfig { max_body_len, list_scope: ListScope::Participant };
        let pool = sqlx::PgPool::connect_lazy("postgres://localhost/test").unwrap();
        MessageService::new(pool, MessageRepository::new(), config)
    }

    #[tokio::test]
    async fn test_validate_accepts_normal_message() {
        let service = setup_service(100);
        assert!(service.validate("bob", "hello").is_ok());
    }

    #[tokio::test]
    async fn test_validate_rejects_empty_fields() {
        let service = setup_service(100);
        assert!(matches!(service.validate("", "hello"), Err(AppError::BadRequest(_))));
        assert!(matches!(service.validate("bob", ""), Err(AppError::BadRequest(_))));
        assert!(matches!(service.validate("bob", "   \n"), Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_validate_counts_characters_not_bytes() {
        let service = setup_service(3);
        assert!(service.validate("bob", "héé").is_ok());
        assert!(matches!(service.validate("bob", "four"), Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_validate_rejects_nul_characters() {
        let service = setup_service(100);
        assert!(matches!(service.validate("bob", "hi\u{0}there"), Err(AppError::BadRequest(_))));
        assert!(matches!(service.validate("b\u{0}ob", "hello"), Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_send_rejects_before_touching_database() {
        // The lazy pool points nowhere; validation must fail first.
        let service = setup_service(100);
        let result = service.send("alice", "bob", "").await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
