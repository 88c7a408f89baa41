use crate::domain::message::{Message, ReadReceipt, SentMessage};
use crate::domain::user::UserSummary;
use time::OffsetDateTime;

/// A message row joined with both user rows, flattened by column prefix.
#[derive(Debug, sqlx::FromRow)]
pub struct MessageRecord {
    pub(crate) id: i32,
    pub(crate) body: String,
    pub(crate) sent_at: OffsetDateTime,
    pub(crate) read_at: Option<OffsetDateTime>,
    pub(crate) from_username: String,
    pub(crate) from_first_name: String,
    pub(crate) from_last_name: String,
    pub(crate) from_phone: String,
    pub(crate) to_username: String,
    pub(crate) to_first_name: String,
    pub(crate) to_last_name: String,
    pub(crate) to_phone: String,
}

impl From<MessageRecord> for Message {
    fn from(record: MessageRecord) -> Self {
        Self {
            id: record.id,
            body: record.body,
            sent_at: record.sent_at,
            read_at: record.read_at,
            from_user: UserSummary {
                username: record.from_username,
                first_name: record.from_first_name,
                last_name: record.from_last_name,
                phone: record.from_phone,
            },
            to_user: UserSummary {
                username: record.to_username,
                first_name: record.to_first_name,
                last_name: record.to_last_name,
                phone: record.to_phone,
            },
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct SentMessageRecord {
    pub(crate) id: i32,
    pub(crate) from_username: String,
    pub(crate) to_username: String,
    pub(crate) body: String,
    pub(crate) sent_at: OffsetDateTime,
}

impl From<SentMessageRecord> for SentMessage {
    fn from(record: SentMessageRecord) -> Self {
        Self {
            id: record.id,
            from_username: record.from_username,
            to_username: record.to_username,
            body: record.body,
            sent_at: record.sent_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct ReadReceiptRecord {
    pub(crate) id: i32,
    pub(crate) read_at: OffsetDateTime,
}

impl From<ReadReceiptRecord> for ReadReceipt {
    fn from(record: ReadReceiptRecord) -> Self {
        Self { id: record.id, read_at: record.read_at }
    }
}
