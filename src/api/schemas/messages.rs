use crate::domain::message::{Message, ReadReceipt, SentMessage};
use crate::domain::user::UserSummary;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub struct SendMessage {
    pub to_username: String,
    pub body: String,
}

/// Wraps a single message as `{"message": ...}`.
#[derive(Debug, Serialize)]
pub struct MessageEnvelope<T> {
    pub message: T,
}

#[derive(Debug, Serialize)]
pub struct MessageList {
    pub messages: Vec<MessageDetail>,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl From<UserSummary> for UserInfo {
    fn from(user: UserSummary) -> Self {
        Self { username: user.username, first_name: user.first_name, last_name: user.last_name, phone: user.phone }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageDetail {
    pub id: i32,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub sent_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub read_at: Option<OffsetDateTime>,
    pub from_user: UserInfo,
    pub to_user: UserInfo,
}

impl From<Message> for MessageDetail {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            body: message.body,
            sent_at: message.sent_at,
            read_at: message.read_at,
            from_user: message.from_user.into(),
            to_user: message.to_user.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SentMessageInfo {
    pub id: i32,
    pub from_username: String,
    pub to_username: String,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub sent_at: OffsetDateTime,
}

impl From<SentMessage> for SentMessageInfo {
    fn from(message: SentMessage) -> Self {
        Self {
            id: message.id,
            from_username: message.from_username,
            to_username: message.to_username,
            body: message.body,
            sent_at: message.sent_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReadReceiptInfo {
    pub id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub read_at: OffsetDateTime,
}

impl From<ReadReceipt> for ReadReceiptInfo {
    fn from(receipt: ReadReceipt) -> Self {
        Self { id: receipt.id, read_at: receipt.read_at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn summary(username: &str) -> UserSummary {
        UserSummary {
            username: username.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            phone: "555-0100".to_string(),
        }
    }

    #[test]
    fn test_unread_message_shape() {
        let message = Message {
            id: 1,
            body: "hi".to_string(),
            sent_at: datetime!(2024-05-01 12:00:00 UTC),
            read_at: None,
            from_user: summary("alice"),
            to_user: summary("bob"),
        };

        let json = serde_json::to_value(MessageEnvelope { message: MessageDetail::from(message) }).unwrap();

        assert_eq!(json["message"]["id"], 1);
        assert_eq!(json["message"]["body"], "hi");
        assert_eq!(json["message"]["sent_at"], "2024-05-01T12:00:00Z");
        assert!(json["message"]["read_at"].is_null());
        assert_eq!(json["message"]["from_user"]["username"], "alice");
        assert_eq!(json["message"]["to_user"]["username"], "bob");
        assert_eq!(json["message"]["to_user"]["first_name"], "Test");
        assert_eq!(json["message"]["to_user"]["last_name"], "User");
        assert_eq!(json["message"]["to_user"]["phone"], "555-0100");
    }

    #[test]
    fn test_read_receipt_shape() {
        let receipt = ReadReceipt { id: 7, read_at: datetime!(2024-05-01 12:30:00 UTC) };
        let json = serde_json::to_value(MessageEnvelope { message: ReadReceiptInfo::from(receipt) }).unwrap();

        assert_eq!(json, serde_json::json!({"message": {"id": 7, "read_at": "2024-05-01T12:30:00Z"}}));
    }

    #[test]
    fn test_send_message_requires_both_fields() {
        assert!(serde_json::from_str::<SendMessage>(r#"{"to_username": "bob"}"#).is_err());
        assert!(serde_json::from_str::<SendMessage>(r#"{"body": "hi"}"#).is_err());

        let parsed: SendMessage = serde_json::from_str(r#"{"to_username": "bob", "body": "hi"}"#).unwrap();
        assert_eq!(parsed.to_username, "bob");
        assert_eq!(parsed.body, "hi");
    }
}
