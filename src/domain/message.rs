use crate::domain::user::UserSummary;
use time::OffsetDateTime;

/// A message expanded with the sender and recipient summaries.
#[derive(Debug, Clone)]
pub struct Message {
    pub(crate) id: i32,
    pub(crate) body: String,
    pub(crate) sent_at: OffsetDateTime,
    pub(crate) read_at: Option<OffsetDateTime>,
    pub(crate) from_user: UserSummary,
    pub(crate) to_user: UserSummary,
}

impl Message {
    #[must_use]
    pub fn is_recipient(&self, username: &str) -> bool {
        self.to_user.username == username
    }

    #[must_use]
    pub fn is_participant(&self, username: &str) -> bool {
        self.from_user.username == username || self.is_recipient(username)
    }
}

/// The row created by a send, without the joined user summaries.
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub(crate) id: i32,
    pub(crate) from_username: String,
    pub(crate) to_username: String,
    pub(crate) body: String,
    pub(crate) sent_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadReceipt {
    pub(crate) id: i32,
    pub(crate) read_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(username: &str) -> UserSummary {
        UserSummary {
            username: username.to_string(),
            first_name: "First".to_string(),
            last_name: "Last".to_string(),
            phone: "555-0100".to_string(),
        }
    }

    fn message(from: &str, to: &str) -> Message {
        Message {
            id: 1,
            body: "hi".to_string(),
            sent_at: OffsetDateTime::now_utc(),
            read_at: None,
            from_user: summary(from),
            to_user: summary(to),
        }
    }

    #[test]
    fn test_only_recipient_is_recipient() {
        let msg = message("alice", "bob");
        assert!(msg.is_recipient("bob"));
        assert!(!msg.is_recipient("alice"));
        assert!(!msg.is_recipient("carol"));
    }

    #[test]
    fn test_participants() {
        let msg = message("alice", "bob");
        assert!(msg.is_participant("alice"));
        assert!(msg.is_participant("bob"));
        assert!(!msg.is_participant("carol"));
    }
}
