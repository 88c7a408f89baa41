pub mod message;
pub mod user;

pub use message::{MessageRecord, ReadReceiptRecord, SentMessageRecord};
pub use user::UserRecord;
