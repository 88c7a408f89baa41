use crate::domain::user::User;

#[derive(Debug, sqlx::FromRow)]
pub struct UserRecord {
    pub(crate) username: String,
    #[sqlx(rename = "password")]
    pub(crate) password_hash: String,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self { username: record.username, password_hash: record.password_hash }
    }
}
