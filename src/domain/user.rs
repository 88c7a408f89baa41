#[derive(Debug, Clone)]
pub struct User {
    pub(crate) username: String,
    pub(crate) password_hash: String,
}

/// The public part of a user embedded in every message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub(crate) username: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) phone: String,
}

/// Profile fields supplied at registration.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}
