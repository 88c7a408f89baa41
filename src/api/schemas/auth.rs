use crate::domain::auth_session::AuthSession as Session;
use crate::domain::user::NewUser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl From<Registration> for NewUser {
    fn from(registration: Registration) -> Self {
        Self {
            username: registration.username,
            password: registration.password,
            first_name: registration.first_name,
            last_name: registration.last_name,
            phone: registration.phone,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Login {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub expires_at: i64,
}

impl From<Session> for AuthSession {
    fn from(session: Session) -> Self {
        Self { token: session.token, expires_at: session.expires_at }
    }
}
