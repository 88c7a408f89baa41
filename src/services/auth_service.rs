use crate::config::AuthConfig;
use crate::domain::auth::{Claims, Password};
use crate::domain::auth_session::AuthSession;
use crate::error::{AppError, Result};

#[derive(Clone, Debug)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    #[must_use]
    pub const fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Hashes a password on the blocking pool.
    ///
    /// # Errors
    /// Returns `AppError::Internal` if hashing fails.
    #[tracing::instrument(err, skip(self, password))]
    pub async fn hash_password(&self, password: &str) -> Result<String> {
        let password = password.to_string();
        tokio::task::spawn_blocking(move || Password::hash(&password)).await.map_err(|_| AppError::Internal)?
    }

    /// Verifies a password on the blocking pool.
    ///
    /// # Errors
    /// Returns `AppError::Internal` if the stored hash is malformed.
    #[tracing::instrument(err, skip(self, password, password_hash))]
    pub async fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool> {
        let password = password.to_string();
        let password_hash = password_hash.to_string();
        tokio::task::spawn_blocking(move || Password::verify(&password, &password_hash))
            .await
            .map_err(|_| AppError::Internal)?
    }

    /// Issues a signed session token for `username`.
    ///
    /// # Errors
    /// Returns `AppError::Internal` if signing fails.
    pub fn create_session(&self, username: &str) -> Result<AuthSession> {
        let claims = Claims::new(username, self.config.token_ttl_secs);
        let token = claims.encode(&self.config.jwt_secret)?;

        Ok(AuthSession { token, expires_at: i64::try_from(claims.exp).unwrap_or(i64::MAX) })
    }

    /// Returns the username carried by a valid token.
    ///
    /// # Errors
    /// Returns `AppError::AuthError` if the token is invalid or expired.
    pub fn verify_token(&self, token: &str) -> Result<String> {
        Claims::decode(token, &self.config.jwt_secret).map(|claims| claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_service() -> AuthService {
        AuthService::new(AuthConfig { jwt_secret: "test_secret".to_string(), token_ttl_secs: 3600 })
    }

    #[test]
    fn test_session_roundtrip() {
        let service = setup_service();
        let session = service.create_session("alice").unwrap();

        assert_eq!(service.verify_token(&session.token).unwrap(), "alice");
        assert!(session.expires_at > 0);
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let service = setup_service();
        let other = AuthService::new(AuthConfig { jwt_secret: "other".to_string(), token_ttl_secs: 3600 });
        let session = other.create_session("alice").unwrap();

        assert!(matches!(service.verify_token(&session.token), Err(AppError::AuthError)));
    }

    #[tokio::test]
    async fn test_password_hashing() {
        let service = setup_service();
        let password = "password12345";
        let hash = service.hash_password(password).await.unwrap();

        assert!(service.verify_password(password, &hash).await.unwrap());
        assert!(!service.verify_password("wrong_password", &hash).await.unwrap());
    }
}
