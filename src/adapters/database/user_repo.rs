use crate::adapters::database::records::UserRecord;
use crate::domain::user::{NewUser, User};
use crate::error::{AppError, Result};
use sqlx::PgConnection;

#[derive(Clone, Debug, Default)]
pub struct UserRepository {}

impl UserRepository {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Inserts a user with an already hashed password.
    ///
    /// # Errors
    /// Returns `AppError::Conflict` if the username is taken.
    /// Returns `AppError::Database` if the insert fails.
    #[tracing::instrument(level = "debug", skip(self, conn, new_user, password_hash), fields(username = %new_user.username))]
    pub(crate) async fn create(&self, conn: &mut PgConnection, new_user: &NewUser, password_hash: &str) -> Result<User> {
        let result = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (username, password, first_name, last_name, phone, join_at, last_login_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING username, password
            "#,
        )
        .bind(&new_user.username)
        .bind(password_hash)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.phone)
        .fetch_one(conn)
        .await;

        match result {
            Ok(record) => Ok(record.into()),
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some("23505") => {
                Err(AppError::Conflict("Username already exists".into()))
            }
            Err(e) => Err(AppError::Database(e)),
        }
    }

    /// # Errors
    /// Returns `AppError::Database` if the query fails.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn find_by_username(&self, conn: &mut PgConnection, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT username, password
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(conn)
        .await?;

        Ok(user.map(Into::into))
    }

    /// # Errors
    /// Returns `AppError::Database` if the update fails.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn update_login_timestamp(&self, conn: &mut PgConnection, username: &str) -> Result<()> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE username = $1").bind(username).execute(conn).await?;
        Ok(())
    }
}
