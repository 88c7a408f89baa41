use crate::adapters::database::DbPool;
use crate::adapters::database::user_repo::UserRepository;
use crate::domain::auth_session::AuthSession;
use crate::domain::user::NewUser;
use crate::error::{AppError, Result};
use crate::services::auth_service::AuthService;
use opentelemetry::{global, metrics::Counter};

#[derive(Clone, Debug)]
struct AccountMetrics {
    users_registered_total: Counter<u64>,
    logins_total: Counter<u64>,
}

impl AccountMetrics {
    fn new() -> Self {
        let meter = global::meter("messagely-server");
        Self {
            users_registered_total: meter
                .u64_counter("messagely_users_registered_total")
                .with_description("Total number of successful user registrations")
                .build(),
            logins_total: meter
                .u64_counter("messagely_logins_total")
                .with_description("Total number of successful logins")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AccountService {
    pool: DbPool,
    user_repo: UserRepository,
    auth_service: AuthService,
    metrics: AccountMetrics,
}

impl AccountService {
    #[must_use]
    pub fn new(pool: DbPool, user_repo: UserRepository, auth_service: AuthService) -> Self {
        Self { pool, user_repo, auth_service, metrics: AccountMetrics::new() }
    }

    /// Creates a user and returns a session for it.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` if a field is empty or contains NUL.
    /// Returns `AppError::Conflict` if the username is taken.
    #[tracing::instrument(skip(self, new_user), fields(username = %new_user.username), err(level = "warn"))]
    pub async fn register(&self, new_user: NewUser) -> Result<AuthSession> {
        for (field, value) in [
            ("username", &new_user.username),
            ("password", &new_user.password),
            ("first_name", &new_user.first_name),
            ("last_name", &new_user.last_name),
            ("phone", &new_user.phone),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::BadRequest(format!("{field} is required")));
            }
            if value.contains('\0') {
                return Err(AppError::BadRequest(format!("{field} must not contain NUL characters")));
            }
        }

        let password_hash = self.auth_service.hash_password(&new_user.password).await?;

        let mut conn = self.pool.acquire().await?;
        let user = self.user_repo.create(&mut conn, &new_user, &password_hash).await?;

        tracing::info!("User registered successfully");
        self.metrics.users_registered_total.add(1, &[]);

        self.auth_service.create_session(&user.username)
    }

    /// Verifies credentials and returns a new session.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` if the username or password contains NUL.
    /// Returns `AppError::AuthError` if the user does not exist or the password is wrong.
    #[tracing::instrument(skip(self, password), err(level = "warn"))]
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession> {
        if username.contains('\0') || password.contains('\0') {
            return Err(AppError::BadRequest("credentials must not contain NUL characters".into()));
        }

        let mut conn = self.pool.acquire().await?;
        let Some(user) = self.user_repo.find_by_username(&mut conn, username).await? else {
            tracing::warn!("Login failed: user not found");
            return Err(AppError::AuthError);
        };

        if !self.auth_service.verify_password(password, &user.password_hash).await? {
            tracing::warn!("Login failed: invalid password");
            return Err(AppError::AuthError);
        }

        self.user_repo.update_login_timestamp(&mut conn, &user.username).await?;

        tracing::info!("User logged in successfully");
        self.metrics.logins_total.add(1, &[]);

        self.auth_service.create_session(&user.username)
    }
}
