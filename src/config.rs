use clap::{Args, Parser, ValueEnum};

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub auth: AuthConfig,

    #[command(flatten)]
    pub messaging: MessagingConfig,

    #[command(flatten)]
    pub health: HealthConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[arg(long = "database-url", env = "MESSAGELY_DATABASE_URL")]
    pub url: String,

    /// Maximum number of pooled connections
    #[arg(long = "db-max-connections", env = "MESSAGELY_DB_MAX_CONNECTIONS", default_value_t = 20)]
    pub max_connections: u32,

    /// Minimum number of idle connections kept open
    #[arg(long = "db-min-connections", env = "MESSAGELY_DB_MIN_CONNECTIONS", default_value_t = 0)]
    pub min_connections: u32,

    /// Seconds to wait for a free connection before failing
    #[arg(long = "db-acquire-timeout-secs", env = "MESSAGELY_DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
    pub acquire_timeout_secs: u64,

    /// Seconds an idle connection is kept before being closed
    #[arg(long = "db-idle-timeout-secs", env = "MESSAGELY_DB_IDLE_TIMEOUT_SECS", default_value_t = 600)]
    pub idle_timeout_secs: u64,

    /// Maximum lifetime of a single connection in seconds
    #[arg(long = "db-max-lifetime-secs", env = "MESSAGELY_DB_MAX_LIFETIME_SECS", default_value_t = 1800)]
    pub max_lifetime_secs: u64,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "MESSAGELY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the public API
    #[arg(long, env = "MESSAGELY_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Port for the management server (health probes)
    #[arg(long, env = "MESSAGELY_MGMT_PORT", default_value_t = 9090)]
    pub mgmt_port: u16,

    /// Seconds to wait for in-flight requests during shutdown
    #[arg(long, env = "MESSAGELY_SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
    pub shutdown_timeout_secs: u64,
}

#[derive(Clone, Debug, Args)]
pub struct AuthConfig {
    /// Secret key for JWT signing
    #[arg(long, env = "MESSAGELY_JWT_SECRET")]
    pub jwt_secret: String,

    /// Session token time-to-live in seconds
    #[arg(long, env = "MESSAGELY_TOKEN_TTL_SECS", default_value_t = 86_400)]
    pub token_ttl_secs: u64,
}

#[derive(Clone, Debug, Args)]
pub struct MessagingConfig {
    /// Maximum message body length in characters
    #[arg(long, env = "MESSAGELY_MAX_BODY_LEN", default_value_t = 10_000)]
    pub max_body_len: usize,

    /// Which messages the list endpoint returns to a caller
    #[arg(long, env = "MESSAGELY_LIST_SCOPE", value_enum, default_value_t = ListScope::Participant)]
    pub list_scope: ListScope,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ListScope {
    /// Only messages the caller sent or received
    #[default]
    Participant,
    /// Every stored message
    All,
}

#[derive(Clone, Debug, Args)]
pub struct HealthConfig {
    /// Timeout for the database readiness check in milliseconds
    #[arg(long = "health-db-timeout-ms", env = "MESSAGELY_HEALTH_DB_TIMEOUT_MS", default_value_t = 2000)]
    pub db_timeout_ms: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// OTLP collector base URL; traces and metrics are exported only when set
    #[arg(long, env = "MESSAGELY_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Log output format
    #[arg(long, env = "MESSAGELY_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_with_required_args() {
        let config = Config::try_parse_from([
            "messagely-server",
            "--database-url",
            "postgres://localhost/messagely",
            "--jwt-secret",
            "secret",
        ])
        .unwrap();

        assert_eq!(config.database.url, "postgres://localhost/messagely");
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.mgmt_port, 9090);
        assert_eq!(config.auth.token_ttl_secs, 86_400);
        assert_eq!(config.messaging.max_body_len, 10_000);
        assert_eq!(config.messaging.list_scope, ListScope::Participant);
        assert_eq!(config.telemetry.log_format, LogFormat::Text);
        assert!(config.telemetry.otlp_endpoint.is_none());
    }

    #[test]
    fn test_log_format_json() {
        let config = Config::try_parse_from([
            "messagely-server",
            "--database-url",
            "postgres://localhost/messagely",
            "--jwt-secret",
            "secret",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(config.telemetry.log_format, LogFormat::Json);
    }
}
