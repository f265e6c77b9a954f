//! PostgreSQL pool for the user directory
//!
//! Pool settings are derived from [`crate::core::config::Config::db_config`].
//! The `users` table is migrated before the pool is handed to
//! [`crate::core::db::UserRepository`].

use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};

/// Default upper bound on open connections
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default time a directory call waits for a free connection
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Connection settings for the user directory database
#[derive(Clone)]
pub struct DbConfig {
    /// Connection URL; may embed a password
    pub database_url: String,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection before the directory is
    /// reported unavailable
    pub acquire_timeout_secs: u64,
}

impl DbConfig {
    /// Settings for the given URL with default sizing
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
        }
    }

    /// Set max connections
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Set acquire timeout
    pub fn acquire_timeout(mut self, secs: u64) -> Self {
        self.acquire_timeout_secs = secs;
        self
    }
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("database_url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

/// Errors raised while bringing up the user directory database
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Failed to connect to user directory database: {0}")]
    ConnectionError(#[from] sqlx::Error),

    #[error("Failed to migrate user directory schema: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

/// Connect to PostgreSQL and bring the `users` schema up to date
pub async fn create_pool(config: &DbConfig) -> Result<PgPool, DbError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!(
        max_connections = config.max_connections,
        acquire_timeout_secs = config.acquire_timeout_secs,
        "User directory database ready"
    );
    Ok(pool)
}
