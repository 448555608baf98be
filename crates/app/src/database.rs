//! Database connection management

use sqlx::{
    PgPool,
    migrate::MigrateError,
    postgres::PgPoolOptions,
};

/// Default pool size used by the CLI.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connect to `PostgreSQL` with the default pool size.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    connect_with(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Connect to `PostgreSQL` with at most `max_connections` pooled connections.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect(database_url)
        .await
}

/// Apply pending schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Connection settings for a long-running process.
#[derive(Debug, Clone)]
pub struct DatabaseOptions {
    pub url: String,
    pub max_connections: u32,
    pub migrate_on_start: bool,
}
