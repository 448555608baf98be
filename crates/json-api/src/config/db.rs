//! Database Config

use clap::Args;

/// Application database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Upper bound on pooled connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 10)]
    pub database_max_connections: u32,

    /// Apply pending migrations before serving
    #[arg(long, env = "DATABASE_MIGRATE_ON_START", default_value_t = false)]
    pub migrate_on_start: bool,
}
