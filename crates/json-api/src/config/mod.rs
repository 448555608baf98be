//! Server configuration module

use clap::Parser;

use crate::config::{
    access::AccessArgs,
    db::DatabaseConfig,
    identity::IdentityArgs,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod access;
pub(crate) mod db;
pub(crate) mod identity;
pub(crate) mod observability;
pub(crate) mod server;

/// Maître JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "maitre-json", about = "Maître JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request observability settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Identity provider settings.
    #[command(flatten)]
    pub identity: IdentityArgs,

    /// Access pipeline settings.
    #[command(flatten)]
    pub access: AccessArgs,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
