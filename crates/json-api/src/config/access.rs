//! Access Pipeline Config

use std::time::Duration;

use clap::Args;
use maitre::gate::{DEFAULT_SETUP_PATH, DEFAULT_SIGN_IN_PATH, GatePaths};
use maitre_app::access::AccessConfig;

/// Access pipeline settings.
#[derive(Debug, Args)]
pub struct AccessArgs {
    /// Per-lookup timeout while resolving access, in milliseconds
    #[arg(long, env = "ACCESS_FETCH_TIMEOUT_MS", default_value_t = 10_000_u64)]
    pub fetch_timeout_ms: u64,

    /// Route signed-out users are sent to
    #[arg(long, env = "SIGN_IN_PATH", default_value = DEFAULT_SIGN_IN_PATH)]
    pub sign_in_path: String,

    /// Route users with incomplete restaurant setup are sent to
    #[arg(long, env = "SETUP_PATH", default_value = DEFAULT_SETUP_PATH)]
    pub setup_path: String,
}

impl AccessArgs {
    /// Convert into the pipeline configuration.
    #[must_use]
    pub fn into_access_config(self) -> AccessConfig {
        AccessConfig {
            fetch_timeout: Duration::from_millis(self.fetch_timeout_ms),
            paths: GatePaths {
                sign_in: self.sign_in_path,
                setup: self.setup_path,
            },
        }
    }
}
