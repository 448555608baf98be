//! Access pipeline configuration.

use std::time::Duration;

use maitre::gate::GatePaths;

/// Upper bound on any single collaborator call during resolution.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for [`AccessResolver`](super::AccessResolver) and the gates it feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessConfig {
    /// How long one collaborator call may take before it counts as failed.
    pub fetch_timeout: Duration,

    /// Redirect targets used by the gates.
    pub paths: GatePaths,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            paths: GatePaths::default(),
        }
    }
}
