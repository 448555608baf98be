//! Identity Provider Config

use clap::Args;
use maitre_app::identity::IdentityConfig;

/// Identity provider settings.
#[derive(Debug, Args)]
pub struct IdentityArgs {
    /// Identity provider base address
    #[arg(long = "identity-url", env = "IDENTITY_URL")]
    pub url: String,

    /// Identity provider public API key
    #[arg(long = "identity-api-key", env = "IDENTITY_API_KEY", hide_env_values = true)]
    pub api_key: String,
}

impl IdentityArgs {
    /// Convert into the client configuration.
    #[must_use]
    pub fn into_identity_config(self) -> IdentityConfig {
        IdentityConfig {
            url: self.url,
            api_key: self.api_key,
        }
    }
}
