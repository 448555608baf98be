//! Identity provider seam.

use async_trait::async_trait;
use maitre::session::{AccessToken, Session};
use mockall::automock;

use crate::identity::IdentityError;

#[automock]
#[async_trait]
/// Session lookups against the identity provider.
pub trait IdentityProvider: Send + Sync {
    /// Resolve the session an access token belongs to. `Ok(None)` means the token is
    /// unknown, expired or revoked.
    async fn get_session(&self, token: &AccessToken) -> Result<Option<Session>, IdentityError>;

    /// Revoke the session behind `token`.
    async fn sign_out(&self, token: &AccessToken) -> Result<(), IdentityError>;
}
