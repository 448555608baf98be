//! Identity provider errors.

use thiserror::Error;

/// Errors that can occur when talking to the identity provider.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-2xx response or an unexpected body.
    #[error("unexpected response from identity provider: {0}")]
    UnexpectedResponse(String),
}
