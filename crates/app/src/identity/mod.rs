//! Identity
//!
//! The identity provider owns sessions. This module holds the provider seam, an HTTP
//! client for a hosted provider, and the in-process auth event source.

mod client;
mod errors;
mod events;
mod provider;

pub use client::{HttpIdentityProvider, IdentityConfig};
pub use errors::IdentityError;
pub use events::{AuthEventSource, AuthSubscription};
pub use provider::*;
