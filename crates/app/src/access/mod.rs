//! Access Resolution
//!
//! Turns an identity provider session into an [`AuthState`](maitre::state::AuthState):
//! the profile is resolved first, then the subscription, setup and permission checks run
//! side by side. [`SessionStore`] owns the resulting state and discards the results of
//! superseded cycles.

mod config;
mod errors;
mod resolver;
mod store;

pub use config::{AccessConfig, DEFAULT_FETCH_TIMEOUT};
pub use errors::{ResolveError, Stage};
pub use resolver::{AccessResolver, SETUP_ERROR_MESSAGE};
pub use store::{Cycle, SessionStore, StoreSnapshot};
