//! Depot helper extensions.

use std::any::Any;

use maitre::session::{AccessToken, Session};
use salvo::prelude::{Depot, StatusError};

/// Helpers for depot values shared between middleware and handlers.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_access_token(&mut self, token: AccessToken);

    fn access_token(&self) -> Option<&AccessToken>;

    fn insert_session(&mut self, session: Session);

    /// The caller's session, if the bearer token resolved to one.
    fn session(&self) -> Option<Session>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_access_token(&mut self, token: AccessToken) {
        self.inject(token);
    }

    fn access_token(&self) -> Option<&AccessToken> {
        self.obtain::<AccessToken>().ok()
    }

    fn insert_session(&mut self, session: Session) {
        self.inject(session);
    }

    fn session(&self) -> Option<Session> {
        self.obtain::<Session>().ok().cloned()
    }
}
