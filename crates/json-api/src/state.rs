//! State

use std::sync::Arc;

use maitre::{session::Session, state::AuthState};
use maitre_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext) -> Self {
        Self { app }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self::new(app))
    }

    /// Run a full resolution cycle for the caller's session.
    pub(crate) async fn resolve(&self, session: Option<Session>) -> AuthState {
        self.app.resolver.resolve(session).await
    }
}
