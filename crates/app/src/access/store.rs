//! Session store.
//!
//! The store is the only writer of the process-wide [`AuthState`]. Each auth event starts a
//! [`Cycle`] with a fresh generation number; a cycle may commit its result only if no later
//! cycle has started since, so a slow stale cycle can never overwrite newer state.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use maitre::{
    gate::{GateDecision, GateRequest, decide},
    session::{AccessToken, AuthEvent, Session, UserUuid},
    state::AuthState,
};
use tokio::{sync::watch, task::JoinHandle, time::timeout};
use tracing::{debug, warn};

use crate::{
    access::AccessResolver,
    identity::{AuthEventSource, IdentityError, IdentityProvider},
};

/// What the store currently holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    /// Generation of the cycle that produced `auth`; zero before the first commit.
    pub generation: u64,

    /// State the gates read.
    pub auth: AuthState,

    /// User reported by the most recent early session probe. Informational only.
    pub hinted_user: Option<UserUuid>,
}

/// Holds the current auth state and drives resolution cycles.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

struct Inner {
    resolver: AccessResolver,
    identity: Arc<dyn IdentityProvider>,
    events: AuthEventSource,
    latest: AtomicU64,
    state: watch::Sender<StoreSnapshot>,
}

impl SessionStore {
    /// Create a store that starts out loading.
    #[must_use]
    pub fn new(
        resolver: AccessResolver,
        identity: Arc<dyn IdentityProvider>,
        events: AuthEventSource,
    ) -> Self {
        let (state, _receiver) = watch::channel(StoreSnapshot::default());

        Self {
            inner: Arc::new(Inner {
                resolver,
                identity,
                events,
                latest: AtomicU64::new(0),
                state,
            }),
        }
    }

    /// Start a new resolution cycle, superseding every cycle started before it.
    ///
    /// The store reads as loading until this cycle, or a later one, commits.
    #[must_use]
    pub fn begin(&self) -> Cycle {
        let generation = self.inner.latest.fetch_add(1, Ordering::SeqCst) + 1;

        debug!(generation, "starting resolution cycle");

        self.inner.state.send_if_modified(|snapshot| {
            if snapshot.auth.is_loading() {
                return false;
            }

            snapshot.auth = AuthState::Resolving;

            true
        });

        Cycle {
            store: self.clone(),
            generation,
        }
    }

    /// Resolve the session carried by `event`. Returns whether the result was committed.
    pub async fn handle(&self, event: AuthEvent) -> bool {
        debug!(kind = ?event.kind, "auth event");

        self.begin().run(event.session).await
    }

    /// Listen to the event source, starting one cycle per event.
    ///
    /// Cycles run concurrently; generation numbers are assigned in event order so the
    /// latest event always wins. The listener runs until the returned handle is aborted.
    pub fn spawn(&self) -> JoinHandle<()> {
        let mut subscription = self.inner.events.subscribe();
        let store = self.clone();

        tokio::spawn(async move {
            while let Some(event) = subscription.next().await {
                debug!(kind = ?event.kind, "auth event");

                let cycle = store.begin();

                tokio::spawn(async move {
                    cycle.run(event.session).await;
                });
            }
        })
    }

    /// Ask the identity provider for the session behind `token` without resolving it.
    ///
    /// The answer is recorded as a hint only: it never ends the loading state, which is
    /// reserved for a completed cycle.
    pub async fn hint(&self, token: &AccessToken) -> Option<Session> {
        let after = self.inner.resolver.config().fetch_timeout;

        let session = match timeout(after, self.inner.identity.get_session(token)).await {
            Ok(Ok(session)) => session,
            Ok(Err(error)) => {
                warn!(error = %error, "session probe failed");

                None
            }
            Err(_elapsed) => {
                warn!(?after, "session probe timed out");

                None
            }
        };

        let hinted_user = session.as_ref().map(|session| session.user);

        self.inner.state.send_if_modified(|snapshot| {
            let changed = snapshot.hinted_user != hinted_user;

            snapshot.hinted_user = hinted_user;

            changed
        });

        session
    }

    /// Revoke the session and announce the sign-out to listeners.
    ///
    /// # Errors
    ///
    /// Returns an error when the identity provider rejects the sign-out; nothing is
    /// published in that case.
    pub async fn sign_out(&self, token: &AccessToken) -> Result<(), IdentityError> {
        self.inner.identity.sign_out(token).await?;

        self.inner.events.publish(AuthEvent::signed_out());

        Ok(())
    }

    /// The current state.
    #[must_use]
    pub fn current(&self) -> AuthState {
        self.inner.state.borrow().auth.clone()
    }

    /// The full snapshot including its generation.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        self.inner.state.borrow().clone()
    }

    /// Watch every committed change.
    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<StoreSnapshot> {
        self.inner.state.subscribe()
    }

    /// Wait until the latest cycle has committed and return its state.
    pub async fn settled(&self) -> AuthState {
        let mut receiver = self.subscribe_state();

        match receiver.wait_for(|snapshot| !snapshot.auth.is_loading()).await {
            Ok(snapshot) => snapshot.auth.clone(),
            Err(_closed) => AuthState::SignedOut,
        }
    }

    /// Gate decision for `request` against the current state.
    #[must_use]
    pub fn decide(&self, request: &GateRequest) -> GateDecision {
        let state = self.inner.state.borrow();

        decide(&state.auth, request, &self.inner.resolver.config().paths)
    }

    fn commit(&self, generation: u64, auth: AuthState) -> bool {
        self.inner.state.send_if_modified(|snapshot| {
            let latest = self.inner.latest.load(Ordering::SeqCst);

            if generation < latest || generation <= snapshot.generation {
                debug!(generation, latest, "discarding stale resolution");

                return false;
            }

            snapshot.generation = generation;
            snapshot.auth = auth;

            true
        })
    }
}

/// One resolution pass, stamped with the generation it was started under.
pub struct Cycle {
    store: SessionStore,
    generation: u64,
}

impl Cycle {
    /// Generation this cycle commits under.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Resolve `session` and commit the result unless a newer cycle has started.
    pub async fn run(self, session: Option<Session>) -> bool {
        let auth = self.store.inner.resolver.resolve(session).await;

        self.store.commit(self.generation, auth)
    }
}
