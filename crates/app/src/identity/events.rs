//! Auth event source.
//!
//! Identity changes are broadcast to every live [`AuthSubscription`]. Dropping a
//! subscription unsubscribes it.

use maitre::session::AuthEvent;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

const EVENT_CAPACITY: usize = 16;

/// Publishes identity changes to subscribers.
#[derive(Debug, Clone)]
pub struct AuthEventSource {
    sender: broadcast::Sender<AuthEvent>,
}

impl AuthEventSource {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _receiver) = broadcast::channel(EVENT_CAPACITY);

        Self { sender }
    }

    /// Publish an event. Returns how many subscribers will see it.
    pub fn publish(&self, event: AuthEvent) -> usize {
        let kind = event.kind;

        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(_unobserved) => {
                debug!(?kind, "auth event published with no subscribers");

                0
            }
        }
    }

    /// Start listening for events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> AuthSubscription {
        AuthSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for AuthEventSource {
    fn default() -> Self {
        Self::new()
    }
}

/// A live listener on an [`AuthEventSource`].
#[derive(Debug)]
pub struct AuthSubscription {
    receiver: broadcast::Receiver<AuthEvent>,
}

impl AuthSubscription {
    /// Wait for the next event. Returns `None` once the source is gone.
    ///
    /// A listener that falls behind skips the events it missed; only the most recent
    /// identity state matters.
    pub async fn next(&mut self) -> Option<AuthEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "auth subscription lagged; skipping stale events");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
