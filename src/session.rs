//! Sessions
//!
//! A [`Session`] is the identity provider's view of a signed-in user. It is owned by
//! whichever component holds the session store; everything downstream only reads it.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::uuids::TypedUuid;

/// Marker for user identifiers.
#[derive(Debug)]
pub enum User {}

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// Opaque bearer token issued by the identity provider.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Borrow the raw token for transmission to the identity provider.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(**redacted**)")
    }
}

impl Drop for AccessToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Signed-in user session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Identity provider user id; also the profile id.
    pub user: UserUuid,

    /// Email address the user signed in with.
    pub email: String,

    /// Token proving the session, rotated on refresh.
    pub access_token: AccessToken,
}

/// Kind of identity provider notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthEventKind {
    /// The provider's first report after a listener subscribes.
    InitialSession,

    /// A user signed in.
    SignedIn,

    /// The user signed out or the session was revoked.
    SignedOut,

    /// The access token was rotated.
    TokenRefreshed,

    /// User attributes changed.
    UserUpdated,
}

/// Identity provider change notification.
///
/// Every event, whatever its kind, triggers a full re-resolution of the caller's access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthEvent {
    /// What happened.
    pub kind: AuthEventKind,

    /// The session after the change, if any.
    pub session: Option<Session>,
}

impl AuthEvent {
    /// Build a sign-in style event for `session`.
    #[must_use]
    pub fn signed_in(session: Session) -> Self {
        Self {
            kind: AuthEventKind::SignedIn,
            session: Some(session),
        }
    }

    /// Build a sign-out event.
    #[must_use]
    pub fn signed_out() -> Self {
        Self {
            kind: AuthEventKind::SignedOut,
            session: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_debug_is_redacted() {
        let token = AccessToken::new("super-secret");

        assert_eq!(format!("{token:?}"), "AccessToken(**redacted**)");
        assert_eq!(token.expose(), "super-secret");
    }

    #[test]
    fn sign_out_event_carries_no_session() {
        let event = AuthEvent::signed_out();

        assert_eq!(event.kind, AuthEventKind::SignedOut);
        assert!(event.session.is_none(), "sign-out must not carry a session");
    }
}
