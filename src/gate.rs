//! Route Gates
//!
//! [`decide`] is a pure function of the current [`AuthState`] and the requested route.
//! Checks run in a fixed order and the first one that does not pass wins:
//!
//! 1. resolution in progress → [`GateDecision::Loading`]
//! 2. no session → [`GateDecision::RedirectToSignIn`]
//! 3. subscription inactive → [`GateDecision::Paywall`] (rendered in place)
//! 4. setup incomplete → [`GateDecision::RedirectToSetup`], or
//!    [`GateDecision::SetupError`] when the check itself failed
//! 5. route permission requirement unmet → [`GateDecision::Forbidden`]
//! 6. otherwise → [`GateDecision::Render`]

use std::fmt;

use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    permissions::Permission,
    restaurants::SetupStatus,
    state::AuthState,
};

/// Default sign-in route.
pub const DEFAULT_SIGN_IN_PATH: &str = "/auth";

/// Default restaurant setup route.
pub const DEFAULT_SETUP_PATH: &str = "/restaurant-setup";

/// Raised when a requested location is not an absolute in-app path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The location does not start with `/`.
    #[error("location must start with '/'")]
    NotAbsolute,

    /// The location points at another origin.
    #[error("location must not name another origin")]
    External,
}

/// An in-app location: path plus optional query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: Option<String>,
}

impl Location {
    /// Parse an in-app href such as `/orders?status=open`.
    ///
    /// # Errors
    ///
    /// Returns an error when `href` is not an absolute same-origin path.
    pub fn parse(href: &str) -> Result<Self, LocationError> {
        let href = href.trim();

        if !href.starts_with('/') {
            return Err(LocationError::NotAbsolute);
        }

        // Browsers read `/\host` as protocol-relative and strip tabs and newlines, so a
        // tab between the slashes still yields `//host`.
        if href.starts_with("//")
            || href.starts_with("/\\")
            || href.chars().any(char::is_control)
        {
            return Err(LocationError::External);
        }

        let (path, query) = match href.split_once('?') {
            Some((path, query)) => (path, Some(query).filter(|query| !query.is_empty())),
            None => (href, None),
        };

        Ok(Self {
            path: path.to_string(),
            query: query.map(str::to_string),
        })
    }

    /// Path component.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query component without the leading `?`.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.query {
            Some(query) => write!(f, "{}?{query}", self.path),
            None => f.write_str(&self.path),
        }
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Where the gate sends users it turns away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatePaths {
    /// Sign-in route.
    pub sign_in: String,

    /// Restaurant setup route.
    pub setup: String,
}

impl Default for GatePaths {
    fn default() -> Self {
        Self {
            sign_in: DEFAULT_SIGN_IN_PATH.to_string(),
            setup: DEFAULT_SETUP_PATH.to_string(),
        }
    }
}

/// A protected route being requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateRequest {
    /// Where the user wants to go.
    pub location: Location,

    /// Permissions of which at least one is needed; empty means none required.
    pub any_of: SmallVec<[Permission; 4]>,
}

impl GateRequest {
    /// A request with no permission requirement.
    #[must_use]
    pub fn new(location: Location) -> Self {
        Self {
            location,
            any_of: SmallVec::new(),
        }
    }

    /// Require at least one of `permissions`.
    #[must_use]
    pub fn requiring(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.any_of.extend(permissions);
        self
    }
}

/// What a protected route should do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GateDecision {
    /// Show a loading indicator; nothing else is known yet.
    Loading,

    /// Send the user to sign in.
    RedirectToSignIn {
        /// Sign-in route.
        to: String,

        /// Where to return afterwards.
        return_to: Location,
    },

    /// Render the plans page in place of the content.
    Paywall,

    /// Send the user to finish restaurant setup.
    RedirectToSetup {
        /// Setup route.
        to: String,

        /// Where to return once setup is complete.
        return_to: Location,
    },

    /// The setup check failed; show the message and do not redirect.
    SetupError {
        /// User-facing description.
        message: String,
    },

    /// Signed in and entitled, but the role lacks the route's permission.
    Forbidden {
        /// Permissions of which one would have been enough.
        any_of: SmallVec<[Permission; 4]>,
    },

    /// Render the requested content.
    Render,
}

impl GateDecision {
    /// Short label for logs and metrics.
    #[must_use]
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::RedirectToSignIn { .. } => "sign_in",
            Self::Paywall => "paywall",
            Self::RedirectToSetup { .. } => "setup",
            Self::SetupError { .. } => "setup_error",
            Self::Forbidden { .. } => "forbidden",
            Self::Render => "render",
        }
    }
}

/// Decide what a protected route renders.
#[must_use]
pub fn decide(state: &AuthState, request: &GateRequest, paths: &GatePaths) -> GateDecision {
    let access = match state {
        AuthState::Resolving => return GateDecision::Loading,
        AuthState::SignedOut => {
            return GateDecision::RedirectToSignIn {
                to: paths.sign_in.clone(),
                return_to: request.location.clone(),
            };
        }
        AuthState::SignedIn(access) => access,
    };

    if !access.subscription.is_active() {
        return GateDecision::Paywall;
    }

    // The setup flow itself must stay reachable while setup is incomplete.
    if request.location.path() != paths.setup {
        match &access.setup {
            SetupStatus::Complete => {}
            SetupStatus::NoTenant | SetupStatus::Incomplete => {
                return GateDecision::RedirectToSetup {
                    to: paths.setup.clone(),
                    return_to: request.location.clone(),
                };
            }
            SetupStatus::Error { message } => {
                return GateDecision::SetupError {
                    message: message.clone(),
                };
            }
        }
    }

    if !request.any_of.is_empty() && !access.permissions.has_any(&request.any_of) {
        return GateDecision::Forbidden {
            any_of: request.any_of.clone(),
        };
    }

    GateDecision::Render
}
