//! Access resolution errors.

use std::{fmt, time::Duration};

use thiserror::Error;

use crate::domain::{
    profiles::ProfilesServiceError, restaurants::RestaurantsServiceError,
    roles::RolesServiceError, subscriptions::SubscriptionsServiceError,
};

/// Step of a resolution cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Loading the user's profile.
    Profile,

    /// Creating a missing profile.
    Provision,

    /// Checking the restaurant's subscription.
    Subscription,

    /// Checking the restaurant's mandatory setup.
    Setup,

    /// Loading a custom role's permissions.
    Permissions,
}

impl Stage {
    /// Lowercase name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Provision => "provision",
            Self::Subscription => "subscription",
            Self::Setup => "setup",
            Self::Permissions => "permissions",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a resolution step could not produce its value.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The session carries no usable user id.
    #[error("session has no user id")]
    MissingUser,

    /// The profile lookup failed.
    #[error("failed to load profile")]
    Profile(#[source] ProfilesServiceError),

    /// Creating the missing profile failed.
    #[error("failed to provision profile")]
    Provision(#[source] ProfilesServiceError),

    /// The profile exists but has been switched off.
    #[error("profile is deactivated")]
    Deactivated,

    /// The subscription lookup failed.
    #[error("failed to load subscription")]
    Subscription(#[source] SubscriptionsServiceError),

    /// The restaurant details lookup failed.
    #[error("failed to load restaurant")]
    Setup(#[source] RestaurantsServiceError),

    /// The custom role permission lookup failed.
    #[error("failed to load custom role permissions")]
    Permissions(#[source] RolesServiceError),

    /// A collaborator did not answer within the fetch timeout.
    #[error("{stage} lookup timed out after {after:?}")]
    TimedOut {
        /// Step that stalled.
        stage: Stage,

        /// Timeout that elapsed.
        after: Duration,
    },
}

impl ResolveError {
    /// The step the error was raised in.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::MissingUser | Self::Profile(_) | Self::Deactivated => Stage::Profile,
            Self::Provision(_) => Stage::Provision,
            Self::Subscription(_) => Stage::Subscription,
            Self::Setup(_) => Stage::Setup,
            Self::Permissions(_) => Stage::Permissions,
            Self::TimedOut { stage, .. } => *stage,
        }
    }
}
