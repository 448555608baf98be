//! Auth State
//!
//! The single value that route gates read. It is produced by one resolution cycle and
//! replaced wholesale by the next, never patched field by field.

use crate::{
    permissions::{Permission, PermissionSet},
    profiles::Profile,
    restaurants::{SetupStatus, SubscriptionStatus},
    session::Session,
};

/// Everything known about a signed-in user once resolution has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAccess {
    /// The session that was resolved.
    pub session: Session,

    /// The user's profile.
    pub profile: Profile,

    /// Tenant subscription entitlement.
    pub subscription: SubscriptionStatus,

    /// Tenant setup completeness.
    pub setup: SetupStatus,

    /// Effective permissions of the profile's role.
    pub permissions: PermissionSet,
}

/// Access state as seen by gates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// No resolution cycle has finished yet.
    #[default]
    Resolving,

    /// No usable session or profile.
    SignedOut,

    /// Fully resolved.
    SignedIn(Box<ResolvedAccess>),
}

impl AuthState {
    /// Whether resolution is still in progress.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Resolving)
    }

    /// The resolved access, if signed in.
    #[must_use]
    pub fn access(&self) -> Option<&ResolvedAccess> {
        match self {
            Self::SignedIn(access) => Some(access.as_ref()),
            Self::Resolving | Self::SignedOut => None,
        }
    }

    /// Whether `permission` is granted. False while resolving or signed out.
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.access()
            .is_some_and(|access| access.permissions.has(permission))
    }

    /// Whether any of `permissions` is granted. False while resolving or signed out.
    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        self.access()
            .is_some_and(|access| access.permissions.has_any(permissions))
    }
}
