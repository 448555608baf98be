//! Profiles

use serde::Serialize;

use crate::{
    restaurants::RestaurantUuid,
    roles::{Role, SystemRole},
    session::UserUuid,
};

/// A user's profile: which tenant they belong to and what role they hold there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    /// Same as the session's user id.
    pub id: UserUuid,

    /// Tenant boundary for everything else the user touches.
    pub restaurant: Option<RestaurantUuid>,

    /// Effective role, `None` when the stored columns name no known role.
    pub role: Option<Role>,

    /// Deactivated profiles cannot use the application.
    pub is_active: bool,
}

/// Profile inserted the first time a user signs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    /// Profile id, equal to the user id.
    pub id: UserUuid,

    /// Email copied from the session.
    pub email: String,

    /// Always the lowest-privilege system role.
    pub role: SystemRole,

    /// Always active.
    pub is_active: bool,
}

impl NewProfile {
    /// Default profile for a user seen for the first time.
    #[must_use]
    pub fn provision(id: UserUuid, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            role: SystemRole::DEFAULT,
            is_active: true,
        }
    }
}
