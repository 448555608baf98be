//! Roles
//!
//! Every profile resolves to one effective [`Role`]: either a built-in [`SystemRole`]
//! or a tenant-defined custom role referenced by id.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Marker for custom role identifiers.
#[derive(Debug)]
pub enum CustomRole {}

/// Custom role UUID
pub type RoleUuid = TypedUuid<CustomRole>;

/// Built-in roles with a statically defined permission set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemRole {
    /// Lowest privilege; assigned to newly provisioned profiles.
    Staff,

    /// Front-of-house service.
    Waiter,

    /// Kitchen staff.
    Chef,

    /// Front desk and reservations.
    Receptionist,

    /// Day-to-day operations.
    Manager,

    /// Full access except ownership transfer.
    Admin,

    /// Restaurant owner.
    Owner,
}

impl SystemRole {
    /// Every system role, lowest privilege first.
    pub const ALL: [Self; 7] = [
        Self::Staff,
        Self::Waiter,
        Self::Chef,
        Self::Receptionist,
        Self::Manager,
        Self::Admin,
        Self::Owner,
    ];

    /// Role given to profiles created on first sign-in.
    pub const DEFAULT: Self = Self::Staff;

    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Waiter => "waiter",
            Self::Chef => "chef",
            Self::Receptionist => "receptionist",
            Self::Manager => "manager",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Staff => "Staff",
            Self::Waiter => "Waiter",
            Self::Chef => "Chef",
            Self::Receptionist => "Receptionist",
            Self::Manager => "Manager",
            Self::Admin => "Administrator",
            Self::Owner => "Owner",
        }
    }
}

impl fmt::Display for SystemRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored role string names no system role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown system role \"{0}\"")]
pub struct UnknownRoleError(pub String);

impl FromStr for SystemRole {
    type Err = UnknownRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownRoleError(value.to_string()))
    }
}

/// A user's effective role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Role {
    /// Built-in role.
    System {
        /// Which built-in role.
        role: SystemRole,
    },

    /// Tenant-defined role whose permissions are stored per role.
    Custom {
        /// Custom role id.
        id: RoleUuid,

        /// Name shown in the UI.
        display_name: String,
    },
}

impl Role {
    /// Wrap a system role.
    #[must_use]
    pub const fn system(role: SystemRole) -> Self {
        Self::System { role }
    }

    /// Resolve the stored role columns into an effective role.
    ///
    /// A custom role reference wins over the enum column. Returns `None` when neither
    /// column identifies a role.
    #[must_use]
    pub fn from_columns(
        role: Option<&str>,
        role_id: Option<RoleUuid>,
        role_name_text: Option<&str>,
    ) -> Option<Self> {
        let display_override = role_name_text
            .map(str::trim)
            .filter(|name| !name.is_empty());

        if let Some(id) = role_id {
            return Some(Self::Custom {
                id,
                display_name: display_override.unwrap_or("Custom role").to_string(),
            });
        }

        role.and_then(|role| role.parse().ok()).map(Self::system)
    }

    /// Name shown in the UI.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::System { role } => role.label(),
            Self::Custom { display_name, .. } => display_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_roles_parse_case_insensitively() {
        assert_eq!("Owner".parse::<SystemRole>(), Ok(SystemRole::Owner));
        assert_eq!(" manager ".parse::<SystemRole>(), Ok(SystemRole::Manager));
        assert!("superuser".parse::<SystemRole>().is_err());
    }

    #[test]
    fn custom_role_reference_wins_over_enum_column() {
        let id = RoleUuid::new();

        let role = Role::from_columns(Some("staff"), Some(id), Some("Head Sommelier"));

        assert_eq!(
            role,
            Some(Role::Custom {
                id,
                display_name: "Head Sommelier".to_string()
            })
        );
    }

    #[test]
    fn unknown_role_text_resolves_to_none() {
        assert_eq!(Role::from_columns(Some("root"), None, None), None);
        assert_eq!(Role::from_columns(None, None, Some("Anything")), None);
    }

    #[test]
    fn display_name_falls_back_to_label() {
        assert_eq!(Role::system(SystemRole::Admin).display_name(), "Administrator");

        let custom = Role::from_columns(None, Some(RoleUuid::new()), Some("  "));

        assert_eq!(
            custom.as_ref().map(Role::display_name),
            Some("Custom role")
        );
    }
}
