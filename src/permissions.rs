//! Permissions
//!
//! System roles map to a static permission table. Custom roles carry whatever set the
//! tenant assigned them. Checks never fail: an unresolved role simply has no permissions.

use std::{fmt, str::FromStr};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::roles::SystemRole;

/// A single permitted action or component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Permission {
    /// View the dashboard.
    #[serde(rename = "dashboard.view")]
    DashboardView,

    /// Use the point-of-sale terminal.
    #[serde(rename = "pos.access")]
    PosAccess,

    /// View orders.
    #[serde(rename = "orders.view")]
    OrdersView,

    /// Create, edit and void orders.
    #[serde(rename = "orders.manage")]
    OrdersManage,

    /// View the kitchen display.
    #[serde(rename = "kitchen.view")]
    KitchenView,

    /// View the menu.
    #[serde(rename = "menu.view")]
    MenuView,

    /// Edit the menu.
    #[serde(rename = "menu.manage")]
    MenuManage,

    /// View stock levels.
    #[serde(rename = "inventory.view")]
    InventoryView,

    /// Adjust stock and suppliers.
    #[serde(rename = "inventory.manage")]
    InventoryManage,

    /// View rooms.
    #[serde(rename = "rooms.view")]
    RoomsView,

    /// Edit rooms and housekeeping.
    #[serde(rename = "rooms.manage")]
    RoomsManage,

    /// View reservations.
    #[serde(rename = "reservations.view")]
    ReservationsView,

    /// Create and edit reservations.
    #[serde(rename = "reservations.manage")]
    ReservationsManage,

    /// View customers and loyalty.
    #[serde(rename = "customers.view")]
    CustomersView,

    /// Edit customers and loyalty programmes.
    #[serde(rename = "customers.manage")]
    CustomersManage,

    /// View staff schedules.
    #[serde(rename = "staff.view")]
    StaffView,

    /// Edit staff schedules.
    #[serde(rename = "staff.manage")]
    StaffManage,

    /// View analytics.
    #[serde(rename = "analytics.view")]
    AnalyticsView,

    /// View financial reports.
    #[serde(rename = "financials.view")]
    FinancialsView,

    /// Manage users and roles.
    #[serde(rename = "users.manage")]
    UsersManage,

    /// Manage restaurant settings.
    #[serde(rename = "settings.manage")]
    SettingsManage,
}

impl Permission {
    /// Every permission.
    pub const ALL: [Self; 21] = [
        Self::DashboardView,
        Self::PosAccess,
        Self::OrdersView,
        Self::OrdersManage,
        Self::KitchenView,
        Self::MenuView,
        Self::MenuManage,
        Self::InventoryView,
        Self::InventoryManage,
        Self::RoomsView,
        Self::RoomsManage,
        Self::ReservationsView,
        Self::ReservationsManage,
        Self::CustomersView,
        Self::CustomersManage,
        Self::StaffView,
        Self::StaffManage,
        Self::AnalyticsView,
        Self::FinancialsView,
        Self::UsersManage,
        Self::SettingsManage,
    ];

    /// Storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DashboardView => "dashboard.view",
            Self::PosAccess => "pos.access",
            Self::OrdersView => "orders.view",
            Self::OrdersManage => "orders.manage",
            Self::KitchenView => "kitchen.view",
            Self::MenuView => "menu.view",
            Self::MenuManage => "menu.manage",
            Self::InventoryView => "inventory.view",
            Self::InventoryManage => "inventory.manage",
            Self::RoomsView => "rooms.view",
            Self::RoomsManage => "rooms.manage",
            Self::ReservationsView => "reservations.view",
            Self::ReservationsManage => "reservations.manage",
            Self::CustomersView => "customers.view",
            Self::CustomersManage => "customers.manage",
            Self::StaffView => "staff.view",
            Self::StaffManage => "staff.manage",
            Self::AnalyticsView => "analytics.view",
            Self::FinancialsView => "financials.view",
            Self::UsersManage => "users.manage",
            Self::SettingsManage => "settings.manage",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a permission string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown permission \"{0}\"")]
pub struct UnknownPermissionError(pub String);

impl FromStr for Permission {
    type Err = UnknownPermissionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        Self::ALL
            .into_iter()
            .find(|permission| permission.as_str() == value)
            .ok_or_else(|| UnknownPermissionError(value.to_string()))
    }
}

/// Resolved permission set for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    permissions: FxHashSet<Permission>,
}

impl PermissionSet {
    /// A set granting nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Static permissions of a system role.
    #[must_use]
    pub fn for_system_role(role: SystemRole) -> Self {
        system_role_permissions(role).iter().copied().collect()
    }

    /// Whether `permission` is granted.
    pub fn has(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Whether any of `permissions` is granted. Short-circuits on the first match and
    /// is false for an empty list.
    pub fn has_any(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|permission| self.has(*permission))
    }

    /// Whether all of `permissions` are granted.
    pub fn has_all(&self, permissions: &[Permission]) -> bool {
        permissions.iter().all(|permission| self.has(*permission))
    }

    /// Whether nothing is granted.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// Granted permissions in a stable order.
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<Permission> {
        let mut permissions: Vec<Permission> = self.permissions.iter().copied().collect();

        permissions.sort_unstable();

        permissions
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self {
            permissions: iter.into_iter().collect(),
        }
    }
}

const STAFF: &[Permission] = &[Permission::DashboardView, Permission::OrdersView];

const WAITER: &[Permission] = &[
    Permission::DashboardView,
    Permission::PosAccess,
    Permission::OrdersView,
    Permission::OrdersManage,
    Permission::MenuView,
    Permission::ReservationsView,
    Permission::CustomersView,
];

const CHEF: &[Permission] = &[
    Permission::DashboardView,
    Permission::OrdersView,
    Permission::KitchenView,
    Permission::MenuView,
    Permission::InventoryView,
];

const RECEPTIONIST: &[Permission] = &[
    Permission::DashboardView,
    Permission::RoomsView,
    Permission::ReservationsView,
    Permission::ReservationsManage,
    Permission::CustomersView,
    Permission::CustomersManage,
];

const MANAGER: &[Permission] = &[
    Permission::DashboardView,
    Permission::PosAccess,
    Permission::OrdersView,
    Permission::OrdersManage,
    Permission::KitchenView,
    Permission::MenuView,
    Permission::MenuManage,
    Permission::InventoryView,
    Permission::InventoryManage,
    Permission::RoomsView,
    Permission::RoomsManage,
    Permission::ReservationsView,
    Permission::ReservationsManage,
    Permission::CustomersView,
    Permission::CustomersManage,
    Permission::StaffView,
    Permission::StaffManage,
    Permission::AnalyticsView,
];

fn system_role_permissions(role: SystemRole) -> &'static [Permission] {
    match role {
        SystemRole::Staff => STAFF,
        SystemRole::Waiter => WAITER,
        SystemRole::Chef => CHEF,
        SystemRole::Receptionist => RECEPTIONIST,
        SystemRole::Manager => MANAGER,
        SystemRole::Admin | SystemRole::Owner => &Permission::ALL,
    }
}
