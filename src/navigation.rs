//! Navigation
//!
//! The application's sidebar, filtered by the caller's permissions.

use serde::Serialize;

use crate::permissions::{Permission, PermissionSet};

/// A sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Stable identifier.
    pub key: &'static str,

    /// Label shown to the user.
    pub label: &'static str,

    /// Route the entry links to.
    pub path: &'static str,

    /// Permission needed to see the entry; `None` means always visible.
    pub requires: Option<Permission>,
}

const fn item(
    key: &'static str,
    label: &'static str,
    path: &'static str,
    requires: Option<Permission>,
) -> NavItem {
    NavItem {
        key,
        label,
        path,
        requires,
    }
}

/// Every sidebar entry in display order.
pub const NAV_ITEMS: &[NavItem] = &[
    item("dashboard", "Dashboard", "/dashboard", Some(Permission::DashboardView)),
    item("pos", "Point of Sale", "/pos", Some(Permission::PosAccess)),
    item("orders", "Orders", "/orders", Some(Permission::OrdersView)),
    item("kitchen", "Kitchen", "/kitchen", Some(Permission::KitchenView)),
    item("menu", "Menu", "/menu", Some(Permission::MenuView)),
    item("inventory", "Inventory", "/inventory", Some(Permission::InventoryView)),
    item("rooms", "Rooms", "/rooms", Some(Permission::RoomsView)),
    item(
        "reservations",
        "Reservations",
        "/reservations",
        Some(Permission::ReservationsView),
    ),
    item("customers", "Customers", "/customers", Some(Permission::CustomersView)),
    item("staff", "Staff", "/staff", Some(Permission::StaffView)),
    item("analytics", "Analytics", "/analytics", Some(Permission::AnalyticsView)),
    item(
        "financials",
        "Financials",
        "/financials",
        Some(Permission::FinancialsView),
    ),
    item("users", "Users & Roles", "/users", Some(Permission::UsersManage)),
    item("settings", "Settings", "/settings", Some(Permission::SettingsManage)),
    item("profile", "My Profile", "/profile", None),
];

/// Sidebar entries visible with `permissions`.
pub fn visible_items(permissions: &PermissionSet) -> impl Iterator<Item = &'static NavItem> + '_ {
    NAV_ITEMS.iter().filter(|item| {
        item.requires
            .is_none_or(|permission| permissions.has(permission))
    })
}

/// The entry a path belongs to, matched by longest path prefix.
#[must_use]
pub fn item_for_path(path: &str) -> Option<&'static NavItem> {
    NAV_ITEMS
        .iter()
        .filter(|item| {
            path == item.path
                || path
                    .strip_prefix(item.path)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
        .max_by_key(|item| item.path.len())
}
