//! Maître prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    gate::{GateDecision, GatePaths, GateRequest, Location, LocationError, decide},
    navigation::{NAV_ITEMS, NavItem, item_for_path, visible_items},
    permissions::{Permission, PermissionSet, UnknownPermissionError},
    profiles::{NewProfile, Profile},
    restaurants::{
        BillingState, RestaurantDetails, RestaurantUuid, SetupStatus, SubscriptionRecord,
        SubscriptionStatus,
    },
    roles::{Role, RoleUuid, SystemRole, UnknownRoleError},
    session::{AccessToken, AuthEvent, AuthEventKind, Session, UserUuid},
    state::{AuthState, ResolvedAccess},
    uuids::TypedUuid,
};
