//! Restaurants
//!
//! A restaurant is the tenant. The access pipeline only cares about two derived facts:
//! whether the tenant's subscription is active and whether its mandatory setup is done.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Marker for restaurant identifiers.
#[derive(Debug)]
pub enum Restaurant {}

/// Restaurant UUID
pub type RestaurantUuid = TypedUuid<Restaurant>;

/// The restaurant fields that must be filled in before the application is usable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantDetails {
    /// Trading name.
    pub name: Option<String>,

    /// Street address.
    pub address: Option<String>,

    /// ISO 4217 currency code.
    pub currency: Option<String>,
}

impl RestaurantDetails {
    /// True iff name, address and currency are all present and not blank.
    pub fn is_setup_complete(&self) -> bool {
        [&self.name, &self.address, &self.currency]
            .into_iter()
            .all(|field| field.as_deref().is_some_and(|value| !value.trim().is_empty()))
    }
}

/// Outcome of the restaurant setup check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SetupStatus {
    /// The profile has no restaurant, so there is nothing to check.
    NoTenant,

    /// Mandatory fields are missing, or the restaurant row does not exist.
    Incomplete,

    /// All mandatory fields are present.
    Complete,

    /// The check itself failed. Distinct from [`SetupStatus::Incomplete`] so the gate
    /// shows a message instead of redirecting in a loop.
    Error {
        /// User-facing description.
        message: String,
    },
}

impl SetupStatus {
    /// Derive the status from a fetched restaurant row.
    #[must_use]
    pub fn from_details(details: Option<&RestaurantDetails>) -> Self {
        match details {
            Some(details) if details.is_setup_complete() => Self::Complete,
            Some(_) | None => Self::Incomplete,
        }
    }

    /// Whether the gate may pass this check.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Billing state recorded for a restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingState {
    /// Paid and current.
    Active,

    /// In a free trial.
    Trialing,

    /// Payment failed; awaiting retry.
    PastDue,

    /// Cancelled by the tenant or the provider.
    Canceled,

    /// Checkout was never completed.
    Incomplete,
}

impl BillingState {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Trialing => "trialing",
            Self::PastDue => "past_due",
            Self::Canceled => "canceled",
            Self::Incomplete => "incomplete",
        }
    }

    /// Parse the storage representation. Unrecognised values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "active" => Some(Self::Active),
            "trialing" => Some(Self::Trialing),
            "past_due" => Some(Self::PastDue),
            "canceled" | "cancelled" => Some(Self::Canceled),
            "incomplete" => Some(Self::Incomplete),
            _ => None,
        }
    }
}

/// A restaurant's subscription row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRecord {
    /// Billing state, `None` when the stored value is not recognised.
    pub state: Option<BillingState>,

    /// End of the paid or trial period, if the provider reported one.
    pub current_period_end: Option<Timestamp>,
}

impl SubscriptionRecord {
    /// Whether the record entitles access at `now`.
    pub fn is_active_at(&self, now: Timestamp) -> bool {
        let entitled = matches!(
            self.state,
            Some(BillingState::Active | BillingState::Trialing)
        );

        entitled && self.current_period_end.is_none_or(|end| end > now)
    }
}

/// Derived subscription entitlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// The tenant may use the product.
    Active,

    /// Paywall.
    Inactive,
}

impl SubscriptionStatus {
    /// Derive the status from an optional subscription row.
    #[must_use]
    pub fn from_record(record: Option<&SubscriptionRecord>, now: Timestamp) -> Self {
        if record.is_some_and(|record| record.is_active_at(now)) {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    /// Whether access is entitled.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}
