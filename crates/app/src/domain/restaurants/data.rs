//! Restaurant Data

use maitre::restaurants::{RestaurantDetails, RestaurantUuid};

/// New Restaurant Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRestaurant {
    /// UUID to assign to the restaurant row.
    pub uuid: RestaurantUuid,

    /// Setup fields, any of which may still be missing.
    pub details: RestaurantDetails,
}
