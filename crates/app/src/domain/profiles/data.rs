//! Profile Data

use maitre::{restaurants::RestaurantUuid, roles::SystemRole};

/// Admin assignment of a user to a restaurant with a system role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileAssignment {
    /// Restaurant the user joins.
    pub restaurant: RestaurantUuid,

    /// Role held there.
    pub role: SystemRole,
}
