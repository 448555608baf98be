//! Test Helpers

use maitre::{
    profiles::Profile,
    restaurants::{RestaurantDetails, RestaurantUuid},
    roles::{Role, SystemRole},
    session::{AccessToken, Session, UserUuid},
};

pub(crate) fn session() -> Session {
    Session {
        user: UserUuid::new(),
        email: "host@example.com".to_string(),
        access_token: AccessToken::new("test-token"),
    }
}

pub(crate) fn profile(
    user: UserUuid,
    restaurant: Option<RestaurantUuid>,
    role: SystemRole,
) -> Profile {
    Profile {
        id: user,
        restaurant,
        role: Some(Role::system(role)),
        is_active: true,
    }
}

pub(crate) fn complete_details() -> RestaurantDetails {
    RestaurantDetails {
        name: Some("Chez Maître".to_string()),
        address: Some("1 Rue de la Paix, Paris".to_string()),
        currency: Some("EUR".to_string()),
    }
}
