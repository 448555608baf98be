//! Test helpers.

use std::sync::Arc;

use maitre::{
    profiles::Profile,
    restaurants::{BillingState, RestaurantDetails, RestaurantUuid, SubscriptionRecord},
    roles::{Role, SystemRole},
    session::{AccessToken, Session, UserUuid},
};
use maitre_app::{
    access::{AccessConfig, AccessResolver},
    context::AppContext,
    domain::{
        profiles::MockProfilesService, restaurants::MockRestaurantsService,
        roles::MockRolesService, subscriptions::MockSubscriptionsService,
    },
    identity::MockIdentityProvider,
};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid =
    UserUuid::from_uuid(Uuid::from_u128(0x0195_f4a2_7c1e_7b3a_9d4e_2f6a_8b0c_1d2e));

pub(crate) fn test_session() -> Session {
    Session {
        user: TEST_USER_UUID,
        email: "owner@example.com".to_string(),
        access_token: AccessToken::new("test-token"),
    }
}

#[salvo::handler]
pub(crate) async fn inject_session(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_session(test_session());
    depot.insert_access_token(AccessToken::new("test-token"));
    ctrl.call_next(req, depot, res).await;
}

/// Collaborator mocks; anything a test does not configure must not be called.
pub(crate) struct Collaborators {
    pub(crate) profiles: MockProfilesService,
    pub(crate) subscriptions: MockSubscriptionsService,
    pub(crate) restaurants: MockRestaurantsService,
    pub(crate) roles: MockRolesService,
    pub(crate) identity: MockIdentityProvider,
}

impl Collaborators {
    pub(crate) fn strict() -> Self {
        let mut profiles = MockProfilesService::new();
        let mut subscriptions = MockSubscriptionsService::new();
        let mut restaurants = MockRestaurantsService::new();
        let mut roles = MockRolesService::new();
        let mut identity = MockIdentityProvider::new();

        profiles.expect_create_profile().never();
        profiles.expect_assign_profile().never();
        subscriptions.expect_set_subscription().never();
        restaurants.expect_create_restaurant().never();
        roles.expect_custom_role_permissions().never();
        identity.expect_get_session().never();

        Self {
            profiles,
            subscriptions,
            restaurants,
            roles,
            identity,
        }
    }

    /// A signed-in owner of a restaurant with the given billing state and setup fields.
    pub(crate) fn owner(
        role: SystemRole,
        billing: BillingState,
        details: RestaurantDetails,
    ) -> Self {
        let mut collaborators = Self::strict();
        let restaurant = RestaurantUuid::new();

        collaborators
            .profiles
            .expect_find_profile()
            .returning(move |user| {
                Ok(Some(Profile {
                    id: user,
                    restaurant: Some(restaurant),
                    role: Some(Role::system(role)),
                    is_active: true,
                }))
            });

        collaborators
            .subscriptions
            .expect_find_subscription()
            .returning(move |_| {
                Ok(Some(SubscriptionRecord {
                    state: Some(billing),
                    current_period_end: None,
                }))
            });

        collaborators
            .restaurants
            .expect_find_details()
            .returning(move |_| Ok(Some(details.clone())));

        collaborators
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        let profiles = Arc::new(self.profiles);
        let subscriptions = Arc::new(self.subscriptions);
        let restaurants = Arc::new(self.restaurants);
        let roles = Arc::new(self.roles);

        State::from_app_context(AppContext {
            resolver: AccessResolver::new(
                profiles.clone(),
                subscriptions.clone(),
                restaurants.clone(),
                roles.clone(),
                AccessConfig::default(),
            ),
            identity: Arc::new(self.identity),
            profiles,
            restaurants,
            subscriptions,
            roles,
        })
    }
}

pub(crate) fn complete_details() -> RestaurantDetails {
    RestaurantDetails {
        name: Some("Chez Maître".to_string()),
        address: Some("1 Rue de la Paix, Paris".to_string()),
        currency: Some("EUR".to_string()),
    }
}

pub(crate) fn state_with_identity(identity: MockIdentityProvider) -> Arc<State> {
    Collaborators {
        identity,
        ..Collaborators::strict()
    }
    .into_state()
}

/// Service with the given collaborators behind `route`, signed in as the test user.
pub(crate) fn signed_in_service(collaborators: Collaborators, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(collaborators.into_state()))
            .hoop(inject_session)
            .push(route),
    )
}

/// Service with the given collaborators behind `route`, without a session.
pub(crate) fn anonymous_service(collaborators: Collaborators, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(collaborators.into_state()))
            .push(route),
    )
}
