//! Access resolver.
//!
//! Every failure is mapped to a fail-closed value in exactly one place:
//!
//! | failing step                  | resolves to                   |
//! |-------------------------------|-------------------------------|
//! | profile lookup or provision   | [`AuthState::SignedOut`]      |
//! | subscription lookup           | [`SubscriptionStatus::Inactive`] |
//! | restaurant lookup             | [`SetupStatus::Error`]        |
//! | custom role permissions       | empty [`PermissionSet`]       |

use std::{future::Future, sync::Arc};

use jiff::Timestamp;
use maitre::{
    permissions::{Permission, PermissionSet},
    profiles::{NewProfile, Profile},
    restaurants::{RestaurantUuid, SetupStatus, SubscriptionStatus},
    roles::{Role, RoleUuid},
    session::Session,
    state::{AuthState, ResolvedAccess},
};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::{
    access::{AccessConfig, ResolveError, Stage},
    domain::{
        profiles::ProfilesService, restaurants::RestaurantsService, roles::RolesService,
        subscriptions::SubscriptionsService,
    },
};

/// Message shown when the restaurant setup check itself fails.
pub const SETUP_ERROR_MESSAGE: &str =
    "We couldn't check your restaurant setup. Please try again in a moment.";

/// Resolves sessions into [`AuthState`] values against the collaborator services.
#[derive(Clone)]
pub struct AccessResolver {
    profiles: Arc<dyn ProfilesService>,
    subscriptions: Arc<dyn SubscriptionsService>,
    restaurants: Arc<dyn RestaurantsService>,
    roles: Arc<dyn RolesService>,
    config: AccessConfig,
}

impl AccessResolver {
    /// Build a resolver over the collaborator services.
    #[must_use]
    pub fn new(
        profiles: Arc<dyn ProfilesService>,
        subscriptions: Arc<dyn SubscriptionsService>,
        restaurants: Arc<dyn RestaurantsService>,
        roles: Arc<dyn RolesService>,
        config: AccessConfig,
    ) -> Self {
        Self {
            profiles,
            subscriptions,
            restaurants,
            roles,
            config,
        }
    }

    /// Timeout and gate paths this resolver was built with.
    #[must_use]
    pub fn config(&self) -> &AccessConfig {
        &self.config
    }

    /// Resolve a session into the state the gates read.
    ///
    /// Never fails: every collaborator error is converted to its fail-closed value. Without
    /// a session no collaborator is called at all.
    pub async fn resolve(&self, session: Option<Session>) -> AuthState {
        let Some(session) = session else {
            return AuthState::SignedOut;
        };

        let profile = match self.resolve_profile(&session).await {
            Ok(profile) => profile,
            Err(error) => {
                warn!(
                    user = %session.user,
                    stage = %error.stage(),
                    error = %error,
                    "profile resolution failed; treating as signed out"
                );

                return AuthState::SignedOut;
            }
        };

        let now = Timestamp::now();

        let (subscription, setup, permissions) = tokio::join!(
            self.check_subscription(profile.restaurant, now),
            self.check_setup(profile.restaurant),
            self.evaluate_permissions(profile.restaurant, profile.role.as_ref()),
        );

        debug!(
            user = %session.user,
            restaurant = ?profile.restaurant,
            subscription = ?subscription,
            setup = ?setup,
            "resolved access"
        );

        AuthState::SignedIn(Box::new(ResolvedAccess {
            session,
            profile,
            subscription,
            setup,
            permissions,
        }))
    }

    async fn resolve_profile(&self, session: &Session) -> Result<Profile, ResolveError> {
        if session.user.into_uuid().is_nil() {
            return Err(ResolveError::MissingUser);
        }

        let existing = self
            .bounded(Stage::Profile, self.profiles.find_profile(session.user))
            .await?
            .map_err(ResolveError::Profile)?;

        let profile = match existing {
            Some(profile) => profile,
            None => {
                debug!(user = %session.user, "provisioning default profile");

                let new_profile = NewProfile::provision(session.user, session.email.clone());

                self.bounded(Stage::Provision, self.profiles.create_profile(new_profile))
                    .await?
                    .map_err(ResolveError::Provision)?
            }
        };

        if !profile.is_active {
            return Err(ResolveError::Deactivated);
        }

        Ok(profile)
    }

    async fn check_subscription(
        &self,
        restaurant: Option<RestaurantUuid>,
        now: Timestamp,
    ) -> SubscriptionStatus {
        let Some(restaurant) = restaurant else {
            return SubscriptionStatus::Inactive;
        };

        let record = self
            .bounded(
                Stage::Subscription,
                self.subscriptions.find_subscription(restaurant),
            )
            .await
            .and_then(|result| result.map_err(ResolveError::Subscription));

        match record {
            Ok(record) => SubscriptionStatus::from_record(record.as_ref(), now),
            Err(error) => {
                warn!(
                    restaurant = %restaurant,
                    error = %error,
                    "subscription check failed; treating as inactive"
                );

                SubscriptionStatus::Inactive
            }
        }
    }

    async fn check_setup(&self, restaurant: Option<RestaurantUuid>) -> SetupStatus {
        let Some(restaurant) = restaurant else {
            return SetupStatus::NoTenant;
        };

        let details = self
            .bounded(Stage::Setup, self.restaurants.find_details(restaurant))
            .await
            .and_then(|result| result.map_err(ResolveError::Setup));

        match details {
            Ok(details) => SetupStatus::from_details(details.as_ref()),
            Err(error) => {
                warn!(
                    restaurant = %restaurant,
                    error = %error,
                    "setup check failed"
                );

                SetupStatus::Error {
                    message: SETUP_ERROR_MESSAGE.to_string(),
                }
            }
        }
    }

    async fn evaluate_permissions(
        &self,
        restaurant: Option<RestaurantUuid>,
        role: Option<&Role>,
    ) -> PermissionSet {
        match (restaurant, role) {
            (_, None) | (None, Some(Role::Custom { .. })) => PermissionSet::empty(),
            (_, Some(Role::System { role })) => PermissionSet::for_system_role(*role),
            (Some(restaurant), Some(Role::Custom { id, .. })) => {
                let names = self
                    .bounded(
                        Stage::Permissions,
                        self.roles.custom_role_permissions(restaurant, *id),
                    )
                    .await
                    .and_then(|result| result.map_err(ResolveError::Permissions));

                match names {
                    Ok(names) => parse_permissions(*id, &names),
                    Err(error) => {
                        warn!(
                            role = %id,
                            error = %error,
                            "custom role lookup failed; granting no permissions"
                        );

                        PermissionSet::empty()
                    }
                }
            }
        }
    }

    async fn bounded<T>(
        &self,
        stage: Stage,
        future: impl Future<Output = T>,
    ) -> Result<T, ResolveError> {
        let after = self.config.fetch_timeout;

        timeout(after, future)
            .await
            .map_err(|_elapsed| ResolveError::TimedOut { stage, after })
    }
}

fn parse_permissions(role: RoleUuid, names: &[String]) -> PermissionSet {
    names
        .iter()
        .filter_map(|name| match name.parse::<Permission>() {
            Ok(permission) => Some(permission),
            Err(error) => {
                warn!(role = %role, error = %error, "ignoring unknown permission");

                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use jiff::SignedDuration;
    use maitre::{
        gate::{GateDecision, GatePaths, GateRequest, Location, decide},
        navigation::visible_items,
        restaurants::{BillingState, RestaurantDetails, SubscriptionRecord},
        roles::SystemRole,
        session::UserUuid,
    };
    use mockall::predicate::eq;
    use testresult::TestResult;

    use crate::{
        domain::{
            profiles::{MockProfilesService, ProfilesServiceError},
            restaurants::{MockRestaurantsService, RestaurantsServiceError},
            roles::{MockRolesService, RolesServiceError},
            subscriptions::{MockSubscriptionsService, SubscriptionsServiceError},
        },
        test::{PendingProfilesService, complete_details, profile, session},
    };

    use super::*;

    struct Mocks {
        profiles: MockProfilesService,
        subscriptions: MockSubscriptionsService,
        restaurants: MockRestaurantsService,
        roles: MockRolesService,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                profiles: MockProfilesService::new(),
                subscriptions: MockSubscriptionsService::new(),
                restaurants: MockRestaurantsService::new(),
                roles: MockRolesService::new(),
            }
        }

        fn into_resolver(self) -> AccessResolver {
            AccessResolver::new(
                Arc::new(self.profiles),
                Arc::new(self.subscriptions),
                Arc::new(self.restaurants),
                Arc::new(self.roles),
                AccessConfig::default(),
            )
        }
    }

    fn active_record() -> SubscriptionRecord {
        SubscriptionRecord {
            state: Some(BillingState::Active),
            current_period_end: Some(Timestamp::now() + SignedDuration::from_hours(24 * 30)),
        }
    }

    fn canceled_record() -> SubscriptionRecord {
        SubscriptionRecord {
            state: Some(BillingState::Canceled),
            current_period_end: None,
        }
    }

    fn expect_profile(mocks: &mut Mocks, profile: Profile) {
        let user = profile.id;

        mocks
            .profiles
            .expect_find_profile()
            .once()
            .with(eq(user))
            .return_once(move |_| Ok(Some(profile)));
    }

    fn expect_subscription(mocks: &mut Mocks, restaurant: RestaurantUuid, record: SubscriptionRecord) {
        mocks
            .subscriptions
            .expect_find_subscription()
            .once()
            .with(eq(restaurant))
            .return_once(move |_| Ok(Some(record)));
    }

    fn expect_details(mocks: &mut Mocks, restaurant: RestaurantUuid, details: RestaurantDetails) {
        mocks
            .restaurants
            .expect_find_details()
            .once()
            .with(eq(restaurant))
            .return_once(move |_| Ok(Some(details)));
    }

    fn gate(href: &str) -> TestResult<GateRequest> {
        Ok(GateRequest::new(Location::parse(href)?))
    }

    #[tokio::test]
    async fn no_session_resolves_signed_out_without_lookups() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.profiles.expect_find_profile().never();
        mocks.profiles.expect_create_profile().never();
        mocks.subscriptions.expect_find_subscription().never();
        mocks.restaurants.expect_find_details().never();
        mocks.roles.expect_custom_role_permissions().never();

        let resolver = mocks.into_resolver();
        let state = resolver.resolve(None).await;

        assert_eq!(state, AuthState::SignedOut);
        assert_eq!(
            decide(&state, &gate("/dashboard")?, &GatePaths::default()),
            GateDecision::RedirectToSignIn {
                to: "/auth".to_string(),
                return_to: Location::parse("/dashboard")?,
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn missing_profile_is_provisioned_with_default_role() -> TestResult {
        let session = session();
        let user = session.user;
        let mut mocks = Mocks::new();

        mocks
            .profiles
            .expect_find_profile()
            .once()
            .with(eq(user))
            .return_once(|_| Ok(None));

        mocks
            .profiles
            .expect_create_profile()
            .once()
            .withf(move |new_profile| {
                new_profile.id == user
                    && new_profile.role == SystemRole::Staff
                    && new_profile.is_active
                    && new_profile.email == "host@example.com"
            })
            .return_once(move |new_profile| {
                Ok(Profile {
                    id: new_profile.id,
                    restaurant: None,
                    role: Some(Role::system(new_profile.role)),
                    is_active: true,
                })
            });

        let state = mocks.into_resolver().resolve(Some(session)).await;
        let access = state.access().ok_or("expected a signed-in state")?;

        assert_eq!(access.profile.role, Some(Role::system(SystemRole::Staff)));
        assert_eq!(access.setup, SetupStatus::NoTenant);
        assert_eq!(access.subscription, SubscriptionStatus::Inactive);

        Ok(())
    }

    #[tokio::test]
    async fn profile_fetch_error_fails_closed() {
        let mut mocks = Mocks::new();

        mocks
            .profiles
            .expect_find_profile()
            .once()
            .return_once(|_| Err(ProfilesServiceError::Sql(sqlx::Error::PoolTimedOut)));
        mocks.profiles.expect_create_profile().never();

        let state = mocks.into_resolver().resolve(Some(session())).await;

        assert_eq!(state, AuthState::SignedOut);
    }

    #[tokio::test]
    async fn provisioning_error_fails_closed() {
        let mut mocks = Mocks::new();

        mocks
            .profiles
            .expect_find_profile()
            .once()
            .return_once(|_| Ok(None));
        mocks
            .profiles
            .expect_create_profile()
            .once()
            .return_once(|_| Err(ProfilesServiceError::AlreadyExists));

        let state = mocks.into_resolver().resolve(Some(session())).await;

        assert_eq!(state, AuthState::SignedOut);
    }

    #[tokio::test]
    async fn deactivated_profile_resolves_signed_out() {
        let session = session();
        let mut mocks = Mocks::new();
        let mut deactivated = profile(session.user, Some(RestaurantUuid::new()), SystemRole::Owner);

        deactivated.is_active = false;

        expect_profile(&mut mocks, deactivated);
        mocks.subscriptions.expect_find_subscription().never();
        mocks.restaurants.expect_find_details().never();

        let state = mocks.into_resolver().resolve(Some(session)).await;

        assert_eq!(state, AuthState::SignedOut);
    }

    #[tokio::test]
    async fn nil_user_id_resolves_signed_out_without_lookups() {
        let mut mocks = Mocks::new();
        let mut session = session();

        session.user = UserUuid::from_uuid(uuid::Uuid::nil());
        mocks.profiles.expect_find_profile().never();

        let state = mocks.into_resolver().resolve(Some(session)).await;

        assert_eq!(state, AuthState::SignedOut);
    }

    #[tokio::test]
    async fn profile_without_restaurant_skips_tenant_lookups() -> TestResult {
        let session = session();
        let mut mocks = Mocks::new();

        expect_profile(&mut mocks, profile(session.user, None, SystemRole::Owner));
        mocks.subscriptions.expect_find_subscription().never();
        mocks.restaurants.expect_find_details().never();

        let state = mocks.into_resolver().resolve(Some(session)).await;
        let access = state.access().ok_or("expected a signed-in state")?;

        assert_eq!(access.subscription, SubscriptionStatus::Inactive);
        assert_eq!(access.setup, SetupStatus::NoTenant);

        Ok(())
    }

    #[tokio::test]
    async fn subscription_error_resolves_inactive() -> TestResult {
        let session = session();
        let restaurant = RestaurantUuid::new();
        let mut mocks = Mocks::new();

        expect_profile(&mut mocks, profile(session.user, Some(restaurant), SystemRole::Owner));
        mocks
            .subscriptions
            .expect_find_subscription()
            .once()
            .return_once(|_| Err(SubscriptionsServiceError::Sql(sqlx::Error::PoolTimedOut)));
        expect_details(&mut mocks, restaurant, complete_details());

        let state = mocks.into_resolver().resolve(Some(session)).await;

        assert_eq!(
            decide(&state, &gate("/orders")?, &GatePaths::default()),
            GateDecision::Paywall
        );

        Ok(())
    }

    #[tokio::test]
    async fn setup_error_is_distinct_from_incomplete() -> TestResult {
        let session = session();
        let restaurant = RestaurantUuid::new();
        let mut mocks = Mocks::new();

        expect_profile(&mut mocks, profile(session.user, Some(restaurant), SystemRole::Owner));
        expect_subscription(&mut mocks, restaurant, active_record());
        mocks
            .restaurants
            .expect_find_details()
            .once()
            .return_once(|_| Err(RestaurantsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let state = mocks.into_resolver().resolve(Some(session)).await;

        assert_eq!(
            decide(&state, &gate("/menu")?, &GatePaths::default()),
            GateDecision::SetupError {
                message: SETUP_ERROR_MESSAGE.to_string()
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn custom_role_permissions_are_fetched_and_parsed() -> TestResult {
        let session = session();
        let restaurant = RestaurantUuid::new();
        let role = RoleUuid::new();
        let mut mocks = Mocks::new();

        expect_profile(
            &mut mocks,
            Profile {
                id: session.user,
                restaurant: Some(restaurant),
                role: Some(Role::Custom {
                    id: role,
                    display_name: "Sommelier".to_string(),
                }),
                is_active: true,
            },
        );
        expect_subscription(&mut mocks, restaurant, active_record());
        expect_details(&mut mocks, restaurant, complete_details());
        mocks
            .roles
            .expect_custom_role_permissions()
            .once()
            .with(eq(restaurant), eq(role))
            .return_once(|_, _| {
                Ok(vec![
                    "menu.view".to_string(),
                    "inventory.view".to_string(),
                    "wine.pour".to_string(),
                ])
            });

        let state = mocks.into_resolver().resolve(Some(session)).await;

        assert!(state.has_permission(Permission::MenuView));
        assert!(state.has_permission(Permission::InventoryView));
        assert!(!state.has_permission(Permission::UsersManage));

        Ok(())
    }

    #[tokio::test]
    async fn custom_role_lookup_error_grants_nothing() -> TestResult {
        let session = session();
        let restaurant = RestaurantUuid::new();
        let mut mocks = Mocks::new();

        expect_profile(
            &mut mocks,
            Profile {
                id: session.user,
                restaurant: Some(restaurant),
                role: Some(Role::Custom {
                    id: RoleUuid::new(),
                    display_name: "Host".to_string(),
                }),
                is_active: true,
            },
        );
        expect_subscription(&mut mocks, restaurant, active_record());
        expect_details(&mut mocks, restaurant, complete_details());
        mocks
            .roles
            .expect_custom_role_permissions()
            .once()
            .return_once(|_, _| Err(RolesServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let state = mocks.into_resolver().resolve(Some(session)).await;
        let access = state.access().ok_or("expected a signed-in state")?;

        assert!(access.permissions.is_empty());
        assert!(!state.has_any_permission(&Permission::ALL));

        Ok(())
    }

    #[tokio::test]
    async fn custom_role_without_restaurant_grants_nothing() -> TestResult {
        let session = session();
        let mut mocks = Mocks::new();

        expect_profile(
            &mut mocks,
            Profile {
                id: session.user,
                restaurant: None,
                role: Some(Role::Custom {
                    id: RoleUuid::new(),
                    display_name: "Host".to_string(),
                }),
                is_active: true,
            },
        );
        mocks.roles.expect_custom_role_permissions().never();

        let state = mocks.into_resolver().resolve(Some(session)).await;
        let access = state.access().ok_or("expected a signed-in state")?;

        assert!(access.permissions.is_empty());

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_profile_lookup_times_out_signed_out() {
        let resolver = AccessResolver::new(
            Arc::new(PendingProfilesService),
            Arc::new(MockSubscriptionsService::new()),
            Arc::new(MockRestaurantsService::new()),
            Arc::new(MockRolesService::new()),
            AccessConfig {
                fetch_timeout: Duration::from_millis(500),
                ..AccessConfig::default()
            },
        );

        let state = resolver.resolve(Some(session())).await;

        assert_eq!(state, AuthState::SignedOut);
    }

    #[tokio::test]
    async fn resolving_twice_yields_identical_decisions() -> TestResult {
        let session = session();
        let restaurant = RestaurantUuid::new();
        let user_profile = profile(session.user, Some(restaurant), SystemRole::Manager);
        let mut mocks = Mocks::new();

        mocks
            .profiles
            .expect_find_profile()
            .times(2)
            .returning(move |_| Ok(Some(user_profile.clone())));
        mocks
            .subscriptions
            .expect_find_subscription()
            .times(2)
            .returning(|_| Ok(Some(active_record())));
        mocks
            .restaurants
            .expect_find_details()
            .times(2)
            .returning(|_| Ok(Some(complete_details())));

        let resolver = mocks.into_resolver();
        let request = gate("/inventory")?;
        let paths = GatePaths::default();

        let first = resolver.resolve(Some(session.clone())).await;
        let second = resolver.resolve(Some(session)).await;

        assert_eq!(decide(&first, &request, &paths), decide(&second, &request, &paths));

        Ok(())
    }

    #[tokio::test]
    async fn scenario_inactive_subscription_renders_paywall() -> TestResult {
        let session = session();
        let restaurant = RestaurantUuid::new();
        let mut mocks = Mocks::new();

        expect_profile(&mut mocks, profile(session.user, Some(restaurant), SystemRole::Owner));
        expect_subscription(&mut mocks, restaurant, canceled_record());
        expect_details(&mut mocks, restaurant, complete_details());

        let state = mocks.into_resolver().resolve(Some(session)).await;

        assert_eq!(
            decide(&state, &gate("/dashboard")?, &GatePaths::default()),
            GateDecision::Paywall
        );

        Ok(())
    }

    #[tokio::test]
    async fn scenario_missing_address_redirects_to_setup() -> TestResult {
        let session = session();
        let restaurant = RestaurantUuid::new();
        let mut mocks = Mocks::new();

        expect_profile(&mut mocks, profile(session.user, Some(restaurant), SystemRole::Owner));
        expect_subscription(&mut mocks, restaurant, active_record());
        expect_details(
            &mut mocks,
            restaurant,
            RestaurantDetails {
                address: None,
                ..complete_details()
            },
        );

        let state = mocks.into_resolver().resolve(Some(session)).await;

        assert_eq!(
            decide(&state, &gate("/reservations?date=2026-03-01")?, &GatePaths::default()),
            GateDecision::RedirectToSetup {
                to: "/restaurant-setup".to_string(),
                return_to: Location::parse("/reservations?date=2026-03-01")?,
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn scenario_configured_restaurant_renders_filtered_navigation() -> TestResult {
        for (role, sees_users) in [
            (SystemRole::Waiter, false),
            (SystemRole::Manager, false),
            (SystemRole::Admin, true),
            (SystemRole::Owner, true),
        ] {
            let session = session();
            let restaurant = RestaurantUuid::new();
            let mut mocks = Mocks::new();

            expect_profile(&mut mocks, profile(session.user, Some(restaurant), role));
            expect_subscription(&mut mocks, restaurant, active_record());
            expect_details(&mut mocks, restaurant, complete_details());

            let state = mocks.into_resolver().resolve(Some(session)).await;
            let access = state.access().ok_or("expected a signed-in state")?;

            assert_eq!(
                decide(&state, &gate("/profile")?, &GatePaths::default()),
                GateDecision::Render
            );
            assert_eq!(
                visible_items(&access.permissions).any(|item| item.key == "users"),
                sees_users,
                "{role}"
            );
        }

        Ok(())
    }
}
