//! Subscriptions service.

use async_trait::async_trait;
use jiff::Timestamp;
use maitre::restaurants::{BillingState, RestaurantUuid, SubscriptionRecord};
use mockall::automock;
use sqlx::PgPool;

use crate::domain::subscriptions::{
    errors::SubscriptionsServiceError, repository::PgSubscriptionsRepository,
};

#[derive(Debug, Clone)]
pub struct PgSubscriptionsService {
    repository: PgSubscriptionsRepository,
}

impl PgSubscriptionsService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgSubscriptionsRepository::new(pool),
        }
    }
}

#[async_trait]
impl SubscriptionsService for PgSubscriptionsService {
    async fn find_subscription(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<Option<SubscriptionRecord>, SubscriptionsServiceError> {
        self.repository
            .find_subscription(restaurant)
            .await
            .map_err(Into::into)
    }

    async fn set_subscription(
        &self,
        restaurant: RestaurantUuid,
        state: BillingState,
        current_period_end: Option<Timestamp>,
    ) -> Result<SubscriptionRecord, SubscriptionsServiceError> {
        self.repository
            .upsert_subscription(restaurant, state, current_period_end)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// Subscription persistence operations.
pub trait SubscriptionsService: Send + Sync {
    /// Fetch a restaurant's billing record, `None` when it never subscribed.
    async fn find_subscription(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<Option<SubscriptionRecord>, SubscriptionsServiceError>;

    /// Record the billing state reported by the payment provider.
    async fn set_subscription(
        &self,
        restaurant: RestaurantUuid,
        state: BillingState,
        current_period_end: Option<Timestamp>,
    ) -> Result<SubscriptionRecord, SubscriptionsServiceError>;
}
