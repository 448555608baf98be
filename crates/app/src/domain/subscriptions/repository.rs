//! Subscriptions Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use maitre::restaurants::{BillingState, RestaurantUuid, SubscriptionRecord};
use sqlx::{PgPool, Postgres, Row, postgres::PgRow, query};

const FIND_SUBSCRIPTION_SQL: &str = include_str!("sql/find_subscription.sql");
const UPSERT_SUBSCRIPTION_SQL: &str = include_str!("sql/upsert_subscription.sql");

/// PostgreSQL-backed subscriptions repository.
#[derive(Debug, Clone)]
pub(crate) struct PgSubscriptionsRepository {
    pool: PgPool,
}

impl PgSubscriptionsRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_subscription(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<Option<SubscriptionRecord>, sqlx::Error> {
        query::<Postgres>(FIND_SUBSCRIPTION_SQL)
            .bind(restaurant.into_uuid())
            .fetch_optional(&self.pool)
            .await?
            .map(|row| subscription_from_row(&row))
            .transpose()
    }

    pub(crate) async fn upsert_subscription(
        &self,
        restaurant: RestaurantUuid,
        state: BillingState,
        current_period_end: Option<Timestamp>,
    ) -> Result<SubscriptionRecord, sqlx::Error> {
        let row = query::<Postgres>(UPSERT_SUBSCRIPTION_SQL)
            .bind(restaurant.into_uuid())
            .bind(state.as_str())
            .bind(current_period_end.map(SqlxTimestamp::from))
            .fetch_one(&self.pool)
            .await?;

        subscription_from_row(&row)
    }
}

fn subscription_from_row(row: &PgRow) -> Result<SubscriptionRecord, sqlx::Error> {
    let status: String = row.try_get("status")?;

    Ok(SubscriptionRecord {
        state: BillingState::parse(&status),
        current_period_end: row
            .try_get::<Option<SqlxTimestamp>, _>("current_period_end")?
            .map(SqlxTimestamp::to_jiff),
    })
}
