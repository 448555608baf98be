//! Restaurants Repository

use maitre::restaurants::RestaurantUuid;
use sqlx::{PgPool, Postgres, query_as};

use crate::domain::restaurants::{data::NewRestaurant, records::RestaurantRecord};

const FIND_RESTAURANT_SQL: &str = include_str!("sql/find_restaurant.sql");
const CREATE_RESTAURANT_SQL: &str = include_str!("sql/create_restaurant.sql");

/// PostgreSQL-backed restaurants repository.
#[derive(Debug, Clone)]
pub(crate) struct PgRestaurantsRepository {
    pool: PgPool,
}

impl PgRestaurantsRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_restaurant(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<Option<RestaurantRecord>, sqlx::Error> {
        query_as::<Postgres, RestaurantRecord>(FIND_RESTAURANT_SQL)
            .bind(restaurant.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn create_restaurant(
        &self,
        restaurant: NewRestaurant,
    ) -> Result<RestaurantRecord, sqlx::Error> {
        let NewRestaurant { uuid, details } = restaurant;

        query_as::<Postgres, RestaurantRecord>(CREATE_RESTAURANT_SQL)
            .bind(uuid.into_uuid())
            .bind(details.name)
            .bind(details.address)
            .bind(details.currency)
            .fetch_one(&self.pool)
            .await
    }
}
