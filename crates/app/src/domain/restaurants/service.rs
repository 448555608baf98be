//! Restaurants service.

use async_trait::async_trait;
use maitre::restaurants::{RestaurantDetails, RestaurantUuid};
use mockall::automock;
use sqlx::PgPool;

use crate::domain::restaurants::{
    data::NewRestaurant, errors::RestaurantsServiceError, records::RestaurantRecord,
    repository::PgRestaurantsRepository,
};

#[derive(Debug, Clone)]
pub struct PgRestaurantsService {
    repository: PgRestaurantsRepository,
}

impl PgRestaurantsService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgRestaurantsRepository::new(pool),
        }
    }
}

#[async_trait]
impl RestaurantsService for PgRestaurantsService {
    async fn find_details(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<Option<RestaurantDetails>, RestaurantsServiceError> {
        self.repository
            .find_restaurant(restaurant)
            .await
            .map(|record| record.map(|record| record.details))
            .map_err(Into::into)
    }

    async fn create_restaurant(
        &self,
        restaurant: NewRestaurant,
    ) -> Result<RestaurantRecord, RestaurantsServiceError> {
        self.repository
            .create_restaurant(restaurant)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// Restaurant persistence operations.
pub trait RestaurantsService: Send + Sync {
    /// Fetch the setup fields of a restaurant, `None` when the row does not exist.
    async fn find_details(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<Option<RestaurantDetails>, RestaurantsServiceError>;

    /// Creates a new restaurant.
    async fn create_restaurant(
        &self,
        restaurant: NewRestaurant,
    ) -> Result<RestaurantRecord, RestaurantsServiceError>;
}
