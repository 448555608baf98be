//! Roles service.

use async_trait::async_trait;
use maitre::{restaurants::RestaurantUuid, roles::RoleUuid};
use mockall::automock;
use sqlx::PgPool;

use crate::domain::roles::{errors::RolesServiceError, repository::PgRolesRepository};

#[derive(Debug, Clone)]
pub struct PgRolesService {
    repository: PgRolesRepository,
}

impl PgRolesService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgRolesRepository::new(pool),
        }
    }
}

#[async_trait]
impl RolesService for PgRolesService {
    async fn custom_role_permissions(
        &self,
        restaurant: RestaurantUuid,
        role: RoleUuid,
    ) -> Result<Vec<String>, RolesServiceError> {
        self.repository
            .list_role_permissions(restaurant, role)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// Custom role lookups.
pub trait RolesService: Send + Sync {
    /// Raw permission strings assigned to a custom role of `restaurant`.
    ///
    /// A role belonging to another restaurant has no permissions here.
    async fn custom_role_permissions(
        &self,
        restaurant: RestaurantUuid,
        role: RoleUuid,
    ) -> Result<Vec<String>, RolesServiceError>;
}
