//! Roles Repository

use maitre::{restaurants::RestaurantUuid, roles::RoleUuid};
use sqlx::{PgPool, Postgres, query_scalar};

const LIST_ROLE_PERMISSIONS_SQL: &str = include_str!("sql/list_role_permissions.sql");

/// PostgreSQL-backed custom role repository.
#[derive(Debug, Clone)]
pub(crate) struct PgRolesRepository {
    pool: PgPool,
}

impl PgRolesRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn list_role_permissions(
        &self,
        restaurant: RestaurantUuid,
        role: RoleUuid,
    ) -> Result<Vec<String>, sqlx::Error> {
        query_scalar::<Postgres, String>(LIST_ROLE_PERMISSIONS_SQL)
            .bind(role.into_uuid())
            .bind(restaurant.into_uuid())
            .fetch_all(&self.pool)
            .await
    }
}
