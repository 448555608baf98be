//! Profiles Repository

use maitre::{profiles::NewProfile, session::UserUuid};
use sqlx::{PgPool, Postgres, query_as};

use crate::domain::profiles::{data::ProfileAssignment, records::ProfileRecord};

const FIND_PROFILE_SQL: &str = include_str!("sql/find_profile.sql");
const CREATE_PROFILE_SQL: &str = include_str!("sql/create_profile.sql");
const ASSIGN_PROFILE_SQL: &str = include_str!("sql/assign_profile.sql");

/// PostgreSQL-backed profiles repository.
#[derive(Debug, Clone)]
pub(crate) struct PgProfilesRepository {
    pool: PgPool,
}

impl PgProfilesRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_profile(
        &self,
        user: UserUuid,
    ) -> Result<Option<ProfileRecord>, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(FIND_PROFILE_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn create_profile(
        &self,
        profile: NewProfile,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(CREATE_PROFILE_SQL)
            .bind(profile.id.into_uuid())
            .bind(profile.email)
            .bind(profile.role.as_str())
            .bind(profile.is_active)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn assign_profile(
        &self,
        user: UserUuid,
        assignment: ProfileAssignment,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(ASSIGN_PROFILE_SQL)
            .bind(user.into_uuid())
            .bind(assignment.restaurant.into_uuid())
            .bind(assignment.role.as_str())
            .fetch_one(&self.pool)
            .await
    }
}
