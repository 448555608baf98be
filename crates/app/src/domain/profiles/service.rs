//! Profiles service.

use async_trait::async_trait;
use maitre::{
    profiles::{NewProfile, Profile},
    session::UserUuid,
};
use mockall::automock;
use sqlx::PgPool;

use crate::domain::profiles::{
    data::ProfileAssignment, errors::ProfilesServiceError, repository::PgProfilesRepository,
};

#[derive(Debug, Clone)]
pub struct PgProfilesService {
    repository: PgProfilesRepository,
}

impl PgProfilesService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgProfilesRepository::new(pool),
        }
    }
}

#[async_trait]
impl ProfilesService for PgProfilesService {
    async fn find_profile(&self, user: UserUuid) -> Result<Option<Profile>, ProfilesServiceError> {
        self.repository
            .find_profile(user)
            .await
            .map(|record| record.map(Profile::from))
            .map_err(Into::into)
    }

    async fn create_profile(&self, profile: NewProfile) -> Result<Profile, ProfilesServiceError> {
        self.repository
            .create_profile(profile)
            .await
            .map(Profile::from)
            .map_err(Into::into)
    }

    async fn assign_profile(
        &self,
        user: UserUuid,
        assignment: ProfileAssignment,
    ) -> Result<Profile, ProfilesServiceError> {
        self.repository
            .assign_profile(user, assignment)
            .await
            .map(Profile::from)
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// Profile persistence operations.
pub trait ProfilesService: Send + Sync {
    /// Fetch a user's profile, `None` when it has never been provisioned.
    async fn find_profile(&self, user: UserUuid) -> Result<Option<Profile>, ProfilesServiceError>;

    /// Insert a new profile.
    async fn create_profile(&self, profile: NewProfile) -> Result<Profile, ProfilesServiceError>;

    /// Move a user into a restaurant with a system role.
    async fn assign_profile(
        &self,
        user: UserUuid,
        assignment: ProfileAssignment,
    ) -> Result<Profile, ProfilesServiceError>;
}
