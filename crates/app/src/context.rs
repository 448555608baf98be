//! App Context

use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::{
    access::{AccessConfig, AccessResolver},
    database::{self, DatabaseOptions},
    domain::{
        profiles::{PgProfilesService, ProfilesService},
        restaurants::{PgRestaurantsService, RestaurantsService},
        roles::{PgRolesService, RolesService},
        subscriptions::{PgSubscriptionsService, SubscriptionsService},
    },
    identity::{HttpIdentityProvider, IdentityConfig, IdentityProvider},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub profiles: Arc<dyn ProfilesService>,
    pub restaurants: Arc<dyn RestaurantsService>,
    pub subscriptions: Arc<dyn SubscriptionsService>,
    pub roles: Arc<dyn RolesService>,
    pub identity: Arc<dyn IdentityProvider>,
    pub resolver: AccessResolver,
}

impl AppContext {
    /// Connect to the database, optionally migrate it, and build the context.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating fails.
    pub async fn connect(
        database: &DatabaseOptions,
        identity: IdentityConfig,
        access: AccessConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_with(&database.url, database.max_connections)
            .await
            .map_err(AppInitError::Database)?;

        if database.migrate_on_start {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;

            info!("database migrations applied");
        }

        Ok(Self::from_pool(pool, identity, access))
    }

    /// Build application context over an existing pool.
    #[must_use]
    pub fn from_pool(pool: PgPool, identity: IdentityConfig, access: AccessConfig) -> Self {
        let profiles: Arc<dyn ProfilesService> = Arc::new(PgProfilesService::new(pool.clone()));
        let restaurants: Arc<dyn RestaurantsService> =
            Arc::new(PgRestaurantsService::new(pool.clone()));
        let subscriptions: Arc<dyn SubscriptionsService> =
            Arc::new(PgSubscriptionsService::new(pool.clone()));
        let roles: Arc<dyn RolesService> = Arc::new(PgRolesService::new(pool));

        Self {
            resolver: AccessResolver::new(
                Arc::clone(&profiles),
                Arc::clone(&subscriptions),
                Arc::clone(&restaurants),
                Arc::clone(&roles),
                access,
            ),
            identity: Arc::new(HttpIdentityProvider::new(identity)),
            profiles,
            restaurants,
            subscriptions,
            roles,
        }
    }
}
