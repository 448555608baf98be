//! Throwaway PostgreSQL databases for repository and service tests.

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};

use maitre::{
    restaurants::{RestaurantDetails, RestaurantUuid},
    roles::RoleUuid,
};

use crate::{
    database,
    domain::restaurants::{PgRestaurantsService, RestaurantsService, data::NewRestaurant},
};

const USER: &str = "maitre_test";
const PASSWORD: &str = "maitre_test_password";

/// Database names are interpolated into DDL, so only plain identifiers are accepted.
fn validate_database_name(name: &str) -> Result<(), String> {
    if name.is_empty() || name.len() > 63 {
        return Err("database name must be 1-63 characters long".to_string());
    }

    if !name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        return Err("database name must start with a letter or underscore".to_string());
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err("database name may only contain letters, digits and underscores".to_string());
    }

    Ok(())
}

async fn init_postgres_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(USER)
        .with_password(PASSWORD)
        .with_db_name(USER)
        .with_tag("17-alpine")
        .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
        .start()
        .await
        .expect("failed to start PostgreSQL container")
}

/// One container shared by every test in the binary.
static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

/// Names of databases waiting to be dropped.
static CLEANUP_SENDER: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

async fn init_cleanup_task() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(name) = receiver.recv().await {
            if let Err(error) = drop_database(&name).await {
                eprintln!("failed to drop test database '{name}': {error}");
            }
        }
    });

    sender
}

async fn server_url(database: &str) -> String {
    let container = POSTGRES_CONTAINER
        .get_or_init(init_postgres_container)
        .await;

    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("failed to read container port");

    let host = env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

    format!("postgresql://{USER}:{PASSWORD}@{host}:{port}/{database}")
}

async fn drop_database(name: &str) -> Result<(), sqlx::Error> {
    if POSTGRES_CONTAINER.get().is_none() || validate_database_name(name).is_err() {
        return Ok(());
    }

    let mut conn = PgConnection::connect(&server_url("postgres").await).await?;

    sqlx::query(&format!("DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE)"))
        .execute(&mut conn)
        .await?;

    conn.close().await
}

/// A freshly migrated database of its own, dropped again when the value goes away.
#[derive(Debug)]
pub(crate) struct TestDb {
    pool: PgPool,
    name: String,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(sender) = CLEANUP_SENDER.get() {
            let _ = sender.send(self.name.clone());
        }
    }
}

impl TestDb {
    pub(crate) async fn new() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before epoch")
            .as_nanos();

        let thread = format!("{:?}", std::thread::current().id())
            .replace(|c: char| !c.is_ascii_alphanumeric(), "");

        let name = format!("maitre_test_{nanos}_{thread}");

        validate_database_name(&name).expect("generated database name is valid");

        CLEANUP_SENDER.get_or_init(init_cleanup_task).await;

        let mut admin = PgConnection::connect(&server_url("postgres").await)
            .await
            .expect("failed to connect to the maintenance database");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut admin)
            .await
            .expect("failed to create test database");

        admin.close().await.expect("failed to close admin connection");

        let pool = PgPool::connect(&server_url(&name).await)
            .await
            .expect("failed to connect to test database");

        database::migrate(&pool)
            .await
            .expect("failed to apply migrations");

        Self { pool, name }
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert a restaurant with the given setup fields.
    pub(crate) async fn create_restaurant(&self, details: RestaurantDetails) -> RestaurantUuid {
        let uuid = RestaurantUuid::new();

        PgRestaurantsService::new(self.pool.clone())
            .create_restaurant(NewRestaurant { uuid, details })
            .await
            .expect("failed to create test restaurant");

        uuid
    }

    /// Insert a custom role of `restaurant` holding `permissions`.
    pub(crate) async fn create_custom_role(
        &self,
        restaurant: RestaurantUuid,
        permissions: &[&str],
    ) -> RoleUuid {
        let role = RoleUuid::new();

        sqlx::query("INSERT INTO custom_roles (id, restaurant_id, name) VALUES ($1, $2, $3)")
            .bind(role.into_uuid())
            .bind(restaurant.into_uuid())
            .bind("Sommelier")
            .execute(&self.pool)
            .await
            .expect("failed to create custom role");

        for permission in permissions {
            sqlx::query("INSERT INTO custom_role_permissions (role_id, permission) VALUES ($1, $2)")
                .bind(role.into_uuid())
                .bind(*permission)
                .execute(&self.pool)
                .await
                .expect("failed to grant custom role permission");
        }

        role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_database_name_accepts_generated_names() {
        assert!(validate_database_name("maitre_test_1700000000_ThreadId12").is_ok());
        assert!(validate_database_name("_scratch").is_ok());
    }

    #[test]
    fn validate_database_name_rejects_unsafe_names() {
        assert!(validate_database_name("").is_err());
        assert!(validate_database_name(&"a".repeat(64)).is_err());
        assert!(validate_database_name("1st").is_err());
        assert!(validate_database_name("drop\"table").is_err());
        assert!(validate_database_name("with-hyphen").is_err());
    }

    #[tokio::test]
    async fn migrations_create_the_access_schema() {
        let db = TestDb::new().await;

        let tables: i64 = sqlx::query_scalar(
            "SELECT count(*) FROM information_schema.tables
             WHERE table_schema = 'public'
               AND table_name IN ('restaurants', 'custom_roles', 'custom_role_permissions',
                                  'profiles', 'subscriptions')",
        )
        .fetch_one(db.pool())
        .await
        .expect("failed to count tables");

        assert_eq!(tables, 5);
    }
}
