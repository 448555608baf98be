//! Profile Records

use maitre::{
    profiles::Profile,
    restaurants::RestaurantUuid,
    roles::{Role, RoleUuid},
    session::UserUuid,
};
use sqlx::{FromRow, Row, postgres::PgRow};
use uuid::Uuid;

/// Profile row as stored. The three role columns are collapsed into a single
/// [`Role`] when converted into a [`Profile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub id: UserUuid,
    pub restaurant: Option<RestaurantUuid>,
    pub role: Option<String>,
    pub role_id: Option<RoleUuid>,
    pub role_name_text: Option<String>,
    pub is_active: bool,
}

impl From<ProfileRecord> for Profile {
    fn from(record: ProfileRecord) -> Self {
        let role = Role::from_columns(
            record.role.as_deref(),
            record.role_id,
            record.role_name_text.as_deref(),
        );

        Self {
            id: record.id,
            restaurant: record.restaurant,
            role,
            is_active: record.is_active,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for ProfileRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: UserUuid::from_uuid(row.try_get("id")?),
            restaurant: row
                .try_get::<Option<Uuid>, _>("restaurant_id")?
                .map(RestaurantUuid::from_uuid),
            role: row.try_get("role")?,
            role_id: row
                .try_get::<Option<Uuid>, _>("role_id")?
                .map(RoleUuid::from_uuid),
            role_name_text: row.try_get("role_name_text")?,
            is_active: row.try_get("is_active")?,
        })
    }
}
