//! Restaurant Records

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use maitre::restaurants::{RestaurantDetails, RestaurantUuid};
use sqlx::{FromRow, Row, postgres::PgRow};

/// Restaurant Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantRecord {
    /// Unique restaurant identifier.
    pub uuid: RestaurantUuid,

    /// Setup fields.
    pub details: RestaurantDetails,

    /// Creation timestamp.
    pub created_at: Timestamp,
}

impl<'r> FromRow<'r, PgRow> for RestaurantRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: RestaurantUuid::from_uuid(row.try_get("id")?),
            details: RestaurantDetails {
                name: row.try_get("name")?,
                address: row.try_get("address")?,
                currency: row.try_get("currency")?,
            },
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
