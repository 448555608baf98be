//! Roles service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RolesServiceError {
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for RolesServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
