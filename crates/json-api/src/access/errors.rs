//! Access Errors

use maitre::state::AuthState;
use maitre_app::identity::IdentityError;
use salvo::http::StatusError;
use tracing::error;

use maitre::state::ResolvedAccess;

/// The resolved access of a signed-in caller, or 401.
pub(crate) fn signed_in_or_401(state: &AuthState) -> Result<&ResolvedAccess, StatusError> {
    state
        .access()
        .ok_or_else(|| StatusError::unauthorized().brief("Sign in required"))
}

pub(crate) fn identity_status_error(error: IdentityError) -> StatusError {
    match error {
        IdentityError::Http(source) => {
            error!("identity provider unreachable: {source}");

            StatusError::bad_gateway()
        }
        IdentityError::UnexpectedResponse(message) => {
            error!("identity provider rejected request: {message}");

            StatusError::bad_gateway()
        }
    }
}
