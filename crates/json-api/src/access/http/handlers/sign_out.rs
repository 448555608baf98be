//! Sign Out Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use crate::{access::errors::identity_status_error, extensions::*, state::State};

/// Sign Out Handler
///
/// Revokes the caller's session with the identity provider.
#[endpoint(
    tags("access"),
    summary = "Sign Out",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Session revoked"),
        (status_code = StatusCode::UNAUTHORIZED, description = "No bearer token"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Identity provider failure"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Some(token) = depot.access_token() else {
        return Err(StatusError::unauthorized().brief("Missing or invalid Authorization header"));
    };

    state
        .app
        .identity
        .sign_out(token)
        .await
        .map_err(identity_status_error)?;

    if let Some(session) = depot.session() {
        info!(user = %session.user, "signed out");
    }

    Ok(StatusCode::NO_CONTENT)
}
