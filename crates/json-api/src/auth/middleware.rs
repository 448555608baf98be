//! Session middleware.

use std::sync::Arc;

use maitre::session::AccessToken;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tokio::time::timeout;
use tracing::warn;

use crate::{extensions::*, state::State};

/// Resolve the bearer token, if any, into a session stored in the depot.
///
/// A missing, unknown or unverifiable token leaves the request without a session; the
/// gates then treat the caller as signed out.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req).map(AccessToken::new) else {
        ctrl.call_next(req, depot, res).await;

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let after = state.app.resolver.config().fetch_timeout;

    match timeout(after, state.app.identity.get_session(&token)).await {
        Ok(Ok(Some(session))) => depot.insert_session(session),
        Ok(Ok(None)) => {}
        Ok(Err(source)) => {
            warn!("session lookup failed; continuing signed out: {source}");
        }
        Err(_elapsed) => {
            warn!(?after, "session lookup timed out; continuing signed out");
        }
    }

    depot.insert_access_token(token);

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
