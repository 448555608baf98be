//! Gate Handler

use std::sync::Arc;

use maitre::{
    gate::{GateDecision, GateRequest, Location, decide},
    navigation::item_for_path,
    permissions::{Permission, UnknownPermissionError},
};
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::{extensions::*, observability::observe_gate_decision, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct GateResponse {
    /// One of `loading`, `sign_in`, `paywall`, `setup`, `setup_error`, `forbidden`, `render`
    pub decision: String,

    /// Redirect target for `sign_in` and `setup`
    pub redirect_to: Option<String>,

    /// Location to come back to after the redirect
    pub return_to: Option<String>,

    /// Message to show for `setup_error`
    pub message: Option<String>,

    /// Permissions of which one would have been enough, for `forbidden`
    pub required_any_of: Vec<String>,
}

impl From<GateDecision> for GateResponse {
    fn from(decision: GateDecision) -> Self {
        let outcome = decision.outcome().to_string();

        let mut response = GateResponse {
            decision: outcome,
            redirect_to: None,
            return_to: None,
            message: None,
            required_any_of: Vec::new(),
        };

        match decision {
            GateDecision::RedirectToSignIn { to, return_to }
            | GateDecision::RedirectToSetup { to, return_to } => {
                response.redirect_to = Some(to);
                response.return_to = Some(return_to.to_string());
            }
            GateDecision::SetupError { message } => response.message = Some(message),
            GateDecision::Forbidden { any_of } => {
                response.required_any_of = any_of.iter().map(ToString::to_string).collect();
            }
            GateDecision::Loading | GateDecision::Paywall | GateDecision::Render => {}
        }

        response
    }
}

/// Gate Handler
///
/// Resolves the caller's access and decides what the requested route should do.
///
/// Without `require`, the route needs the permission of the navigation entry its path
/// belongs to, if any.
#[endpoint(
    tags("access"),
    summary = "Decide Route Gate",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    location: QueryParam<String, true>,
    require: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<GateResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let location =
        Location::parse(&location.into_inner()).or_400("invalid \"location\" query parameter")?;

    let any_of = match require.into_inner() {
        Some(require) => {
            parse_requirements(&require).or_400("invalid \"require\" query parameter")?
        }
        None => item_for_path(location.path())
            .and_then(|item| item.requires)
            .into_iter()
            .collect(),
    };

    let auth = state.resolve(depot.session()).await;
    let request = GateRequest::new(location).requiring(any_of);
    let decision = decide(&auth, &request, &state.app.resolver.config().paths);

    observe_gate_decision(decision.outcome());

    debug!(
        outcome = decision.outcome(),
        location = %request.location,
        "gate decision"
    );

    Ok(Json(decision.into()))
}

fn parse_requirements(value: &str) -> Result<SmallVec<[Permission; 4]>, UnknownPermissionError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::parse::<Permission>)
        .collect()
}
