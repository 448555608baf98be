//! Navigation Handler

use std::sync::Arc;

use maitre::navigation::{NavItem, visible_items};
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{access::errors::signed_in_or_401, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NavItemResponse {
    /// Stable identifier of the entry
    pub key: String,

    /// Label to display
    pub label: String,

    /// Route the entry links to
    pub path: String,
}

impl From<&NavItem> for NavItemResponse {
    fn from(item: &NavItem) -> Self {
        NavItemResponse {
            key: item.key.to_string(),
            label: item.label.to_string(),
            path: item.path.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NavigationResponse {
    /// Entries the caller may see, in display order
    pub items: Vec<NavItemResponse>,
}

/// Navigation Handler
///
/// Returns the sidebar entries the caller's permissions allow.
#[endpoint(
    tags("access"),
    summary = "Navigation",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Visible navigation entries"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<NavigationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Some(session) = depot.session() else {
        return Err(StatusError::unauthorized().brief("Sign in required"));
    };

    let auth = state.resolve(Some(session)).await;
    let access = signed_in_or_401(&auth)?;

    Ok(Json(NavigationResponse {
        items: visible_items(&access.permissions).map(Into::into).collect(),
    }))
}
