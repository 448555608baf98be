//! Me Handler

use std::sync::Arc;

use jiff::Timestamp;
use maitre::{restaurants::SetupStatus, roles::Role, state::ResolvedAccess};
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{access::errors::signed_in_or_401, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MeResponse {
    /// The signed-in user's id
    pub user: Uuid,

    /// The signed-in user's email address
    pub email: String,

    /// The restaurant the user belongs to
    pub restaurant: Option<Uuid>,

    /// Display name of the user's role
    pub role: Option<String>,

    /// Whether the role is a built-in `system` role or a `custom` one
    pub role_kind: Option<String>,

    /// Whether the restaurant's subscription is active
    pub subscription_active: bool,

    /// One of `complete`, `incomplete`, `no_tenant`, `error`
    pub setup: String,

    /// Permissions granted by the role, sorted
    pub permissions: Vec<String>,

    /// When this answer was resolved
    pub resolved_at: String,
}

impl MeResponse {
    fn new(access: &ResolvedAccess, resolved_at: Timestamp) -> Self {
        let role = access.profile.role.as_ref();

        MeResponse {
            user: access.session.user.into_uuid(),
            email: access.session.email.clone(),
            restaurant: access.profile.restaurant.map(Into::into),
            role: role.map(|role| role.display_name().to_string()),
            role_kind: role.map(|role| {
                match role {
                    Role::System { .. } => "system",
                    Role::Custom { .. } => "custom",
                }
                .to_string()
            }),
            subscription_active: access.subscription.is_active(),
            setup: match access.setup {
                SetupStatus::Complete => "complete",
                SetupStatus::Incomplete => "incomplete",
                SetupStatus::NoTenant => "no_tenant",
                SetupStatus::Error { .. } => "error",
            }
            .to_string(),
            permissions: access
                .permissions
                .to_sorted_vec()
                .into_iter()
                .map(|permission| permission.to_string())
                .collect(),
            resolved_at: resolved_at.to_string(),
        }
    }
}

/// Me Handler
///
/// Returns the caller's resolved role, permissions and tenant status.
#[endpoint(
    tags("access"),
    summary = "Current Access",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Resolved access"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<MeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Some(session) = depot.session() else {
        return Err(StatusError::unauthorized().brief("Sign in required"));
    };

    let auth = state.resolve(Some(session)).await;
    let access = signed_in_or_401(&auth)?;

    Ok(Json(MeResponse::new(access, Timestamp::now())))
}

#[cfg(test)]
mod tests {
    use maitre::{restaurants::BillingState, roles::SystemRole};
    use maitre_app::domain::profiles::ProfilesServiceError;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{
        Collaborators, TEST_USER_UUID, anonymous_service, complete_details, signed_in_service,
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("me").get(handler)
    }

    #[tokio::test]
    async fn test_me_without_session_returns_401() -> TestResult {
        let res = TestClient::get("http://example.com/me")
            .send(&anonymous_service(Collaborators::strict(), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_me_returns_resolved_access() -> TestResult {
        let collaborators =
            Collaborators::owner(SystemRole::Admin, BillingState::Active, complete_details());

        let response: MeResponse = TestClient::get("http://example.com/me")
            .send(&signed_in_service(collaborators, route()))
            .await
            .take_json()
            .await?;

        assert_eq!(response.user, TEST_USER_UUID.into_uuid());
        assert_eq!(response.role.as_deref(), Some("Administrator"));
        assert_eq!(response.role_kind.as_deref(), Some("system"));
        assert!(response.subscription_active);
        assert_eq!(response.setup, "complete");
        assert!(response.permissions.contains(&"users.manage".to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn test_me_with_failing_profile_lookup_returns_401() -> TestResult {
        let mut collaborators = Collaborators::strict();

        collaborators
            .profiles
            .expect_find_profile()
            .once()
            .return_once(|_| Err(ProfilesServiceError::InvalidData));

        let res = TestClient::get("http://example.com/me")
            .send(&signed_in_service(collaborators, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
