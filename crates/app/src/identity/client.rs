//! HTTP identity provider client.

use async_trait::async_trait;
use maitre::session::{AccessToken, Session, UserUuid};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use uuid::Uuid;

use crate::identity::{IdentityError, IdentityProvider};

/// Configuration for connecting to the hosted identity provider.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Provider base address, e.g. `"https://project.example.co"`.
    pub url: String,

    /// Public API key sent with every request.
    pub api_key: String,
}

/// HTTP client for a GoTrue-compatible identity provider.
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    config: IdentityConfig,
    http: Client,
}

impl HttpIdentityProvider {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.config.url.trim_end_matches('/'))
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn get_session(&self, token: &AccessToken) -> Result<Option<Session>, IdentityError> {
        let response = self
            .http
            .get(self.endpoint("user"))
            .header("apikey", &self.config.api_key)
            .bearer_auth(token.expose())
            .send()
            .await?;

        let status = response.status();

        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Ok(None);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(IdentityError::UnexpectedResponse(format!(
                "user request failed with status {status}: {text}"
            )));
        }

        let user: UserResponse = response.json().await?;

        Ok(Some(Session {
            user: UserUuid::from_uuid(user.id),
            email: user.email.unwrap_or_default(),
            access_token: token.clone(),
        }))
    }

    async fn sign_out(&self, token: &AccessToken) -> Result<(), IdentityError> {
        let response = self
            .http
            .post(self.endpoint("logout"))
            .header("apikey", &self.config.api_key)
            .bearer_auth(token.expose())
            .send()
            .await?;

        let status = response.status();

        // An already-revoked session is as signed out as it gets.
        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();

        Err(IdentityError::UnexpectedResponse(format!(
            "logout request failed with status {status}: {text}"
        )))
    }
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: Uuid,
    email: Option<String>,
}
