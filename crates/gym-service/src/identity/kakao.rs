//! Kakao OAuth2 client

use std::time::Duration;

use async_trait::async_trait;
use gym_common::OAuthConfig;
use gym_core::error::DomainError;
use gym_core::traits::RepoResult;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::{instrument, warn};

use super::provider::{profile_from_userinfo, IdentityProvider, ProviderProfile};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Kakao identity provider
#[derive(Clone)]
pub struct KakaoProvider {
    client: Client,
    config: OAuthConfig,
}

impl KakaoProvider {
    /// Create a provider with its own HTTP client
    pub fn new(config: OAuthConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }
}

impl std::fmt::Debug for KakaoProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KakaoProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn provider_error(context: &str, err: impl std::fmt::Display) -> DomainError {
    warn!(error = %err, "{context}");
    DomainError::IdentityProvider(context.to_string())
}

#[async_trait]
impl IdentityProvider for KakaoProvider {
    fn authorize_url(&self, state: &str) -> RepoResult<String> {
        Url::parse_with_params(
            &self.config.authorize_url,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", "code"),
                ("state", state),
            ],
        )
        .map(String::from)
        .map_err(|e| DomainError::InternalError(format!("invalid authorize url: {e}")))
    }

    #[instrument(skip_all)]
    async fn exchange_code(&self, code: &str) -> RepoResult<String> {
        let mut form = vec![
            ("grant_type", "authorization_code"),
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("code", code),
        ];
        if let Some(secret) = self.config.client_secret.as_deref() {
            form.push(("client_secret", secret));
        }

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&form)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| provider_error("Token exchange failed", e.without_url()))?;

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| provider_error("Token response was malformed", e))?;

        Ok(token.access_token)
    }

    #[instrument(skip_all)]
    async fn fetch_profile(&self, access_token: &str) -> RepoResult<ProviderProfile> {
        let info: Value = self
            .client
            .get(&self.config.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| provider_error("Userinfo request failed", e.without_url()))?
            .json()
            .await
            .map_err(|e| provider_error("Userinfo response was malformed", e))?;

        profile_from_userinfo(&info)
    }
}
