//! Identity provider port and profile extraction

use async_trait::async_trait;
use gym_core::error::DomainError;
use gym_core::traits::RepoResult;
use gym_core::value_objects::MemberId;
use serde_json::Value;

/// Profile returned by the provider after a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    /// Stable subject; becomes the member id
    pub subject: MemberId,
    pub nickname: String,
    pub profile_image: Option<String>,
}

/// OAuth2 authorization-code provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL the browser is redirected to, carrying `state`
    fn authorize_url(&self, state: &str) -> RepoResult<String>;

    /// Exchange an authorization code for an access token
    async fn exchange_code(&self, code: &str) -> RepoResult<String>;

    /// Fetch the profile belonging to an access token
    async fn fetch_profile(&self, access_token: &str) -> RepoResult<ProviderProfile>;
}

fn non_empty(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Extract a profile from a Kakao-style userinfo document
///
/// The nickname is taken from `kakao_account.profile.nickname`, then
/// `properties.nickname`, then falls back to `User{id}`. The image follows the
/// same order with `profile_image_url` / `profile_image`.
pub fn profile_from_userinfo(info: &Value) -> RepoResult<ProviderProfile> {
    let subject = match info.get("id") {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => {
            return Err(DomainError::IdentityProvider(
                "userinfo response has no id".to_string(),
            ))
        }
    };
    let subject = MemberId::parse(&subject)
        .map_err(|e| DomainError::IdentityProvider(format!("invalid subject: {e}")))?;

    let profile = info.pointer("/kakao_account/profile");
    let properties = info.get("properties");

    let nickname = non_empty(profile.and_then(|p| p.get("nickname")))
        .or_else(|| non_empty(properties.and_then(|p| p.get("nickname"))))
        .unwrap_or_else(|| format!("User{subject}"));

    let profile_image = non_empty(profile.and_then(|p| p.get("profile_image_url")))
        .or_else(|| non_empty(properties.and_then(|p| p.get("profile_image"))));

    Ok(ProviderProfile {
        subject,
        nickname,
        profile_image,
    })
}
