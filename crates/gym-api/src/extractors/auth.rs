//! Session extractor
//!
//! The session token is read from the session cookie first and from an
//! `Authorization: Bearer` header second.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    extract::CookieJar,
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use gym_common::AppError;
use gym_core::MemberId;
use gym_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated member extracted from the session token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub member_id: MemberId,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(member_id: MemberId) -> Self {
        Self { member_id }
    }
}

async fn session_token<S>(parts: &mut Parts, state: &S, cookie_name: &str) -> Option<String>
where
    S: Send + Sync,
{
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(cookie_name).filter(|c| !c.value().is_empty()) {
        return Some(cookie.value().to_string());
    }

    TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
        .await
        .ok()
        .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = session_token(parts, state, &app_state.web().cookie_name)
            .await
            .ok_or(ApiError::App(AppError::Unauthenticated))?;

        let member_id = AuthService::new(app_state.service_context())
            .authenticate(&token)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected session token");
                ApiError::App(AppError::Unauthenticated)
            })?;

        Ok(AuthUser::new(member_id))
    }
}

/// Optional authenticated member
///
/// A missing, expired or tampered session all yield `None`.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(
            AuthUser::from_request_parts(parts, state).await.ok(),
        ))
    }
}
