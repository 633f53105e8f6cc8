//! Login handlers
//!
//! Kakao OAuth redirect, callback and logout. The session token never
//! appears in a response body; it is only set as an HttpOnly cookie.

use axum::extract::{Query, State};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use gym_service::dto::OAuthCallbackQuery;
use gym_service::AuthService;

use crate::response::{ApiResult, Found, NoContent};
use crate::state::{AppState, WebSettings};

/// Session cookie carrying a signed token
pub fn session_cookie(web: &WebSettings, token: String, max_age: i64) -> Cookie<'static> {
    Cookie::build((web.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(web.cookie_secure)
        .max_age(time::Duration::seconds(max_age))
        .build()
}

/// Start a Kakao login
///
/// GET /auth/kakao/login
pub async fn kakao_login(State(state): State<AppState>) -> ApiResult<Found> {
    let service = AuthService::new(state.service_context());
    let redirect = service.begin_login().await?;
    Ok(Found(redirect.url))
}

/// Provider callback: set the session cookie and send the browser on
///
/// GET /auth/kakao/callback?code&state
pub async fn kakao_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<OAuthCallbackQuery>,
) -> ApiResult<(CookieJar, Found)> {
    let service = AuthService::new(state.service_context());
    let grant = service.complete_login(query).await?;

    let web = state.web();
    let jar = jar.add(session_cookie(web, grant.token, grant.max_age));
    Ok((jar, Found(web.post_login_redirect.clone())))
}

/// Clear the session cookie
///
/// POST /auth/logout
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, NoContent) {
    let removal = Cookie::build((state.web().cookie_name.clone(), "")).path("/");
    (jar.remove(removal), NoContent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let web = WebSettings::default();
        let cookie = session_cookie(&web, "abc.def.ghi".to_string(), 604_800);

        assert_eq!(cookie.name(), "gym_session");
        assert_eq!(cookie.value(), "abc.def.ghi");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(604_800)));
        assert!(!cookie.to_string().contains("Secure"));

        let secure = WebSettings {
            cookie_secure: true,
            ..WebSettings::default()
        };
        let cookie = session_cookie(&secure, "t".to_string(), 1);
        assert!(cookie.to_string().contains("; Secure"));
    }
}
