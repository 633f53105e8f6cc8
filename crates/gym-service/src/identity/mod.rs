//! Identity providers
//!
//! Login is delegated to an OAuth2 provider. The service layer only sees the
//! [`IdentityProvider`] trait; [`KakaoProvider`] talks to Kakao over HTTP.

mod kakao;
mod provider;

pub use kakao::KakaoProvider;
pub use provider::{profile_from_userinfo, IdentityProvider, ProviderProfile};
