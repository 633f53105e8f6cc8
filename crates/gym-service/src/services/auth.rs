//! Authentication service
//!
//! OAuth2 authorization-code login: hand out a one-time `state`, and on the
//! callback redeem it, exchange the code, create or refresh the member and
//! issue a session token.

use gym_core::entities::Member;
use gym_core::error::DomainError;
use gym_core::value_objects::MemberId;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{LoginRedirect, MemberResponse, OAuthCallbackQuery, SessionGrant};
use crate::identity::ProviderProfile;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Start a login: remember a fresh state and build the provider URL
    #[instrument(skip(self))]
    pub async fn begin_login(&self) -> ServiceResult<LoginRedirect> {
        let state = Uuid::new_v4().simple().to_string();
        self.ctx.login_states().save(&state).await?;

        let url = self.ctx.identity().authorize_url(&state)?;
        Ok(LoginRedirect { url })
    }

    /// Finish a login from the provider callback
    ///
    /// The state is redeemed before anything else, so a replayed or forged
    /// callback never reaches the provider. Provider failures leave the
    /// member table untouched.
    #[instrument(skip(self, query))]
    pub async fn complete_login(&self, query: OAuthCallbackQuery) -> ServiceResult<SessionGrant> {
        let state = query
            .state
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(DomainError::InvalidLoginState)?;

        if !self.ctx.login_states().consume(state).await? {
            warn!("Login callback with unknown or reused state");
            return Err(DomainError::InvalidLoginState.into());
        }

        if let Some(error) = query.error {
            info!(error = %error, "Provider refused authorization");
            return Err(DomainError::IdentityProvider(format!("authorization refused: {error}")).into());
        }

        let code = query
            .code
            .filter(|c| !c.is_empty())
            .ok_or(DomainError::InvalidLoginState)?;

        let access_token = self.ctx.identity().exchange_code(&code).await?;
        let profile = self.ctx.identity().fetch_profile(&access_token).await?;

        let (member, is_new_member) = self.upsert_member(profile).await?;
        let token = self.ctx.sessions().issue(&member.id)?;

        info!(member_id = %member.id, is_new_member, "Member logged in");

        Ok(SessionGrant {
            token,
            max_age: self.ctx.sessions().max_age(),
            member: MemberResponse::from(&member),
            is_new_member,
        })
    }

    /// Resolve a session token to its member id
    pub fn authenticate(&self, token: &str) -> ServiceResult<MemberId> {
        Ok(self.ctx.sessions().verify(token)?)
    }

    /// Create the member on first login, otherwise refresh the login fields only
    async fn upsert_member(&self, profile: ProviderProfile) -> ServiceResult<(Member, bool)> {
        let repo = self.ctx.member_repo();

        if let Some(mut member) = repo.find_by_id(&profile.subject).await? {
            repo.record_login(&member.id, profile.profile_image.as_deref())
                .await?;
            member.touch_login(profile.profile_image);
            return Ok((member, false));
        }

        let member = Member::new(profile.subject, profile.nickname, profile.profile_image);
        repo.create(&member).await?;

        // a concurrent first login may have inserted the row first
        let stored = repo.find_by_id(&member.id).await?.unwrap_or(member);
        Ok((stored, true))
    }
}
