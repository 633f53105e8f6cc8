//! Service context - dependency container for services
//!
//! Holds the repositories, login-state store, identity provider, session
//! issuer, clock and the check-in policies built from configuration.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use gym_common::SessionService;
use gym_core::traits::{AttendanceRepository, LoginStateStore, MemberRepository};
use gym_core::{AdminList, AttendanceSchedule, Clock, LocationPolicy, RankMode, SystemClock};

use crate::identity::IdentityProvider;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the dependency container that gets passed to all services.
/// Policies are plain values; nothing here reads the environment.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    member_repo: Arc<dyn MemberRepository>,
    attendance_repo: Arc<dyn AttendanceRepository>,

    // Login
    login_states: Arc<dyn LoginStateStore>,
    identity: Arc<dyn IdentityProvider>,
    sessions: Arc<SessionService>,

    // Policies
    clock: Arc<dyn Clock>,
    schedule: Arc<AttendanceSchedule>,
    location: Arc<LocationPolicy>,
    admins: Arc<AdminList>,
    rank_mode: RankMode,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the attendance repository
    pub fn attendance_repo(&self) -> &dyn AttendanceRepository {
        self.attendance_repo.as_ref()
    }

    // === Login ===

    /// Get the login state store
    pub fn login_states(&self) -> &dyn LoginStateStore {
        self.login_states.as_ref()
    }

    /// Get the identity provider
    pub fn identity(&self) -> &dyn IdentityProvider {
        self.identity.as_ref()
    }

    /// Get the session token service
    pub fn sessions(&self) -> &SessionService {
        self.sessions.as_ref()
    }

    // === Policies ===

    /// Current instant from the injected clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Today's civil date in the club's offset
    pub fn today(&self) -> NaiveDate {
        self.schedule.local_date(&self.now())
    }

    pub fn schedule(&self) -> &AttendanceSchedule {
        &self.schedule
    }

    pub fn location(&self) -> &LocationPolicy {
        &self.location
    }

    pub fn admins(&self) -> &AdminList {
        &self.admins
    }

    pub fn rank_mode(&self) -> RankMode {
        self.rank_mode
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("schedule", &self.schedule)
            .field("admins", &self.admins.len())
            .field("rank_mode", &self.rank_mode)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    member_repo: Option<Arc<dyn MemberRepository>>,
    attendance_repo: Option<Arc<dyn AttendanceRepository>>,
    login_states: Option<Arc<dyn LoginStateStore>>,
    identity: Option<Arc<dyn IdentityProvider>>,
    sessions: Option<Arc<SessionService>>,
    clock: Arc<dyn Clock>,
    schedule: AttendanceSchedule,
    location: LocationPolicy,
    admins: AdminList,
    rank_mode: RankMode,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            member_repo: None,
            attendance_repo: None,
            login_states: None,
            identity: None,
            sessions: None,
            clock: Arc::new(SystemClock),
            schedule: AttendanceSchedule::default(),
            location: LocationPolicy::default(),
            admins: AdminList::default(),
            rank_mode: RankMode::default(),
        }
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn attendance_repo(mut self, repo: Arc<dyn AttendanceRepository>) -> Self {
        self.attendance_repo = Some(repo);
        self
    }

    pub fn login_states(mut self, store: Arc<dyn LoginStateStore>) -> Self {
        self.login_states = Some(store);
        self
    }

    pub fn identity(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(provider);
        self
    }

    pub fn sessions(mut self, service: Arc<SessionService>) -> Self {
        self.sessions = Some(service);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn schedule(mut self, schedule: AttendanceSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn location(mut self, location: LocationPolicy) -> Self {
        self.location = location;
        self
    }

    pub fn admins(mut self, admins: AdminList) -> Self {
        self.admins = admins;
        self
    }

    pub fn rank_mode(mut self, mode: RankMode) -> Self {
        self.rank_mode = mode;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            member_repo: self
                .member_repo
                .ok_or_else(|| ServiceError::validation("member_repo is required"))?,
            attendance_repo: self
                .attendance_repo
                .ok_or_else(|| ServiceError::validation("attendance_repo is required"))?,
            login_states: self
                .login_states
                .ok_or_else(|| ServiceError::validation("login_states is required"))?,
            identity: self
                .identity
                .ok_or_else(|| ServiceError::validation("identity is required"))?,
            sessions: self
                .sessions
                .ok_or_else(|| ServiceError::validation("sessions is required"))?,
            clock: self.clock,
            schedule: Arc::new(self.schedule),
            location: Arc::new(self.location),
            admins: Arc::new(self.admins),
            rank_mode: self.rank_mode,
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_repositories() {
        let err = ServiceContextBuilder::new().build().unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("member_repo"));
    }
}
