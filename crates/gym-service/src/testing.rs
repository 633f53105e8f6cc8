//! In-memory doubles for tests
//!
//! Repositories backed by ordered maps, a login-state set and an identity
//! provider that returns a canned profile. [`TestHarness`] wires them into a
//! [`ServiceContext`] with a fixed clock.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use gym_common::SessionService;
use gym_core::error::DomainError;
use gym_core::traits::{AttendanceRepository, LoginStateStore, MemberRepository, RepoResult};
use gym_core::{
    AdminList, ApprovalState, AttendanceRecord, AttendanceStatus, DateRange, FixedClock,
    LedgerChange, LedgerOutcome, LocationPolicy, Member, MemberId,
};

use crate::identity::{IdentityProvider, ProviderProfile};
use crate::services::{ServiceContext, ServiceContextBuilder};

/// Address on the allow-list of [`TestHarness`] contexts
pub const CLUB_IP: &str = "203.0.113.7";

/// Member id listed as administrator in [`TestHarness`] contexts
pub const ADMIN_ID: &str = "admin-1";

/// Secret used by the harness session service
pub const SESSION_SECRET: &str = "test-session-secret-that-is-long-enough";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Instant for a civil time at UTC+09:00
pub fn kst(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    FixedOffset::east_opt(9 * 3600)
        .and_then(|tz| tz.with_ymd_and_hms(year, month, day, hour, minute, 0).single())
        .map_or_else(Utc::now, |dt| dt.with_timezone(&Utc))
}

/// An approved member
pub fn approved_member(id: &str, nickname: &str) -> Member {
    let mut member = Member::new(MemberId::from(id), nickname, None);
    member.approval = ApprovalState::Approved;
    member
}

// ============================================================================
// Members
// ============================================================================

#[derive(Default)]
pub struct InMemoryMembers {
    members: Mutex<BTreeMap<MemberId, Member>>,
}

impl InMemoryMembers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, member: Member) {
        lock(&self.members).insert(member.id.clone(), member);
    }

    pub fn get(&self, id: &str) -> Option<Member> {
        lock(&self.members).get(&MemberId::from(id)).cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.members).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MemberRepository for InMemoryMembers {
    async fn find_by_id(&self, id: &MemberId) -> RepoResult<Option<Member>> {
        Ok(lock(&self.members).get(id).cloned())
    }

    async fn list_all(&self) -> RepoResult<Vec<Member>> {
        let mut members: Vec<Member> = lock(&self.members).values().cloned().collect();
        members.sort_by(|a, b| a.nickname.cmp(&b.nickname).then_with(|| a.id.cmp(&b.id)));
        Ok(members)
    }

    async fn create(&self, member: &Member) -> RepoResult<()> {
        lock(&self.members)
            .entry(member.id.clone())
            .or_insert_with(|| member.clone());
        Ok(())
    }

    async fn record_login(&self, id: &MemberId, profile_image: Option<&str>) -> RepoResult<()> {
        let mut members = lock(&self.members);
        let member = members
            .get_mut(id)
            .ok_or_else(|| DomainError::MemberNotFound(id.clone()))?;
        member.touch_login(profile_image.map(str::to_string));
        Ok(())
    }

    async fn update(&self, member: &Member) -> RepoResult<()> {
        let mut members = lock(&self.members);
        let stored = members
            .get_mut(&member.id)
            .ok_or_else(|| DomainError::MemberNotFound(member.id.clone()))?;
        let initial = stored.initial_nickname.clone();
        *stored = member.clone();
        stored.initial_nickname = initial;
        Ok(())
    }

    async fn delete(&self, id: &MemberId) -> RepoResult<bool> {
        Ok(lock(&self.members).remove(id).is_some())
    }
}

// ============================================================================
// Attendance
// ============================================================================

#[derive(Default)]
pub struct InMemoryAttendance {
    records: Mutex<BTreeMap<(MemberId, NaiveDate), AttendanceRecord>>,
    unavailable: AtomicBool,
    broken_date: Mutex<Option<NaiveDate>>,
}

impl InMemoryAttendance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly
    pub fn insert(&self, member_id: &str, date: NaiveDate, status: AttendanceStatus) {
        let record = AttendanceRecord {
            member_id: MemberId::from(member_id),
            date,
            status,
            point: Some(status.legacy_points()),
            created_at: Utc::now(),
        };
        lock(&self.records).insert((record.member_id.clone(), date), record);
    }

    /// Make every call fail as if the database were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Fail any ledger batch that touches `date`, part way through
    pub fn break_ledger_at(&self, date: NaiveDate) {
        *lock(&self.broken_date) = Some(date);
    }

    pub fn count_for(&self, member_id: &str) -> usize {
        let id = MemberId::from(member_id);
        lock(&self.records).keys().filter(|(m, _)| *m == id).count()
    }

    fn check(&self) -> RepoResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(DomainError::DatabaseError("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryAttendance {
    async fn has_record(&self, member_id: &MemberId, date: NaiveDate) -> RepoResult<bool> {
        self.check()?;
        Ok(lock(&self.records).contains_key(&(member_id.clone(), date)))
    }

    async fn add_record(
        &self,
        member_id: &MemberId,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> RepoResult<AttendanceRecord> {
        self.check()?;
        let mut records = lock(&self.records);
        let key = (member_id.clone(), date);
        if records.contains_key(&key) {
            return Err(DomainError::AlreadyCheckedIn);
        }
        let record = AttendanceRecord {
            member_id: member_id.clone(),
            date,
            status,
            point: Some(status.legacy_points()),
            created_at: Utc::now(),
        };
        records.insert(key, record.clone());
        Ok(record)
    }

    async fn records_for_member(
        &self,
        member_id: &MemberId,
        range: Option<DateRange>,
    ) -> RepoResult<Vec<AttendanceRecord>> {
        self.check()?;
        Ok(lock(&self.records)
            .values()
            .filter(|r| r.member_id == *member_id)
            .filter(|r| range.is_none_or(|range| range.contains(r.date)))
            .cloned()
            .collect())
    }

    async fn last_record_date(&self, member_id: &MemberId) -> RepoResult<Option<NaiveDate>> {
        self.check()?;
        Ok(lock(&self.records)
            .values()
            .filter(|r| r.member_id == *member_id)
            .map(|r| r.date)
            .max())
    }

    async fn records_in_range(&self, range: DateRange) -> RepoResult<Vec<AttendanceRecord>> {
        self.check()?;
        let mut records: Vec<_> = lock(&self.records)
            .values()
            .filter(|r| range.contains(r.date))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.member_id.cmp(&b.member_id)));
        Ok(records)
    }

    async fn last_dates_by_member(&self) -> RepoResult<HashMap<MemberId, NaiveDate>> {
        self.check()?;
        let mut out: HashMap<MemberId, NaiveDate> = HashMap::new();
        for record in lock(&self.records).values() {
            out.entry(record.member_id.clone())
                .and_modify(|d| *d = (*d).max(record.date))
                .or_insert(record.date);
        }
        Ok(out)
    }

    async fn counts_by_member(&self, range: DateRange) -> RepoResult<HashMap<MemberId, u32>> {
        self.check()?;
        let mut out: HashMap<MemberId, u32> = HashMap::new();
        for record in lock(&self.records).values().filter(|r| range.contains(r.date)) {
            *out.entry(record.member_id.clone()).or_default() += 1;
        }
        Ok(out)
    }

    async fn apply_changes(
        &self,
        member_id: &MemberId,
        changes: &[LedgerChange],
    ) -> RepoResult<LedgerOutcome> {
        self.check()?;
        let broken = *lock(&self.broken_date);
        let mut records = lock(&self.records);

        // work on a copy so a failure leaves the ledger untouched
        let mut staged = records.clone();
        let mut outcome = LedgerOutcome::default();

        for change in changes {
            if Some(change.date) == broken {
                return Err(DomainError::DatabaseError("statement failed".to_string()));
            }
            let key = (member_id.clone(), change.date);
            match change.status {
                Some(status) => {
                    let entry = staged.entry(key).or_insert_with(|| AttendanceRecord {
                        member_id: member_id.clone(),
                        date: change.date,
                        status,
                        point: None,
                        created_at: Utc::now(),
                    });
                    entry.status = status;
                    entry.point = Some(status.legacy_points());
                    outcome.upserted += 1;
                }
                None => {
                    if staged.remove(&key).is_some() {
                        outcome.deleted += 1;
                    }
                }
            }
        }

        *records = staged;
        Ok(outcome)
    }

    async fn delete_chunk(&self, member_id: &MemberId, limit: u32) -> RepoResult<u64> {
        self.check()?;
        let mut records = lock(&self.records);
        let keys: Vec<_> = records
            .keys()
            .filter(|(m, _)| m == member_id)
            .take(limit as usize)
            .cloned()
            .collect();
        for key in &keys {
            records.remove(key);
        }
        Ok(keys.len() as u64)
    }
}

// ============================================================================
// Login state
// ============================================================================

#[derive(Default)]
pub struct InMemoryLoginStates {
    states: Mutex<HashSet<String>>,
}

impl InMemoryLoginStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any state currently waiting for a callback
    pub fn any(&self) -> Option<String> {
        lock(&self.states).iter().next().cloned()
    }
}

#[async_trait]
impl LoginStateStore for InMemoryLoginStates {
    async fn save(&self, state: &str) -> RepoResult<()> {
        lock(&self.states).insert(state.to_string());
        Ok(())
    }

    async fn consume(&self, state: &str) -> RepoResult<bool> {
        Ok(lock(&self.states).remove(state))
    }
}

// ============================================================================
// Identity provider
// ============================================================================

/// Identity provider returning a fixed profile, or failing
pub struct StubIdentity {
    profile: Option<ProviderProfile>,
    exchanges: AtomicUsize,
}

impl StubIdentity {
    pub fn returning(subject: &str, nickname: &str, profile_image: Option<&str>) -> Self {
        Self {
            profile: Some(ProviderProfile {
                subject: MemberId::from(subject),
                nickname: nickname.to_string(),
                profile_image: profile_image.map(str::to_string),
            }),
            exchanges: AtomicUsize::new(0),
        }
    }

    /// Every exchange fails as if the provider were down
    pub fn failing() -> Self {
        Self {
            profile: None,
            exchanges: AtomicUsize::new(0),
        }
    }

    /// Number of code exchanges attempted
    pub fn exchanges(&self) -> usize {
        self.exchanges.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for StubIdentity {
    fn authorize_url(&self, state: &str) -> RepoResult<String> {
        Ok(format!("https://idp.test/oauth/authorize?state={state}"))
    }

    async fn exchange_code(&self, code: &str) -> RepoResult<String> {
        self.exchanges.fetch_add(1, Ordering::SeqCst);
        match self.profile {
            Some(_) => Ok(format!("access-{code}")),
            None => Err(DomainError::IdentityProvider("token endpoint unavailable".to_string())),
        }
    }

    async fn fetch_profile(&self, _access_token: &str) -> RepoResult<ProviderProfile> {
        self.profile
            .clone()
            .ok_or_else(|| DomainError::IdentityProvider("userinfo unavailable".to_string()))
    }
}

// ============================================================================
// Harness
// ============================================================================

/// Doubles plus a context factory
pub struct TestHarness {
    pub members: Arc<InMemoryMembers>,
    pub attendance: Arc<InMemoryAttendance>,
    pub states: Arc<InMemoryLoginStates>,
    pub identity: Arc<StubIdentity>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_identity(StubIdentity::returning("kakao-1", "Newcomer", None))
    }

    pub fn with_identity(identity: StubIdentity) -> Self {
        Self {
            members: Arc::new(InMemoryMembers::new()),
            attendance: Arc::new(InMemoryAttendance::new()),
            states: Arc::new(InMemoryLoginStates::new()),
            identity: Arc::new(identity),
        }
    }

    /// Builder with the doubles, a fixed clock, [`CLUB_IP`] allowed and
    /// [`ADMIN_ID`] as administrator
    pub fn builder_at(&self, now: DateTime<Utc>) -> ServiceContextBuilder {
        ServiceContext::builder()
            .member_repo(self.members.clone())
            .attendance_repo(self.attendance.clone())
            .login_states(self.states.clone())
            .identity(self.identity.clone())
            .sessions(Arc::new(SessionService::new(SESSION_SECRET, 604_800)))
            .clock(Arc::new(FixedClock::new(now)))
            .location(LocationPolicy::new([CLUB_IP]))
            .admins(AdminList::new([MemberId::from(ADMIN_ID)]))
    }

    pub fn context_at(&self, now: DateTime<Utc>) -> ServiceContext {
        match self.builder_at(now).build() {
            Ok(ctx) => ctx,
            Err(e) => panic!("test context: {e}"),
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
