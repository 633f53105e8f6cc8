//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::entities::{AttendanceRecord, LedgerChange, LedgerOutcome, Member};
use crate::error::DomainError;
use crate::value_objects::{AttendanceStatus, DateRange, MemberId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by ID
    async fn find_by_id(&self, id: &MemberId) -> RepoResult<Option<Member>>;

    /// List every member, ordered by nickname
    async fn list_all(&self) -> RepoResult<Vec<Member>>;

    /// Insert a member created by a first login; an existing id is left untouched
    async fn create(&self, member: &Member) -> RepoResult<()>;

    /// Refresh profile image and last-login time of an existing member
    async fn record_login(&self, id: &MemberId, profile_image: Option<&str>) -> RepoResult<()>;

    /// Persist administrator edits (everything except id and initial nickname)
    async fn update(&self, member: &Member) -> RepoResult<()>;

    /// Delete the member row; returns false when it did not exist
    async fn delete(&self, id: &MemberId) -> RepoResult<bool>;
}

// ============================================================================
// Attendance Repository
// ============================================================================

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Whether a record exists for the member on that date
    async fn has_record(&self, member_id: &MemberId, date: NaiveDate) -> RepoResult<bool>;

    /// Conditionally insert a record
    ///
    /// Fails with [`DomainError::AlreadyCheckedIn`] when a record already exists
    /// for `(member_id, date)`. The check and the insert are a single store
    /// operation.
    async fn add_record(
        &self,
        member_id: &MemberId,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> RepoResult<AttendanceRecord>;

    /// Member's records ordered by date ascending; all time when `range` is `None`
    async fn records_for_member(
        &self,
        member_id: &MemberId,
        range: Option<DateRange>,
    ) -> RepoResult<Vec<AttendanceRecord>>;

    /// Most recent record date for the member
    async fn last_record_date(&self, member_id: &MemberId) -> RepoResult<Option<NaiveDate>>;

    /// Every record inside the range
    async fn records_in_range(&self, range: DateRange) -> RepoResult<Vec<AttendanceRecord>>;

    /// Most recent record date per member
    async fn last_dates_by_member(&self) -> RepoResult<HashMap<MemberId, NaiveDate>>;

    /// Number of records (any status) per member inside the range
    async fn counts_by_member(&self, range: DateRange) -> RepoResult<HashMap<MemberId, u32>>;

    /// Apply a batch of corrections in one transaction
    ///
    /// A set status overwrites any existing record; a cleared date that has no
    /// record is not an error. On failure nothing is applied.
    async fn apply_changes(
        &self,
        member_id: &MemberId,
        changes: &[LedgerChange],
    ) -> RepoResult<LedgerOutcome>;

    /// Delete up to `limit` of the member's records; returns the number removed
    async fn delete_chunk(&self, member_id: &MemberId, limit: u32) -> RepoResult<u64>;
}
