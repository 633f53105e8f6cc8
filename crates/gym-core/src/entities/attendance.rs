//! Attendance record - one ledger line per member per civil date

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::{AttendanceStatus, MemberId};

/// Ledger entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub member_id: MemberId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    /// Legacy point value; not used for ranking
    pub point: Option<i32>,
    /// Assigned by the store on commit
    pub created_at: DateTime<Utc>,
}

impl AttendanceRecord {
    #[inline]
    pub fn is_present(&self) -> bool {
        self.status == AttendanceStatus::Present
    }
}

/// One administrative correction; `status: None` clears the date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerChange {
    pub date: NaiveDate,
    pub status: Option<AttendanceStatus>,
}

/// Rows touched by a batch of ledger changes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerOutcome {
    pub upserted: u32,
    /// Clearing a date that had no record does not count
    pub deleted: u32,
}
