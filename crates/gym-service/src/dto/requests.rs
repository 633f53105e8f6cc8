//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; bodies also implement `Validate`.

use chrono::NaiveDate;
use gym_core::{AttendanceStatus, LedgerChange};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Distinguishes an absent field from an explicit `null`
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Query string of the OAuth callback
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set by the provider when the user cancels or consent fails
    pub error: Option<String>,
}

// ============================================================================
// Ranking Requests
// ============================================================================

/// Month selector; both fields default to the current month
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RankingQuery {
    #[validate(range(min = 2000, max = 9999, message = "Year must be 2000-9999"))]
    pub year: Option<i32>,

    #[validate(range(min = 1, max = 12, message = "Month must be 1-12"))]
    pub month: Option<u32>,
}

// ============================================================================
// Admin Requests
// ============================================================================

/// Whether `s` is a `YY-MM` label with a month between 01 and 12
pub fn is_batch_label(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b'-' {
        return false;
    }
    let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
    if !digits.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let month = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
    (1..=12).contains(&month)
}

/// Admin edit of a member; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMemberRequest {
    #[validate(length(min = 1, max = 32, message = "Nickname must be 1-32 characters"))]
    pub nickname: Option<String>,

    /// `pending`, `approved` or `withdrawn`
    pub approval: Option<String>,

    pub sick_leave: Option<bool>,

    /// `null` clears the marker
    #[serde(default, deserialize_with = "double_option")]
    pub unnotified_absence_1: Option<Option<NaiveDate>>,

    #[serde(default, deserialize_with = "double_option")]
    pub unnotified_absence_2: Option<Option<NaiveDate>>,

    /// `YY-MM`; empty string or `null` clears it
    #[serde(default, deserialize_with = "double_option")]
    pub batch: Option<Option<String>>,
}

/// Ledger mark for one date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerMark {
    Present,
    Late,
    /// Removes the record
    Absent,
}

/// One ledger edit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub status: LedgerMark,
}

impl From<&LedgerEntry> for LedgerChange {
    fn from(entry: &LedgerEntry) -> Self {
        let status = match entry.status {
            LedgerMark::Present => Some(AttendanceStatus::Present),
            LedgerMark::Late => Some(AttendanceStatus::Late),
            LedgerMark::Absent => None,
        };
        LedgerChange { date: entry.date, status }
    }
}

/// Batch edit of a member's ledger
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LedgerEditRequest {
    #[validate(length(min = 1, max = 100, message = "Must edit 1-100 dates"))]
    pub entries: Vec<LedgerEntry>,
}
