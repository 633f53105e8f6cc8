//! Attendance database models

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for attendance table
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceModel {
    pub member_id: String,
    pub date: NaiveDate,
    pub status: String,
    pub point: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Per-member aggregate row (last date or count)
#[derive(Debug, Clone, FromRow)]
pub struct MemberLastDateModel {
    pub member_id: String,
    pub last_date: NaiveDate,
}

#[derive(Debug, Clone, FromRow)]
pub struct MemberCountModel {
    pub member_id: String,
    pub count: i64,
}
