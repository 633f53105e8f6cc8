//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, NaiveDate, Utc};
use gym_core::stats::StatusView;
use gym_core::{ApprovalState, AttendanceStatus, MemberId, Phase, RankEntry, RankMode};
use serde::Serialize;

// ============================================================================
// Auth Responses
// ============================================================================

/// Where to send the browser to start a login
#[derive(Debug, Clone)]
pub struct LoginRedirect {
    pub url: String,
}

/// A completed login
#[derive(Debug, Clone)]
pub struct SessionGrant {
    /// Session token; goes into the cookie, never into logs
    pub token: String,
    /// Cookie lifetime in seconds
    pub max_age: i64,
    pub member: MemberResponse,
    pub is_new_member: bool,
}

// ============================================================================
// Member Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub id: MemberId,
    pub nickname: String,
    pub initial_nickname: String,
    pub profile_image: Option<String>,
    pub approval: ApprovalState,
    pub sick_leave: bool,
    pub unnotified_absence_1: Option<NaiveDate>,
    pub unnotified_absence_2: Option<NaiveDate>,
    pub unnotified_count: u8,
    pub batch: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordResponse {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct StreakResponse {
    pub weeks: u32,
    /// Last attended date in the week where the longest run was first reached
    pub last_date: Option<NaiveDate>,
}

// ============================================================================
// Attendance Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CheckInResponse {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub point: i32,
    pub message: String,
}

/// Everything the check-in page needs to render its button
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceStatusResponse {
    pub is_authenticated: bool,
    pub is_ip_valid: bool,
    pub client_ip: String,
    pub time_status: Phase,
    pub time_message: &'static str,
    pub already_attended: bool,
    pub today: NaiveDate,
}

// ============================================================================
// Record Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MonthStats {
    pub year: i32,
    pub month: u32,
    pub present_count: u32,
    pub late_count: u32,
    pub total_count: u32,
    pub valid_class_days: u32,
    /// Percentage of on-time attendance
    pub attendance_rate: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MyRecordsResponse {
    pub member: MemberResponse,
    pub is_admin: bool,
    pub month: MonthStats,
    /// Current month, newest first
    pub records: Vec<RecordResponse>,
    pub streak: StreakResponse,
    pub status: StatusView,
    pub days_absent: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingResponse {
    pub year: i32,
    pub month: u32,
    pub valid_class_days: u32,
    pub tie_policy: RankMode,
    pub entries: Vec<RankEntry>,
}

// ============================================================================
// Admin Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DashboardMember {
    pub id: MemberId,
    pub nickname: String,
    pub days_absent: Option<i64>,
    pub last_attended: Option<NaiveDate>,
    pub month_count: u32,
    pub status: StatusView,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberGroup {
    pub total: usize,
    pub members: Vec<DashboardMember>,
}

impl MemberGroup {
    pub fn new(members: Vec<DashboardMember>) -> Self {
        Self {
            total: members.len(),
            members,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub today: NaiveDate,
    /// Approved members, sorted by nickname
    pub members: Vec<DashboardMember>,
    pub warning: MemberGroup,
    pub dropout: MemberGroup,
    pub never_attended: MemberGroup,
    /// Waiting for approval
    pub pending: Vec<MemberResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberDetailResponse {
    pub member: MemberResponse,
    /// All time, newest first
    pub records: Vec<RecordResponse>,
    pub total_count: usize,
    pub streak: StreakResponse,
    pub status: StatusView,
    pub days_absent: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LedgerEditResponse {
    pub member_id: MemberId,
    pub upserted: u32,
    pub deleted: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PurgeResponse {
    pub member_id: MemberId,
    pub deleted_records: u64,
    pub member_deleted: bool,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let all_healthy = database_healthy && redis_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                redis: if redis_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
