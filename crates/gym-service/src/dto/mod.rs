//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    is_batch_label, LedgerEditRequest, LedgerEntry, LedgerMark, OAuthCallbackQuery, RankingQuery,
    UpdateMemberRequest,
};

// Re-export commonly used response types
pub use responses::{
    AttendanceStatusResponse, CheckInResponse, DashboardMember, DashboardResponse,
    HealthChecks, HealthResponse, LedgerEditResponse, LoginRedirect, MemberDetailResponse,
    MemberGroup, MemberResponse, MonthStats, MyRecordsResponse, PurgeResponse, RankingResponse,
    ReadinessResponse, RecordResponse, SessionGrant, StreakResponse,
};

pub use mappers::records_newest_first;
