//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use gym_core::entities::{AttendanceRecord, Member};
use gym_core::WeeklyStreak;

use super::responses::{MemberResponse, RecordResponse, StreakResponse};

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.clone(),
            nickname: member.nickname.clone(),
            initial_nickname: member.initial_nickname.clone(),
            profile_image: member.profile_image.clone(),
            approval: member.approval,
            sick_leave: member.sick_leave,
            unnotified_absence_1: member.unnotified_absence_1,
            unnotified_absence_2: member.unnotified_absence_2,
            unnotified_count: member.unnotified_count(),
            batch: member.batch.clone(),
            created_at: member.created_at,
            last_login_at: member.last_login_at,
        }
    }
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self::from(&member)
    }
}

impl From<&AttendanceRecord> for RecordResponse {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            date: record.date,
            status: record.status,
            point: record.point,
            created_at: record.created_at,
        }
    }
}

impl From<WeeklyStreak> for StreakResponse {
    fn from(streak: WeeklyStreak) -> Self {
        Self {
            weeks: streak.weeks,
            last_date: streak.last_date,
        }
    }
}

/// Records newest first
pub fn records_newest_first(records: &[AttendanceRecord]) -> Vec<RecordResponse> {
    records.iter().rev().map(RecordResponse::from).collect()
}
