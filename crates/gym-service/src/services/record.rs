//! Personal records service

use chrono::Datelike;
use gym_core::error::DomainError;
use gym_core::stats::{
    attendance_rate, classify_member, days_absent, longest_weekly_streak, valid_class_days,
    MemberFlags,
};
use gym_core::value_objects::{DateRange, MemberId};
use tracing::instrument;

use crate::dto::{records_newest_first, MemberResponse, MonthStats, MyRecordsResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Personal records service
pub struct RecordService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RecordService<'a> {
    /// Create a new RecordService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Profile, current-month records and derived statistics for a member
    #[instrument(skip(self))]
    pub async fn my_records(&self, member_id: &MemberId) -> ServiceResult<MyRecordsResponse> {
        let member = self
            .ctx
            .member_repo()
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| DomainError::MemberNotFound(member_id.clone()))?;

        let now = self.ctx.now();
        let today = self.ctx.schedule().local_date(&now);
        let month = DateRange::month_of(today);

        // all time, ascending; the streak needs every week
        let all = self
            .ctx
            .attendance_repo()
            .records_for_member(member_id, None)
            .await?;

        let month_records: Vec<_> = all.iter().filter(|r| month.contains(r.date)).cloned().collect();
        let total_count = month_records.len() as u32;
        let present_count = month_records.iter().filter(|r| r.is_present()).count() as u32;
        let valid_days = valid_class_days(self.ctx.schedule(), month, &now);

        let streak = longest_weekly_streak(all.iter().map(|r| r.date));
        let absent = days_absent(today, all.last().map(|r| r.date));
        let status = classify_member(MemberFlags::from(&member), absent, total_count);

        Ok(MyRecordsResponse {
            is_admin: self.ctx.admins().is_admin(&member.id),
            member: MemberResponse::from(&member),
            month: MonthStats {
                year: today.year(),
                month: today.month(),
                present_count,
                late_count: total_count - present_count,
                total_count,
                valid_class_days: valid_days,
                attendance_rate: attendance_rate(present_count, valid_days),
            },
            records: records_newest_first(&month_records),
            streak: streak.into(),
            status: status.into(),
            days_absent: absent,
        })
    }
}
