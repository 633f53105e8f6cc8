//! Monthly leaderboard service

use chrono::Datelike;
use gym_core::error::DomainError;
use gym_core::stats::{rank_month, valid_class_days};
use gym_core::value_objects::DateRange;
use tracing::instrument;
use validator::Validate;

use crate::dto::{RankingQuery, RankingResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Ranking service
pub struct RankingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RankingService<'a> {
    /// Create a new RankingService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Leaderboard for a month; defaults to the current month
    #[instrument(skip(self))]
    pub async fn monthly(&self, query: RankingQuery) -> ServiceResult<RankingResponse> {
        query.validate()?;

        let now = self.ctx.now();
        let today = self.ctx.schedule().local_date(&now);
        let year = query.year.unwrap_or_else(|| today.year());
        let month = query.month.unwrap_or_else(|| today.month());
        let range = DateRange::month(year, month).ok_or(DomainError::InvalidMonth { year, month })?;

        let records = self.ctx.attendance_repo().records_in_range(range).await?;
        let members = self.ctx.member_repo().list_all().await?;

        let valid_days = valid_class_days(self.ctx.schedule(), range, &now);
        let mode = self.ctx.rank_mode();

        Ok(RankingResponse {
            year,
            month,
            valid_class_days: valid_days,
            tie_policy: mode,
            entries: rank_month(year, month, &records, &members, valid_days, mode),
        })
    }
}
