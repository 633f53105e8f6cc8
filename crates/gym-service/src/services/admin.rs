//! Administration service
//!
//! Dashboard of inactive members, member edits, ledger corrections and purge.
//! Every operation checks the acting member against the administrator list.

use gym_core::error::DomainError;
use gym_core::stats::{classify_member, days_absent, longest_weekly_streak, MemberFlags, MemberStatus};
use gym_core::value_objects::{ApprovalState, DateRange, MemberId};
use gym_core::{LedgerChange, Member};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::dto::{
    is_batch_label, records_newest_first, DashboardMember, DashboardResponse, LedgerEditRequest,
    LedgerEditResponse, MemberDetailResponse, MemberGroup, MemberResponse,
    PurgeResponse, UpdateMemberRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Records deleted per purge transaction
pub const PURGE_CHUNK: u32 = 500;

/// Administration service
pub struct AdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminService<'a> {
    /// Create a new AdminService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn ensure_admin(&self, actor: &MemberId) -> ServiceResult<()> {
        if self.ctx.admins().is_admin(actor) {
            Ok(())
        } else {
            warn!(actor = %actor, "Administrator action refused");
            Err(DomainError::NotAdmin.into())
        }
    }

    async fn load_member(&self, id: &MemberId) -> ServiceResult<Member> {
        self.ctx
            .member_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::MemberNotFound(id.clone()).into())
    }

    /// Absence overview of approved members plus the approval queue
    #[instrument(skip(self))]
    pub async fn dashboard(&self, actor: &MemberId) -> ServiceResult<DashboardResponse> {
        self.ensure_admin(actor)?;

        let today = self.ctx.today();
        let members = self.ctx.member_repo().list_all().await?;
        let last_dates = self.ctx.attendance_repo().last_dates_by_member().await?;
        let month_counts = self
            .ctx
            .attendance_repo()
            .counts_by_member(DateRange::month_of(today))
            .await?;

        let mut rows: Vec<(MemberStatus, DashboardMember)> = Vec::new();
        let mut pending = Vec::new();

        for member in &members {
            match member.approval {
                ApprovalState::Pending => pending.push(MemberResponse::from(member)),
                ApprovalState::Withdrawn => {}
                ApprovalState::Approved => {
                    let last = last_dates.get(&member.id).copied();
                    let absent = days_absent(today, last);
                    let month_count = month_counts.get(&member.id).copied().unwrap_or(0);
                    let status = classify_member(MemberFlags::from(member), absent, month_count);
                    rows.push((
                        status,
                        DashboardMember {
                            id: member.id.clone(),
                            nickname: member.nickname.clone(),
                            days_absent: absent,
                            last_attended: last,
                            month_count,
                            status: status.into(),
                        },
                    ));
                }
            }
        }

        rows.sort_by(|(_, a), (_, b)| a.nickname.cmp(&b.nickname).then_with(|| a.id.cmp(&b.id)));

        let group = |keep: fn(&MemberStatus) -> bool| {
            MemberGroup::new(
                rows.iter()
                    .filter(|(status, _)| keep(status))
                    .map(|(_, row)| row.clone())
                    .collect(),
            )
        };
        let warning = group(|s| matches!(s, MemberStatus::Warning));
        let dropout = group(|s| matches!(s, MemberStatus::Dropout(_)));
        let never_attended = group(|s| matches!(s, MemberStatus::NeverAttended));

        debug!(
            members = rows.len(),
            warning = warning.total,
            dropout = dropout.total,
            "Dashboard built"
        );

        Ok(DashboardResponse {
            today,
            members: rows.into_iter().map(|(_, row)| row).collect(),
            warning,
            dropout,
            never_attended,
            pending,
        })
    }

    /// Every member, sorted by nickname
    #[instrument(skip(self))]
    pub async fn list_members(&self, actor: &MemberId) -> ServiceResult<Vec<MemberResponse>> {
        self.ensure_admin(actor)?;
        let members = self.ctx.member_repo().list_all().await?;
        Ok(members.iter().map(MemberResponse::from).collect())
    }

    /// One member with the full ledger
    #[instrument(skip(self))]
    pub async fn member_detail(
        &self,
        actor: &MemberId,
        id: &MemberId,
    ) -> ServiceResult<MemberDetailResponse> {
        self.ensure_admin(actor)?;
        let member = self.load_member(id).await?;

        let today = self.ctx.today();
        let records = self.ctx.attendance_repo().records_for_member(id, None).await?;
        let month = DateRange::month_of(today);
        let month_count = records.iter().filter(|r| month.contains(r.date)).count() as u32;
        let absent = days_absent(today, records.last().map(|r| r.date));

        Ok(MemberDetailResponse {
            member: MemberResponse::from(&member),
            total_count: records.len(),
            streak: longest_weekly_streak(records.iter().map(|r| r.date)).into(),
            status: classify_member(MemberFlags::from(&member), absent, month_count).into(),
            days_absent: absent,
            records: records_newest_first(&records),
        })
    }

    /// Apply an edit; absent fields stay as they are
    #[instrument(skip(self, request))]
    pub async fn update_member(
        &self,
        actor: &MemberId,
        id: &MemberId,
        request: UpdateMemberRequest,
    ) -> ServiceResult<MemberResponse> {
        self.ensure_admin(actor)?;
        request.validate()?;

        let mut member = self.load_member(id).await?;

        if let Some(nickname) = request.nickname {
            let nickname = nickname.trim();
            if nickname.is_empty() {
                return Err(ServiceError::validation("Nickname must not be blank"));
            }
            member.nickname = nickname.to_string();
        }
        if let Some(approval) = request.approval {
            member.approval = ApprovalState::parse(&approval)
                .ok_or_else(|| ServiceError::validation(format!("Unknown approval state: {approval}")))?;
        }
        if let Some(sick_leave) = request.sick_leave {
            member.sick_leave = sick_leave;
        }
        if let Some(marker) = request.unnotified_absence_1 {
            member.unnotified_absence_1 = marker;
        }
        if let Some(marker) = request.unnotified_absence_2 {
            member.unnotified_absence_2 = marker;
        }
        if let Some(batch) = request.batch {
            member.batch = match batch.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(label) if is_batch_label(label) => Some(label.to_string()),
                Some(label) => {
                    return Err(ServiceError::validation(format!("Batch must be YY-MM: {label}")))
                }
            };
        }
        member.updated_at = self.ctx.now();

        self.ctx.member_repo().update(&member).await?;
        info!(actor = %actor, member_id = %member.id, approval = %member.approval, "Member updated");

        Ok(MemberResponse::from(&member))
    }

    /// Set or clear ledger entries; the batch applies as a whole or not at all
    #[instrument(skip(self, request))]
    pub async fn edit_ledger(
        &self,
        actor: &MemberId,
        id: &MemberId,
        request: LedgerEditRequest,
    ) -> ServiceResult<LedgerEditResponse> {
        self.ensure_admin(actor)?;
        request.validate()?;
        self.load_member(id).await?;

        let changes: Vec<LedgerChange> = request.entries.iter().map(LedgerChange::from).collect();
        let outcome = self.ctx.attendance_repo().apply_changes(id, &changes).await?;

        info!(
            actor = %actor,
            member_id = %id,
            upserted = outcome.upserted,
            deleted = outcome.deleted,
            "Ledger edited"
        );

        Ok(LedgerEditResponse {
            member_id: id.clone(),
            upserted: outcome.upserted,
            deleted: outcome.deleted,
        })
    }

    /// Delete the member's ledger in chunks, then the member
    ///
    /// Each chunk commits on its own; running a half-finished purge again
    /// continues where it stopped.
    #[instrument(skip(self))]
    pub async fn purge_member(&self, actor: &MemberId, id: &MemberId) -> ServiceResult<PurgeResponse> {
        self.ensure_admin(actor)?;

        let repo = self.ctx.attendance_repo();
        let mut deleted_records = 0u64;
        loop {
            let removed = repo.delete_chunk(id, PURGE_CHUNK).await?;
            deleted_records += removed;
            debug!(removed, total = deleted_records, "Purge chunk committed");
            if removed < u64::from(PURGE_CHUNK) {
                break;
            }
        }

        let member_deleted = self.ctx.member_repo().delete(id).await?;
        if !member_deleted && deleted_records == 0 {
            return Err(DomainError::MemberNotFound(id.clone()).into());
        }

        info!(actor = %actor, member_id = %id, deleted_records, "Member purged");

        Ok(PurgeResponse {
            member_id: id.clone(),
            deleted_records,
            member_deleted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{LedgerEntry, LedgerMark};
    use gym_core::AttendanceStatus;
    use crate::testing::{approved_member, kst, TestHarness, ADMIN_ID};
    use chrono::{Duration, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn admin() -> MemberId {
        MemberId::from(ADMIN_ID)
    }

    #[tokio::test]
    async fn test_non_admin_refused() {
        let harness = TestHarness::new();
        let ctx = harness.context_at(kst(2024, 3, 20, 12, 0));
        let err = AdminService::new(&ctx)
            .dashboard(&MemberId::from("m1"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "NOT_ADMIN");
    }

    #[tokio::test]
    async fn test_dashboard_groups() {
        let harness = TestHarness::new();
        // today: Wednesday 2024-03-20
        for (id, nick, last) in [
            ("w", "Warn", Some(date(2024, 3, 3))),   // 17 days
            ("d", "Drop", Some(date(2024, 2, 25))),  // 24 days
            ("a", "Active", Some(date(2024, 3, 17))), // 3 days
            ("n", "Never", None),
        ] {
            harness.members.insert(approved_member(id, nick));
            if let Some(day) = last {
                harness.attendance.insert(id, day, AttendanceStatus::Present);
            }
        }
        let mut marked = approved_member("u", "Unnotified");
        marked.unnotified_absence_1 = Some(date(2024, 3, 9));
        marked.unnotified_absence_2 = Some(date(2024, 3, 16));
        harness.members.insert(marked);
        harness.attendance.insert("u", date(2024, 3, 17), AttendanceStatus::Present);
        harness
            .members
            .insert(Member::new(MemberId::from("p"), "Waiting", None));

        let ctx = harness.context_at(kst(2024, 3, 20, 12, 0));
        let resp = AdminService::new(&ctx).dashboard(&admin()).await.unwrap();

        assert_eq!(resp.members.len(), 5);
        assert_eq!(resp.warning.total, 1);
        assert_eq!(resp.warning.members[0].nickname, "Warn");
        assert_eq!(resp.warning.members[0].days_absent, Some(17));
        let dropouts: Vec<_> = resp.dropout.members.iter().map(|m| m.nickname.as_str()).collect();
        assert_eq!(dropouts, vec!["Drop", "Unnotified"]);
        assert_eq!(
            resp.dropout.members[1].status.reason.as_deref(),
            Some("unnotified_absences")
        );
        assert_eq!(resp.never_attended.total, 1);
        assert_eq!(resp.pending.len(), 1);
        assert_eq!(resp.pending[0].nickname, "Waiting");
    }

    #[tokio::test]
    async fn test_update_member() {
        let harness = TestHarness::new();
        harness
            .members
            .insert(Member::new(MemberId::from("m1"), "kakao_nick", None));
        let ctx = harness.context_at(kst(2024, 3, 20, 12, 0));
        let service = AdminService::new(&ctx);

        let request: UpdateMemberRequest = serde_json::from_str(
            r#"{"nickname": "Real Name", "approval": "approved", "batch": "24-03", "unnotified_absence_1": "2024-03-09"}"#,
        )
        .unwrap();
        let resp = service
            .update_member(&admin(), &MemberId::from("m1"), request)
            .await
            .unwrap();

        assert_eq!(resp.nickname, "Real Name");
        assert_eq!(resp.initial_nickname, "kakao_nick");
        assert_eq!(resp.approval, ApprovalState::Approved);
        assert_eq!(resp.batch.as_deref(), Some("24-03"));
        assert_eq!(resp.unnotified_count, 1);

        let clear: UpdateMemberRequest =
            serde_json::from_str(r#"{"unnotified_absence_1": null, "batch": null}"#).unwrap();
        let resp = service
            .update_member(&admin(), &MemberId::from("m1"), clear)
            .await
            .unwrap();
        assert_eq!(resp.unnotified_count, 0);
        assert_eq!(resp.batch, None);
        assert_eq!(resp.nickname, "Real Name");
    }

    #[tokio::test]
    async fn test_update_member_validation() {
        let harness = TestHarness::new();
        harness.members.insert(approved_member("m1", "Kim"));
        let ctx = harness.context_at(kst(2024, 3, 20, 12, 0));
        let service = AdminService::new(&ctx);

        for body in [r#"{"batch": "2024-03"}"#, r#"{"approval": "banned"}"#, r#"{"nickname": "  "}"#] {
            let request: UpdateMemberRequest = serde_json::from_str(body).unwrap();
            let err = service
                .update_member(&admin(), &MemberId::from("m1"), request)
                .await
                .unwrap_err();
            assert_eq!(err.status_code(), 400, "{body}");
        }

        let err = service
            .update_member(&admin(), &MemberId::from("ghost"), UpdateMemberRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_edit_ledger() {
        let harness = TestHarness::new();
        harness.members.insert(approved_member("m1", "Kim"));
        harness.attendance.insert("m1", date(2024, 3, 2), AttendanceStatus::Present);
        harness.attendance.insert("m1", date(2024, 3, 3), AttendanceStatus::Present);

        let ctx = harness.context_at(kst(2024, 3, 20, 12, 0));
        let request = LedgerEditRequest {
            entries: vec![
                LedgerEntry { date: date(2024, 3, 2), status: LedgerMark::Late },
                LedgerEntry { date: date(2024, 3, 3), status: LedgerMark::Absent },
                LedgerEntry { date: date(2024, 3, 10), status: LedgerMark::Absent },
                LedgerEntry { date: date(2024, 3, 9), status: LedgerMark::Present },
            ],
        };
        let resp = AdminService::new(&ctx)
            .edit_ledger(&admin(), &MemberId::from("m1"), request)
            .await
            .unwrap();

        assert_eq!(resp.upserted, 2);
        assert_eq!(resp.deleted, 1);

        let detail = AdminService::new(&ctx)
            .member_detail(&admin(), &MemberId::from("m1"))
            .await
            .unwrap();
        let ledger: Vec<_> = detail.records.iter().map(|r| (r.date, r.status)).collect();
        assert_eq!(
            ledger,
            vec![
                (date(2024, 3, 9), AttendanceStatus::Present),
                (date(2024, 3, 2), AttendanceStatus::Late),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_ledger_edit_changes_nothing() {
        let harness = TestHarness::new();
        harness.members.insert(approved_member("m1", "Kim"));
        harness.attendance.insert("m1", date(2024, 3, 2), AttendanceStatus::Present);
        harness.attendance.break_ledger_at(date(2024, 3, 9));

        let ctx = harness.context_at(kst(2024, 3, 20, 12, 0));
        let request = LedgerEditRequest {
            entries: vec![
                LedgerEntry { date: date(2024, 3, 2), status: LedgerMark::Absent },
                LedgerEntry { date: date(2024, 3, 3), status: LedgerMark::Late },
                LedgerEntry { date: date(2024, 3, 9), status: LedgerMark::Present },
            ],
        };
        let err = AdminService::new(&ctx)
            .edit_ledger(&admin(), &MemberId::from("m1"), request)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 500);

        let detail = AdminService::new(&ctx)
            .member_detail(&admin(), &MemberId::from("m1"))
            .await
            .unwrap();
        let ledger: Vec<_> = detail.records.iter().map(|r| (r.date, r.status)).collect();
        assert_eq!(ledger, vec![(date(2024, 3, 2), AttendanceStatus::Present)]);
    }

    #[tokio::test]
    async fn test_purge_in_chunks() {
        let harness = TestHarness::new();
        harness.members.insert(approved_member("m1", "Kim"));
        let start = date(2020, 1, 1);
        for offset in 0..1_203 {
            harness
                .attendance
                .insert("m1", start + Duration::days(offset), AttendanceStatus::Present);
        }

        let ctx = harness.context_at(kst(2024, 3, 20, 12, 0));
        let service = AdminService::new(&ctx);
        let resp = service
            .purge_member(&admin(), &MemberId::from("m1"))
            .await
            .unwrap();

        assert_eq!(resp.deleted_records, 1_203);
        assert!(resp.member_deleted);
        assert_eq!(harness.attendance.count_for("m1"), 0);
        assert!(harness.members.get("m1").is_none());

        let again = service
            .purge_member(&admin(), &MemberId::from("m1"))
            .await
            .unwrap_err();
        assert_eq!(again.status_code(), 404);
    }

    #[tokio::test]
    async fn test_purge_resumes_after_member_row_gone() {
        let harness = TestHarness::new();
        harness.attendance.insert("orphan", date(2024, 3, 2), AttendanceStatus::Late);

        let ctx = harness.context_at(kst(2024, 3, 20, 12, 0));
        let resp = AdminService::new(&ctx)
            .purge_member(&admin(), &MemberId::from("orphan"))
            .await
            .unwrap();
        assert_eq!(resp.deleted_records, 1);
        assert!(!resp.member_deleted);
    }
}
