//! Demo data for development databases
//!
//! A handful of approved members and a month of randomly generated
//! attendance, so the ranking and the dashboard have something to show.

use rand::Rng;
use sqlx::PgPool;
use tracing::{info, instrument};

use gym_core::entities::{LedgerChange, Member};
use gym_core::policy::AttendanceSchedule;
use gym_core::traits::{AttendanceRepository, MemberRepository, RepoResult};
use gym_core::value_objects::{ApprovalState, AttendanceStatus, DateRange, MemberId};

use crate::repositories::{PgAttendanceRepository, PgMemberRepository};

/// Demo member ids and nicknames
pub const DEMO_MEMBERS: [(&str, &str); 5] = [
    ("demo-1", "JiuJitsuMaster"),
    ("demo-2", "WhiteBeltHero"),
    ("demo-3", "MatShark"),
    ("demo-4", "GuardPlayer"),
    ("demo-5", "KimuraKing"),
];

const ATTEND_PROBABILITY: f64 = 0.8;
const LATE_PROBABILITY: f64 = 0.2;

/// Ledger changes for one demo member
#[derive(Debug, Clone)]
pub struct MemberPlan {
    pub member: Member,
    /// One change per class day of the month; `None` clears the day
    pub changes: Vec<LedgerChange>,
}

/// What a seeding run wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub members: u32,
    pub class_days: u32,
    pub records: u32,
}

/// Draw a month of attendance for every demo member
///
/// Every class day gets an entry, so seeding the same month again replaces
/// the earlier draw instead of piling on top of it.
pub fn plan_month<R: Rng>(
    schedule: &AttendanceSchedule,
    month: DateRange,
    rng: &mut R,
) -> Vec<MemberPlan> {
    let class_days: Vec<_> = month.days().filter(|d| schedule.is_class_day(*d)).collect();

    DEMO_MEMBERS
        .iter()
        .map(|(id, nickname)| {
            let mut member = Member::new(MemberId::from(*id), *nickname, None);
            member.approval = ApprovalState::Approved;

            let changes = class_days
                .iter()
                .map(|&date| {
                    let status = rng.gen_bool(ATTEND_PROBABILITY).then(|| {
                        if rng.gen_bool(LATE_PROBABILITY) {
                            AttendanceStatus::Late
                        } else {
                            AttendanceStatus::Present
                        }
                    });
                    LedgerChange { date, status }
                })
                .collect();

            MemberPlan { member, changes }
        })
        .collect()
}

/// Write a plan; existing demo members are left as they are
#[instrument(skip(pool, plan), fields(members = plan.len()))]
pub async fn apply_plan(pool: &PgPool, plan: &[MemberPlan]) -> RepoResult<SeedReport> {
    let members = PgMemberRepository::new(pool.clone());
    let attendance = PgAttendanceRepository::new(pool.clone());
    let mut report = SeedReport::default();

    for entry in plan {
        members.create(&entry.member).await?;
        let outcome = attendance.apply_changes(&entry.member.id, &entry.changes).await?;

        report.members += 1;
        report.class_days = report.class_days.max(entry.changes.len() as u32);
        report.records += outcome.upserted;
    }

    info!(
        members = report.members,
        class_days = report.class_days,
        records = report.records,
        "Demo data written"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_plan_covers_every_class_day() {
        let march = DateRange::month(2024, 3).unwrap();
        let plan = plan_month(&AttendanceSchedule::default(), march, &mut StdRng::seed_from_u64(7));

        assert_eq!(plan.len(), DEMO_MEMBERS.len());
        for entry in &plan {
            assert!(entry.member.is_approved());
            // March 2024 has five Saturdays and five Sundays
            assert_eq!(entry.changes.len(), 10);
            for change in &entry.changes {
                assert!(march.contains(change.date));
                assert!(matches!(change.date.weekday(), Weekday::Sat | Weekday::Sun));
            }
        }
    }

    #[test]
    fn test_plan_is_reproducible() {
        let march = DateRange::month(2024, 3).unwrap();
        let schedule = AttendanceSchedule::default();
        let first = plan_month(&schedule, march, &mut StdRng::seed_from_u64(42));
        let second = plan_month(&schedule, march, &mut StdRng::seed_from_u64(42));

        let flatten = |plan: &[MemberPlan]| -> Vec<LedgerChange> {
            plan.iter().flat_map(|p| p.changes.iter().copied()).collect()
        };
        assert_eq!(flatten(&first), flatten(&second));

        let attended = flatten(&first).iter().filter(|c| c.status.is_some()).count();
        assert!(attended > 0);
    }
}
