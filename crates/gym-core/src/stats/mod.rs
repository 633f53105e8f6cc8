//! Derived attendance statistics: status classification, streaks, rates, rankings

mod class_days;
mod classifier;
mod ranking;
mod streak;

pub use class_days::{attendance_rate, valid_class_days};
pub use classifier::{
    classify_member, days_absent, DropoutReasons, MemberFlags, MemberStatus, StatusView,
    ACTIVE_DAYS, DROPOUT_DAYS, DROPOUT_UNNOTIFIED, WARNING_DAYS,
};
pub use ranking::{assign_ranks, rank_month, RankEntry, RankMode};
pub use streak::{longest_weekly_streak, WeeklyStreak};
