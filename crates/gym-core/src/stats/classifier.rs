//! Member status classifier
//!
//! Rules are evaluated in priority order and the first match wins:
//! sick leave, never attended, dropout, warning, recently active, reminder.

use chrono::NaiveDate;
use serde::Serialize;

use crate::entities::Member;

pub const DROPOUT_DAYS: i64 = 21;
pub const WARNING_DAYS: i64 = 14;
pub const ACTIVE_DAYS: i64 = 7;

/// Unnotified-absence markers that force a dropout
pub const DROPOUT_UNNOTIFIED: u8 = 2;

/// Member flags the classifier looks at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberFlags {
    pub sick_leave: bool,
    pub unnotified_count: u8,
}

impl From<&Member> for MemberFlags {
    fn from(member: &Member) -> Self {
        Self {
            sick_leave: member.sick_leave,
            unnotified_count: member.unnotified_count(),
        }
    }
}

/// Which dropout conditions fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropoutReasons {
    pub absent_too_long: bool,
    pub unnotified_absences: bool,
}

impl DropoutReasons {
    /// Reason keys joined by `", "`
    pub fn describe(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if self.absent_too_long {
            parts.push("absent_21_days");
        }
        if self.unnotified_absences {
            parts.push("unnotified_absences");
        }
        parts.join(", ")
    }
}

/// Derived member status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberStatus {
    SickLeave,
    NeverAttended,
    Dropout(DropoutReasons),
    Warning,
    ActiveStreak,
    ActiveRecent,
    DefaultReminder,
}

impl MemberStatus {
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::SickLeave => "sick_leave",
            Self::NeverAttended => "never_attended",
            Self::Dropout(_) => "dropout",
            Self::Warning => "warning",
            Self::ActiveStreak => "active_streak",
            Self::ActiveRecent => "active_recent",
            Self::DefaultReminder => "default_reminder",
        }
    }

    pub fn color_tag(&self) -> &'static str {
        match self {
            Self::SickLeave => "gray",
            Self::NeverAttended => "gray",
            Self::Dropout(_) => "red",
            Self::Warning => "orange",
            Self::ActiveStreak => "green",
            Self::ActiveRecent => "blue",
            Self::DefaultReminder => "yellow",
        }
    }

    /// Dropout reason string, if any
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Dropout(reasons) => Some(reasons.describe()),
            _ => None,
        }
    }
}

/// Serializable view of a status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub message_key: &'static str,
    pub color_tag: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<MemberStatus> for StatusView {
    fn from(status: MemberStatus) -> Self {
        Self {
            message_key: status.message_key(),
            color_tag: status.color_tag(),
            reason: status.reason(),
        }
    }
}

/// Whole days between `today` and the last record; `None` when never attended
pub fn days_absent(today: NaiveDate, last_record: Option<NaiveDate>) -> Option<i64> {
    last_record.map(|last| (today - last).num_days())
}

/// Classify a member
///
/// `days_absent` is `None` for a member with no record at all, which is
/// distinct from `Some(0)` (attended today). `month_count` is the number of
/// records in the current calendar month.
pub fn classify_member(flags: MemberFlags, days_absent: Option<i64>, month_count: u32) -> MemberStatus {
    if flags.sick_leave {
        return MemberStatus::SickLeave;
    }

    let Some(days) = days_absent else {
        return MemberStatus::NeverAttended;
    };

    let reasons = DropoutReasons {
        absent_too_long: days >= DROPOUT_DAYS,
        unnotified_absences: flags.unnotified_count >= DROPOUT_UNNOTIFIED,
    };
    if reasons.absent_too_long || reasons.unnotified_absences {
        return MemberStatus::Dropout(reasons);
    }

    if days >= WARNING_DAYS {
        return MemberStatus::Warning;
    }

    if days < ACTIVE_DAYS {
        return if month_count > 1 {
            MemberStatus::ActiveStreak
        } else {
            MemberStatus::ActiveRecent
        };
    }

    MemberStatus::DefaultReminder
}
