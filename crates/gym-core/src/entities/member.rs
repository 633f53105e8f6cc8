//! Member entity - a person who logs in and checks in at the club

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::{ApprovalState, MemberId};

/// Club member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    /// Display name, editable by administrators only
    pub nickname: String,
    /// Name captured at first login; never changes afterwards
    pub initial_nickname: String,
    pub profile_image: Option<String>,
    pub approval: ApprovalState,
    pub sick_leave: bool,
    pub unnotified_absence_1: Option<NaiveDate>,
    pub unnotified_absence_2: Option<NaiveDate>,
    /// Cohort label (`YY-MM`)
    pub batch: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Create a member from a first login
    pub fn new(id: MemberId, nickname: impl Into<String>, profile_image: Option<String>) -> Self {
        let nickname = nickname.into();
        let now = Utc::now();
        Self {
            id,
            initial_nickname: nickname.clone(),
            nickname,
            profile_image,
            approval: ApprovalState::Pending,
            sick_leave: false,
            unnotified_absence_1: None,
            unnotified_absence_2: None,
            batch: None,
            created_at: now,
            last_login_at: now,
            updated_at: now,
        }
    }

    /// Number of unnotified-absence markers set (0..=2)
    pub fn unnotified_count(&self) -> u8 {
        u8::from(self.unnotified_absence_1.is_some()) + u8::from(self.unnotified_absence_2.is_some())
    }

    /// Record a returning login
    pub fn touch_login(&mut self, profile_image: Option<String>) {
        let now = Utc::now();
        self.profile_image = profile_image;
        self.last_login_at = now;
        self.updated_at = now;
    }

    #[inline]
    pub fn is_approved(&self) -> bool {
        self.approval == ApprovalState::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_member_snapshot() {
        let member = Member::new(MemberId::from("42"), "runner", None);
        assert_eq!(member.nickname, "runner");
        assert_eq!(member.initial_nickname, "runner");
        assert_eq!(member.approval, ApprovalState::Pending);
        assert!(!member.is_approved());
        assert_eq!(member.unnotified_count(), 0);
    }

    #[test]
    fn test_touch_login_keeps_nickname() {
        let mut member = Member::new(MemberId::from("42"), "runner", None);
        member.nickname = "coach".to_string();
        member.touch_login(Some("https://img/1.png".to_string()));
        assert_eq!(member.nickname, "coach");
        assert_eq!(member.initial_nickname, "runner");
        assert_eq!(member.profile_image.as_deref(), Some("https://img/1.png"));
    }

    #[test]
    fn test_unnotified_count() {
        let mut member = Member::new(MemberId::from("1"), "a", None);
        member.unnotified_absence_2 = NaiveDate::from_ymd_opt(2024, 3, 2);
        assert_eq!(member.unnotified_count(), 1);
        member.unnotified_absence_1 = NaiveDate::from_ymd_opt(2024, 3, 9);
        assert_eq!(member.unnotified_count(), 2);
    }
}
